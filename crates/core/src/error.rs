use thiserror::Error;

/// Errors raised by malformed access or inconsistent construction input.
///
/// Everything here is detected before (or instead of) numerical work, so a
/// `DomainError` never means a solver failed to converge.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("sample {sample} is out of range for {len} samples")]
    SampleOutOfRange { sample: usize, len: usize },

    #[error("profile lengths differ ({position}, {velocity}, {acceleration})")]
    ProfileMismatch {
        position: usize,
        velocity: usize,
        acceleration: usize,
    },

    #[error("profile has no samples")]
    EmptyProfile,

    #[error("{what} contains non-finite value {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("length must be non-negative, found {value} at sample {sample}")]
    NegativeLength { sample: usize, value: f64 },

    #[error("{what} has {found} entries, expected {expected}")]
    CountMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("expected exactly one driven vector, found {found}")]
    DrivenCount { found: usize },

    #[error("joint `{0}` is not used by any vector")]
    UnknownJoint(String),

    #[error("joint `{0}` is not connected to the origin")]
    Disconnected(String),

    #[error("vector index {index} is out of range for {len} vectors")]
    UnknownVector { index: usize, len: usize },

    #[error("unknown angle {index} does not appear in any loop")]
    UnusedUnknown { index: usize },

    #[error("loop {index} has no vectors")]
    EmptyLoop { index: usize },

    #[error("time stamps must be strictly increasing")]
    NonIncreasingTimes,
}
