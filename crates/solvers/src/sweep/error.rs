use linkage_core::DomainError;
use thiserror::Error;

use super::{Failure, FailureKind, SampleState};

/// Errors that can occur during a sweep.
#[derive(Debug, Error)]
pub enum Error {
    /// The inputs were inconsistent; nothing was solved.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A sample failed and the observer did not recover.
    #[error("sample {sample} failed")]
    Sample {
        sample: usize,
        last_valid: Option<Box<SampleState>>,
        #[source]
        failure: Failure,
    },
}

impl Error {
    /// Returns the index of the failed sample, if a sample failed.
    #[must_use]
    pub fn sample(&self) -> Option<usize> {
        match self {
            Self::Domain(_) => None,
            Self::Sample { sample, .. } => Some(*sample),
        }
    }

    /// Returns the sample failure, if a sample failed.
    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Domain(_) => None,
            Self::Sample { failure, .. } => Some(failure),
        }
    }

    /// Returns the failure classification, if a sample failed.
    #[must_use]
    pub fn kind(&self) -> Option<FailureKind> {
        self.failure().map(Failure::kind)
    }

    /// Returns the last state solved before the failure.
    #[must_use]
    pub fn last_valid(&self) -> Option<&SampleState> {
        match self {
            Self::Domain(_) => None,
            Self::Sample { last_valid, .. } => last_valid.as_deref(),
        }
    }
}
