use super::SampleState;

/// Indicates how the sweep finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every sample was solved or held.
    Complete,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Final sweep status.
    pub status: Status,

    /// One state per recorded sample, in sample order.
    pub states: Vec<SampleState>,

    /// Indices of samples recorded through [`Action::HoldPrevious`](super::Action::HoldPrevious).
    pub held: Vec<usize>,
}
