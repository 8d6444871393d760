use super::{Failure, SampleState};

/// Events emitted by the sweep, one per sample.
#[derive(Debug)]
pub enum Event<'a> {
    /// The sample was fully solved.
    Solved {
        /// The solved state.
        state: &'a SampleState,

        /// Newton steps taken by the position solve.
        iters: usize,
    },

    /// The sample failed and the previous state was repeated.
    Held {
        /// The repeated state, carrying this sample's index and drive.
        state: &'a SampleState,

        /// The failure that was recovered from.
        failure: &'a Failure,
    },

    /// The sample failed.
    ///
    /// Returning [`Action::HoldPrevious`](super::Action::HoldPrevious)
    /// recovers, [`Action::StopEarly`](super::Action::StopEarly) ends the
    /// sweep successfully, and anything else returns the error.
    Failed {
        sample: usize,
        failure: &'a Failure,
        last_valid: Option<&'a SampleState>,
    },
}

impl<'a> Event<'a> {
    /// Returns the sample this event is about.
    #[must_use]
    pub fn sample(&self) -> usize {
        match self {
            Self::Solved { state, .. } | Self::Held { state, .. } => state.sample,
            Self::Failed { sample, .. } => *sample,
        }
    }

    /// Returns the state that will be recorded for this sample, if any.
    #[must_use]
    pub fn state(&self) -> Option<&'a SampleState> {
        match self {
            Self::Solved { state, .. } | Self::Held { state, .. } => Some(*state),
            Self::Failed { .. } => None,
        }
    }

    /// Returns the failure, for held and failed samples.
    #[must_use]
    pub fn failure(&self) -> Option<&'a Failure> {
        match self {
            Self::Solved { .. } => None,
            Self::Held { failure, .. } | Self::Failed { failure, .. } => Some(*failure),
        }
    }
}
