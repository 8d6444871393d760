use linkage_core::Observer;

use crate::traits::{CanHoldPrevious, HasFailure};

/// Holds the previous state over failed samples, up to a limit.
///
/// Once `limit` samples have been held, later failures are left to the
/// solver, which reports them as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldFailures {
    limit: usize,
    held: usize,
}

impl HoldFailures {
    /// Creates an observer that holds at most `limit` failed samples.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { limit, held: 0 }
    }

    /// Returns the number of failures held so far.
    #[must_use]
    pub fn held(&self) -> usize {
        self.held
    }
}

impl<E, A> Observer<E, A> for HoldFailures
where
    E: HasFailure,
    A: CanHoldPrevious,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if !event.is_failure() || self.held >= self.limit {
            return None;
        }
        self.held += 1;
        Some(A::hold_previous())
    }
}

/// Allows `&mut HoldFailures` to be passed to solvers that take an observer by
/// value, so [`HoldFailures::held`] can be read after the solve.
impl<E, A> Observer<E, A> for &mut HoldFailures
where
    E: HasFailure,
    A: CanHoldPrevious,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}
