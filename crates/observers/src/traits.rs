//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, so one
//! observer can serve both [`newton`] and [`sweep`].
//!
//! # Event traits
//!
//! - [`HasSample`] — events tied to a sample of the driving profile
//! - [`HasResidual`] — events that carry a residual norm
//! - [`HasFailure`] — events that may report a failed sample
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//! - [`CanHoldPrevious`] — actions that can repeat the previous state
//!
//! # Example
//!
//! ```rust
//! use linkage_core::Observer;
//! use linkage_observers::traits::{CanStopEarly, HasSample};
//!
//! /// Stops any solver once it reaches a given sample.
//! struct StopAt(usize);
//!
//! impl<E: HasSample, A: CanStopEarly> Observer<E, A> for StopAt {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.sample() >= self.0).then(A::stop_early)
//!     }
//! }
//! ```
//!
//! Residual-based stopping works the same way for any solver whose events
//! carry a residual norm:
//!
//! ```rust
//! use linkage_core::Observer;
//! use linkage_observers::traits::{CanStopEarly, HasResidual};
//!
//! struct LooseTolerance(f64);
//!
//! impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for LooseTolerance {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.residual_norm() < self.0).then(A::stop_early)
//!     }
//! }
//! ```

use linkage_solvers::{position::newton, sweep};

/// An event tied to one sample of the driving profile.
pub trait HasSample {
    /// Returns the sample index.
    fn sample(&self) -> usize;
}

/// An event that carries a residual norm.
pub trait HasResidual {
    /// Returns the residual norm for this event.
    fn residual_norm(&self) -> f64;
}

/// An event that may report a failed sample.
pub trait HasFailure {
    /// Returns `true` when the event reports a failure the solver can
    /// recover from.
    fn is_failure(&self) -> bool;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

/// An action type that can repeat the previous state over a failure.
pub trait CanHoldPrevious {
    /// Returns the action that holds the previous state.
    fn hold_previous() -> Self;
}

// --- newton::Event ---

impl HasSample for newton::Event<'_> {
    fn sample(&self) -> usize {
        self.sample
    }
}

impl HasResidual for newton::Event<'_> {
    fn residual_norm(&self) -> f64 {
        self.residual_norm
    }
}

// --- sweep::Event ---

impl HasSample for sweep::Event<'_> {
    fn sample(&self) -> usize {
        sweep::Event::sample(self)
    }
}

impl HasFailure for sweep::Event<'_> {
    fn is_failure(&self) -> bool {
        matches!(self, sweep::Event::Failed { .. })
    }
}

// --- Actions ---

impl CanStopEarly for newton::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for sweep::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanHoldPrevious for sweep::Action {
    fn hold_previous() -> Self {
        Self::HoldPrevious
    }
}
