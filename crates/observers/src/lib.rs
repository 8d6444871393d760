//! Reusable observers for the linkage solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the position solver and the sweep.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasResidual`], [`HasSample`], [`HasFailure`], [`CanStopEarly`],
//!   [`CanHoldPrevious`])
//!
//! # Observers
//!
//! - [`TraceObserver`] — logs solver events through `tracing` and counts them
//! - [`HoldFailures`] — holds the previous state over a bounded number of
//!   failed samples
//!
//! [`Observer`]: linkage_core::Observer
//! [`HasResidual`]: traits::HasResidual
//! [`HasSample`]: traits::HasSample
//! [`HasFailure`]: traits::HasFailure
//! [`CanStopEarly`]: traits::CanStopEarly
//! [`CanHoldPrevious`]: traits::CanHoldPrevious

pub mod traits;

mod hold;
mod trace;

pub use hold::HoldFailures;
pub use trace::TraceObserver;
