//! Solvers for planar linkage kinematics.
//!
//! Every solver works on a [`LoopEquation`] and reports progress through an
//! [`Observer`].
//!
//! # Solvers
//!
//! - [`position::newton`] — Newton–Raphson solve of the unknown angles at one
//!   sample
//! - [`rates`] — linear solves for angular velocities and accelerations once
//!   the angles are known
//! - [`sweep`] — runs all three over every sample of a driving profile, seeding
//!   each sample with the previous solution (continuation)
//!
//! [`LoopEquation`]: linkage_core::LoopEquation
//! [`Observer`]: linkage_core::Observer

mod linear;

pub mod position;
pub mod rates;
pub mod sweep;
