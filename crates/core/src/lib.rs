//! Core types and traits for planar linkage kinematics.
//!
//! A linkage is described as a graph of [`Vector`]s between named [`Joint`]s.
//! Each vector has a [`Length`] (fixed or prescribed per sample) and an
//! [`AngleRole`]: driven by the input [`Profile`], solved for, or fixed.
//! The closed loops of the linkage are expressed as a [`LoopEquation`], whose
//! residual vanishes when every loop closes.
//!
//! - [`LoopEquation`] — residual, Jacobian, and rate terms of the loop system
//! - [`LoopFn`] — adapts a pure closure to [`LoopEquation`]
//! - [`Observer`] — receives solver events and optionally returns actions
//! - [`finite_difference`] — derivative estimates behind the trait defaults
//!
//! Solvers live in `linkage-solvers`; the `Mechanism` that ties everything
//! together lives in `linkage-mechanism`.

mod equation;
mod error;
mod joint;
mod observer;
mod profile;
mod vector;

pub mod finite_difference;

pub use equation::{LoopEquation, LoopFn, LoopFnError, NoLoop};
pub use error::DomainError;
pub use joint::Joint;
pub use observer::Observer;
pub use profile::{Guess, Motion, Profile};
pub use vector::{AngleRole, Length, Vector, unit_pair};
