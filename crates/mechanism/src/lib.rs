//! Planar linkage mechanisms.
//!
//! A [`Mechanism`] ties together the vectors of a linkage, the joint at the
//! origin, a [`LoopEquation`] over its unknown angles, and the profile of its
//! driving input. [`Mechanism::iterate`] sweeps the profile with continuation
//! and records the solved angles, angular velocities, and angular
//! accelerations on every vector. Joint positions, joint paths, and animation
//! frames are then derived from the recorded series.
//!
//! [`VectorLoop`] builds an analytic loop equation from the same vectors,
//! including links whose length varies over time. Any other
//! [`LoopEquation`], such as a [`LoopFn`] closure, works as well.
//!
//! # Example
//!
//! ```
//! use std::f64::consts::PI;
//!
//! use linkage_core::{Guess, Profile, Vector};
//! use linkage_mechanism::{Mechanism, VectorLoop};
//!
//! let vectors = vec![
//!     Vector::fixed("O2", "O4", 3.0, PI),
//!     Vector::driven("O2", "A", 1.0),
//!     Vector::unknown("A", "B", 3.0),
//!     Vector::unknown("O4", "B", 1.0),
//! ];
//! let equation = VectorLoop::builder(&vectors)
//!     .plus(1)
//!     .plus(2)
//!     .minus(3)
//!     .minus(0)
//!     .build()?;
//!
//! let profile = Profile::constant_velocity(0.1, 1.0, 10, 1.0)?;
//! let guess = Guess::positions(vec![PI, 0.1])?;
//!
//! let mut mechanism = Mechanism::new(vectors, "O2", equation, profile, guess)?;
//! mechanism.iterate()?;
//!
//! assert_eq!(mechanism.resolved(), 10);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`LoopEquation`]: linkage_core::LoopEquation
//! [`LoopFn`]: linkage_core::LoopFn

mod error;
mod frame;
mod layout;
mod mechanism;
mod vector_loop;

pub use error::Error;
pub use frame::{Bounds, Frame, Frames, JointPath};
pub use mechanism::Mechanism;
pub use vector_loop::{VectorLoop, VectorLoopBuilder};
