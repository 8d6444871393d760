//! Position solvers: finding the unknown angles that close every loop.
//!
//! A position solve works on a single sample with a known driving input.
//! Continuation across samples is the job of [`sweep`](crate::sweep).
//!
//! # Solvers
//!
//! - [`newton`] — Newton–Raphson from an initial guess

pub mod newton;
