//! Newton–Raphson solver for the unknown angles of a linkage.
//!
//! # Algorithm
//!
//! Starting from a guess `x₀`, each iteration evaluates the loop residual
//! `F(x)` and, unless it is already within tolerance, solves
//!
//! ```text
//! J(x) Δx = -F(x)
//! ```
//!
//! for the Newton step and updates `x ← x + Δx`. The step is undamped; the
//! guess is expected to be close, as it is when the previous sample of a sweep
//! seeds the next.
//!
//! The linear system is solved through a singular value decomposition. When
//! the Jacobian's reciprocal condition number drops to
//! [`Config::singular_tol`], the solve fails with
//! [`Error::SingularJacobian`] instead of taking a wild step.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per residual evaluation, starting with the
//! guess at iteration 0. Observers can return [`Action::StopEarly`] to return
//! the current iterate without convergence.

mod action;
mod config;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use linkage_core::{LoopEquation, Observer};
use nalgebra::DVector;

use crate::linear;

/// Solves the loop equation for the unknown angles at one sample.
///
/// # Errors
///
/// Returns an error if the iteration does not converge within
/// [`Config::max_iters`] steps, if the Jacobian becomes singular, if the
/// residual becomes non-finite, or if the equation fails or returns values of
/// the wrong size.
pub fn solve<E, Obs>(
    equation: &E,
    sample: usize,
    input: f64,
    guess: &[f64],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    E: LoopEquation,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let unknowns = equation.unknowns();
    check_len("guess", unknowns, guess.len())?;

    let mut angles = DVector::from_column_slice(guess);
    let mut iter = 0;

    loop {
        let residuals = equation
            .residuals(sample, angles.as_slice(), input)
            .map_err(Error::equation)?;
        check_len("residual", unknowns, residuals.len())?;

        if residuals.iter().any(|r| !r.is_finite()) {
            return Err(Error::NonFiniteResidual {
                iter,
                angles: angles.as_slice().to_vec(),
            });
        }
        let residual_norm = residuals.norm();

        let event = Event {
            sample,
            iter,
            angles: angles.as_slice(),
            residuals: residuals.as_slice(),
            residual_norm,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                angles: angles.as_slice().to_vec(),
                residual_norm,
                iters: iter,
            });
        }

        if residual_norm <= config.residual_tol() {
            return Ok(Solution {
                status: Status::Converged,
                angles: angles.as_slice().to_vec(),
                residual_norm,
                iters: iter,
            });
        }

        if iter == config.max_iters() {
            return Err(Error::NotConverged {
                iters: iter,
                residual_norm,
                angles: angles.as_slice().to_vec(),
            });
        }

        let jacobian = equation
            .jacobian(sample, angles.as_slice(), input)
            .map_err(Error::equation)?;
        if jacobian.shape() != (unknowns, unknowns) {
            return Err(Error::Dimension {
                what: "jacobian",
                expected: unknowns * unknowns,
                found: jacobian.len(),
            });
        }

        let step = linear::solve(jacobian, &-residuals, config.singular_tol()).map_err(
            |singular| Error::SingularJacobian {
                iter,
                rcond: singular.rcond,
                angles: angles.as_slice().to_vec(),
            },
        )?;

        angles += step;
        iter += 1;
    }
}

/// Solves the loop equation without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`].
pub fn solve_unobserved<E: LoopEquation>(
    equation: &E,
    sample: usize,
    input: f64,
    guess: &[f64],
    config: &Config,
) -> Result<Solution, Error> {
    solve(equation, sample, input, guess, config, ())
}

fn check_len(what: &'static str, expected: usize, found: usize) -> Result<(), Error> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::Dimension {
            what,
            expected,
            found,
        })
    }
}
