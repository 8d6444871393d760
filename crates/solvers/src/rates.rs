//! Angular velocity and acceleration solves.
//!
//! Once the angles at a sample are known, differentiating the loop equation
//! in time gives linear systems in the unknown rates:
//!
//! ```text
//! J ω = -velocity_terms
//! J α = -acceleration_terms
//! ```
//!
//! Both share the position Jacobian `J`. Each solve refines a seed `s` by
//! solving `J δ = -terms - J s` and returning `s + δ`, so a seed that already
//! satisfies the system comes back unchanged to rounding.

mod config;
mod error;

pub use config::{Config, ConfigError};
pub use error::Error;

use linkage_core::{LoopEquation, Motion};
use nalgebra::{DMatrix, DVector};

use crate::linear;

/// Solves for the unknown angular velocities at a sample.
///
/// # Errors
///
/// Returns an error if the Jacobian is singular, if the equation fails, or if
/// any input or result is non-finite or of the wrong size.
pub fn velocity<E: LoopEquation>(
    equation: &E,
    sample: usize,
    angles: &[f64],
    drive: &Motion,
    seed: &[f64],
    config: &Config,
) -> Result<Vec<f64>, Error> {
    let unknowns = equation.unknowns();
    check_len("angles", unknowns, angles.len())?;

    let jacobian = jacobian(equation, sample, angles, drive.position)?;
    let terms = equation
        .velocity_terms(sample, angles, drive)
        .map_err(Error::equation)?;

    refine(jacobian, &terms, seed, config)
}

/// Solves for the unknown angular accelerations at a sample.
///
/// # Errors
///
/// Returns an error if the Jacobian is singular, if the equation fails, or if
/// any input or result is non-finite or of the wrong size.
pub fn acceleration<E: LoopEquation>(
    equation: &E,
    sample: usize,
    angles: &[f64],
    velocities: &[f64],
    drive: &Motion,
    seed: &[f64],
    config: &Config,
) -> Result<Vec<f64>, Error> {
    let unknowns = equation.unknowns();
    check_len("angles", unknowns, angles.len())?;
    check_len("velocities", unknowns, velocities.len())?;

    let jacobian = jacobian(equation, sample, angles, drive.position)?;
    let terms = equation
        .acceleration_terms(sample, angles, velocities, drive)
        .map_err(Error::equation)?;

    refine(jacobian, &terms, seed, config)
}

fn jacobian<E: LoopEquation>(
    equation: &E,
    sample: usize,
    angles: &[f64],
    input: f64,
) -> Result<DMatrix<f64>, Error> {
    let unknowns = equation.unknowns();
    let jacobian = equation
        .jacobian(sample, angles, input)
        .map_err(Error::equation)?;

    if jacobian.shape() != (unknowns, unknowns) {
        return Err(Error::Dimension {
            what: "jacobian",
            expected: unknowns * unknowns,
            found: jacobian.len(),
        });
    }
    Ok(jacobian)
}

/// Solves `J x = -terms` starting from `seed`.
fn refine(
    jacobian: DMatrix<f64>,
    terms: &DVector<f64>,
    seed: &[f64],
    config: &Config,
) -> Result<Vec<f64>, Error> {
    let unknowns = jacobian.ncols();
    check_len("rate terms", unknowns, terms.len())?;
    check_len("seed", unknowns, seed.len())?;

    if terms.iter().any(|t| !t.is_finite()) {
        return Err(Error::NonFinite { what: "rate terms" });
    }
    let seed = DVector::from_column_slice(seed);
    if seed.iter().any(|s| !s.is_finite()) {
        return Err(Error::NonFinite { what: "seed" });
    }

    let rhs = -terms - &jacobian * &seed;
    let delta = linear::solve(jacobian, &rhs, config.singular_tol())
        .map_err(|singular| Error::Singular {
            rcond: singular.rcond,
        })?;

    let rates = seed + delta;
    if rates.iter().any(|r| !r.is_finite()) {
        return Err(Error::NonFinite { what: "rates" });
    }
    Ok(rates.as_slice().to_vec())
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

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;
    use linkage_core::{LoopFn, NoLoop};

    /// Parallelogram four-bar: ground 3 to (-3, 0), crank 1, coupler 3,
    /// output 1. On this branch the output angle tracks the input and the
    /// coupler stays at π.
    fn parallelogram() -> LoopFn<impl Fn(&[f64], f64) -> [f64; 2], [f64; 2]> {
        LoopFn::new(2, |x: &[f64], input: f64| {
            [
                input.cos() + 3.0 * x[0].cos() - x[1].cos() + 3.0,
                input.sin() + 3.0 * x[0].sin() - x[1].sin(),
            ]
        })
    }

    #[test]
    fn parallelogram_rates_follow_the_input() {
        let equation = parallelogram();
        let input = 1.0;
        let angles = [PI, input];
        let drive = Motion::new(input, 2.0, -0.5);
        let config = Config::default();

        let omega = velocity(&equation, 0, &angles, &drive, &[0.0, 0.0], &config).unwrap();
        assert_relative_eq!(omega[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(omega[1], 2.0, epsilon = 1e-6);

        let alpha =
            acceleration(&equation, 0, &angles, &omega, &drive, &[0.0, 0.0], &config).unwrap();
        assert_relative_eq!(alpha[0], 0.0, epsilon = 1e-4);
        assert_relative_eq!(alpha[1], -0.5, epsilon = 1e-4);
    }

    #[test]
    fn exact_seed_is_kept() {
        let equation = parallelogram();
        let drive = Motion::new(FRAC_PI_2, 1.0, 0.0);
        let omega = velocity(
            &equation,
            0,
            &[PI, FRAC_PI_2],
            &drive,
            &[0.0, 1.0],
            &Config::default(),
        )
        .unwrap();

        assert_relative_eq!(omega[0], 0.0, epsilon = 1e-8);
        assert_relative_eq!(omega[1], 1.0, epsilon = 1e-8);
    }

    #[test]
    fn folded_linkage_is_singular() {
        // Coupler and output collinear: both unknown links point along -x.
        let equation = parallelogram();
        let error = velocity(
            &equation,
            0,
            &[PI, PI],
            &Motion::new(0.0, 1.0, 0.0),
            &[0.0, 0.0],
            &Config::new(1e-8).unwrap(),
        )
        .unwrap_err();

        assert!(matches!(error, Error::Singular { .. }));
    }

    #[test]
    fn seed_length_is_checked() {
        let error = velocity(
            &parallelogram(),
            0,
            &[PI, 1.0],
            &Motion::at_rest(1.0),
            &[0.0],
            &Config::default(),
        )
        .unwrap_err();

        assert!(matches!(
            error,
            Error::Dimension {
                what: "seed",
                expected: 2,
                found: 1,
            }
        ));
    }

    #[test]
    fn empty_system_has_no_rates() {
        let drive = Motion::new(0.3, 1.0, 1.0);
        let omega = velocity(&NoLoop, 0, &[], &drive, &[], &Config::default()).unwrap();
        let alpha = acceleration(&NoLoop, 0, &[], &[], &drive, &[], &Config::default()).unwrap();

        assert!(omega.is_empty());
        assert!(alpha.is_empty());
    }

    #[test]
    fn config_rejects_bad_tolerance() {
        assert_eq!(Config::new(1.5), Err(ConfigError::SingularTol));
        assert!(Config::new(0.0).is_ok());
    }
}
