//! Finite-difference derivatives of loop residuals.
//!
//! These back the default derivative methods of
//! [`LoopEquation`](crate::LoopEquation), so an opaque loop closure can be
//! solved without analytic derivatives. Steps are absolute because the
//! variables are angles.

use nalgebra::{DMatrix, DVector};

use crate::Motion;

/// Step for first derivatives, near the optimum for central differences.
fn first_step() -> f64 {
    f64::EPSILON.cbrt()
}

/// Step for second derivatives, near the optimum for central differences.
fn second_step() -> f64 {
    f64::EPSILON.sqrt().sqrt()
}

/// Central-difference Jacobian of `f` at `x`, one column per variable.
///
/// # Errors
///
/// Propagates any error from `f`.
pub fn jacobian<F, E>(f: F, x: &[f64]) -> Result<DMatrix<f64>, E>
where
    F: Fn(&[f64]) -> Result<DVector<f64>, E>,
{
    if x.is_empty() {
        let rows = f(x)?.len();
        return Ok(DMatrix::zeros(rows, 0));
    }

    let mut point = x.to_vec();
    let mut columns = Vec::with_capacity(x.len());
    for k in 0..x.len() {
        // Round-trip the step so `plus - minus` spans exactly `2h`.
        let h = (x[k] + first_step()) - x[k];

        point[k] = x[k] + h;
        let plus = f(&point)?;
        point[k] = x[k] - h;
        let minus = f(&point)?;
        point[k] = x[k];

        columns.push((plus - minus) / (2.0 * h));
    }

    Ok(DMatrix::from_columns(&columns))
}

/// Rate of `f` produced by the driving input moving at `drive.velocity`.
///
/// # Errors
///
/// Propagates any error from `f`.
pub fn input_rate<F, E>(f: F, drive: &Motion) -> Result<DVector<f64>, E>
where
    F: Fn(f64) -> Result<DVector<f64>, E>,
{
    Ok(input_derivative(&f, drive.position)? * drive.velocity)
}

/// Second time derivative of `f(x(t), u(t))` with `ẍ` held at zero.
///
/// With `q = (x, u)` and `q̇ = (velocities, drive.velocity)`, this is
/// `F_u ü + D²F(q)[q̇, q̇]`. The quadratic term is a central second difference
/// along `q̇`.
///
/// # Errors
///
/// Propagates any error from `f`.
pub fn second_rate<F, E>(
    f: F,
    x: &[f64],
    velocities: &[f64],
    drive: &Motion,
) -> Result<DVector<f64>, E>
where
    F: Fn(&[f64], f64) -> Result<DVector<f64>, E>,
{
    let u = drive.position;
    let linear = input_derivative(&|v: f64| f(x, v), u)? * drive.acceleration;

    let scale = velocities
        .iter()
        .fold(drive.velocity.abs(), |max, v| max.max(v.abs()));
    if scale == 0.0 {
        return Ok(linear);
    }

    let s = second_step() / scale;
    let shifted = |sign: f64| -> Vec<f64> {
        x.iter()
            .zip(velocities)
            .map(|(xi, vi)| xi + sign * s * vi)
            .collect()
    };

    let plus = f(&shifted(1.0), u + s * drive.velocity)?;
    let center = f(x, u)?;
    let minus = f(&shifted(-1.0), u - s * drive.velocity)?;
    let quadratic = (plus - center * 2.0 + minus) / (s * s);

    Ok(linear + quadratic)
}

fn input_derivative<F, E>(f: &F, u: f64) -> Result<DVector<f64>, E>
where
    F: Fn(f64) -> Result<DVector<f64>, E>,
{
    let h = (u + first_step()) - u;
    let plus = f(u + h)?;
    let minus = f(u - h)?;
    Ok((plus - minus) / (2.0 * h))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    fn polar(x: &[f64], u: f64) -> Result<DVector<f64>, Infallible> {
        Ok(DVector::from_vec(vec![
            3.0 * x[0].cos() + u * u,
            3.0 * x[0].sin() * x[1],
        ]))
    }

    #[test]
    fn jacobian_of_polar_map() {
        let x = [0.4, 2.0];
        let jacobian = jacobian(|x| polar(x, 0.0), &x).unwrap();

        assert_eq!(jacobian.shape(), (2, 2));
        assert_relative_eq!(jacobian[(0, 0)], -3.0 * 0.4_f64.sin(), epsilon = 1e-8);
        assert_relative_eq!(jacobian[(0, 1)], 0.0, epsilon = 1e-8);
        assert_relative_eq!(jacobian[(1, 0)], 6.0 * 0.4_f64.cos(), epsilon = 1e-8);
        assert_relative_eq!(jacobian[(1, 1)], 3.0 * 0.4_f64.sin(), epsilon = 1e-8);
    }

    #[test]
    fn jacobian_without_variables() {
        let jacobian = jacobian(|_| polar(&[0.0, 0.0], 0.0), &[]).unwrap();
        assert_eq!(jacobian.shape(), (2, 0));
    }

    #[test]
    fn input_rate_scales_by_velocity() {
        let drive = Motion::new(1.5, 4.0, 0.0);
        let rate = input_rate(|u| polar(&[0.0, 1.0], u), &drive).unwrap();

        assert_relative_eq!(rate[0], 2.0 * 1.5 * 4.0, epsilon = 1e-7);
        assert_relative_eq!(rate[1], 0.0, epsilon = 1e-7);
    }

    #[test]
    fn second_rate_of_quadratic_input() {
        // F0 = u² → d²F0/dt² = 2 u̇² + 2 u ü.
        let drive = Motion::new(1.5, 2.0, 0.5);
        let accel = second_rate(polar, &[0.0, 1.0], &[0.0, 0.0], &drive).unwrap();

        assert_relative_eq!(accel[0], 2.0 * 4.0 + 2.0 * 1.5 * 0.5, epsilon = 1e-6);
        assert_relative_eq!(accel[1], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn second_rate_includes_cross_terms() {
        // F1 = 3 sin(x0) x1 → d²F1/dt² = -3 sin(x0) x1 ω0² + 6 cos(x0) ω0 ω1.
        let (x0, x1, w0, w1) = (0.7_f64, 2.0, 1.3, -0.6);
        let drive = Motion::at_rest(0.0);
        let accel = second_rate(polar, &[x0, x1], &[w0, w1], &drive).unwrap();

        let expected = -3.0 * x0.sin() * x1 * w0 * w0 + 6.0 * x0.cos() * w0 * w1;
        assert_relative_eq!(accel[1], expected, epsilon = 1e-6);
    }

    #[test]
    fn second_rate_at_rest_is_linear_part_only() {
        let drive = Motion::new(0.5, 0.0, 2.0);
        let accel = second_rate(polar, &[0.3, 1.0], &[0.0, 0.0], &drive).unwrap();

        assert_relative_eq!(accel[0], 2.0 * 0.5 * 2.0, epsilon = 1e-7);
    }
}
