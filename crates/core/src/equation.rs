use std::{convert::Infallible, marker::PhantomData};

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

use crate::{Motion, finite_difference};

/// Defines the loop-closure equations of a linkage.
///
/// The residual is the vector-sum error of every closed loop, two components
/// per loop, as a function of the unknown angles and the driving-input angle.
/// Systems are square: the residual has one entry per unknown angle.
///
/// Only [`residuals`](LoopEquation::residuals) is required. The derivative
/// methods default to finite differences of the residual and assume the
/// residual has no explicit time dependence beyond the driving input.
/// Implementations with time-varying geometry, or with cheap analytic
/// derivatives, override them.
pub trait LoopEquation {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the number of unknown angles.
    fn unknowns(&self) -> usize;

    /// Evaluates the loop residual at a sample.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residual cannot be evaluated.
    fn residuals(
        &self,
        sample: usize,
        angles: &[f64],
        input: f64,
    ) -> Result<DVector<f64>, Self::Error>;

    /// Returns the Jacobian of the residual with respect to the unknowns.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residual cannot be evaluated.
    fn jacobian(
        &self,
        sample: usize,
        angles: &[f64],
        input: f64,
    ) -> Result<DMatrix<f64>, Self::Error> {
        finite_difference::jacobian(|x| self.residuals(sample, x, input), angles)
    }

    /// Returns the residual rate produced by known motion alone.
    ///
    /// This is `dF/dt` with the unknown angular velocities held at zero, so the
    /// velocity system is `J ω = -velocity_terms`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residual cannot be evaluated.
    fn velocity_terms(
        &self,
        sample: usize,
        angles: &[f64],
        drive: &Motion,
    ) -> Result<DVector<f64>, Self::Error> {
        finite_difference::input_rate(|u| self.residuals(sample, angles, u), drive)
    }

    /// Returns the second residual rate with unknown accelerations held at zero.
    ///
    /// The acceleration system is `J α = -acceleration_terms`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residual cannot be evaluated.
    fn acceleration_terms(
        &self,
        sample: usize,
        angles: &[f64],
        velocities: &[f64],
        drive: &Motion,
    ) -> Result<DVector<f64>, Self::Error> {
        finite_difference::second_rate(
            |x, u| self.residuals(sample, x, u),
            angles,
            velocities,
            drive,
        )
    }
}

/// Errors returned by a [`LoopFn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoopFnError {
    #[error("loop function returned {found} residuals, expected {expected}")]
    Dimension { expected: usize, found: usize },
}

/// Adapts a pure closure `(angles, input) -> residual` to [`LoopEquation`].
///
/// The closure may return any slice-like residual, such as `[f64; 2]` for a
/// single loop or a `Vec<f64>` for several. It must not depend on the sample
/// index; links with prescribed varying lengths need their own
/// [`LoopEquation`] implementation.
///
/// # Example
///
/// ```
/// use linkage_core::{LoopEquation, LoopFn};
///
/// // Unit crank plus a link of length 2 must reach the point (2, 0).
/// let equation = LoopFn::new(1, |x: &[f64], input: f64| {
///     [input.cos() + 2.0 * x[0].cos() - 2.0, input.sin() + 2.0 * x[0].sin()]
/// });
/// assert_eq!(equation.unknowns(), 1);
/// ```
pub struct LoopFn<F, R> {
    unknowns: usize,
    f: F,
    _residual: PhantomData<fn() -> R>,
}

impl<F, R> LoopFn<F, R>
where
    F: Fn(&[f64], f64) -> R,
    R: AsRef<[f64]>,
{
    /// Wraps a closure over `unknowns` unknown angles.
    pub fn new(unknowns: usize, f: F) -> Self {
        Self {
            unknowns,
            f,
            _residual: PhantomData,
        }
    }
}

impl<F, R> LoopEquation for LoopFn<F, R>
where
    F: Fn(&[f64], f64) -> R,
    R: AsRef<[f64]>,
{
    type Error = LoopFnError;

    fn unknowns(&self) -> usize {
        self.unknowns
    }

    fn residuals(
        &self,
        _sample: usize,
        angles: &[f64],
        input: f64,
    ) -> Result<DVector<f64>, Self::Error> {
        let residual = (self.f)(angles, input);
        let residual = residual.as_ref();
        if residual.len() != self.unknowns {
            return Err(LoopFnError::Dimension {
                expected: self.unknowns,
                found: residual.len(),
            });
        }
        Ok(DVector::from_column_slice(residual))
    }
}

/// A loop equation with no unknowns and an identically zero residual.
///
/// Useful for a driven link on its own, where every joint position follows
/// from the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLoop;

impl LoopEquation for NoLoop {
    type Error = Infallible;

    fn unknowns(&self) -> usize {
        0
    }

    fn residuals(&self, _: usize, _: &[f64], _: f64) -> Result<DVector<f64>, Self::Error> {
        Ok(DVector::zeros(0))
    }
}
