use thiserror::Error;

/// Configuration for the Newton position solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    residual_tol: f64,
    singular_tol: f64,
}

/// Errors that can occur when validating a Newton solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("residual_tol must be finite and non-negative")]
    ResidualTol,

    #[error("singular_tol must be finite and in [0, 1)")]
    SingularTol,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            residual_tol: 1e-10,
            singular_tol: 1e-12,
        }
    }
}

impl Config {
    /// Creates a new config with validated tolerances.
    ///
    /// `singular_tol` bounds the reciprocal condition number of the Jacobian:
    /// below it, a Newton step is refused.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or non-finite, or if
    /// `singular_tol` is not below one.
    pub fn new(
        max_iters: usize,
        residual_tol: f64,
        singular_tol: f64,
    ) -> Result<Self, ConfigError> {
        if !residual_tol.is_finite() || residual_tol < 0.0 {
            return Err(ConfigError::ResidualTol);
        }
        if !singular_tol.is_finite() || !(0.0..1.0).contains(&singular_tol) {
            return Err(ConfigError::SingularTol);
        }

        Ok(Self {
            max_iters,
            residual_tol,
            singular_tol,
        })
    }

    /// Returns the maximum number of Newton steps.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the residual norm below which the solve has converged.
    #[must_use]
    pub fn residual_tol(&self) -> f64 {
        self.residual_tol
    }

    /// Returns the reciprocal condition number below which the Jacobian is
    /// treated as singular.
    #[must_use]
    pub fn singular_tol(&self) -> f64 {
        self.singular_tol
    }
}
