use thiserror::Error;

/// Configuration for the velocity and acceleration solves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    singular_tol: f64,
}

/// Errors that can occur when validating a rate solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("singular_tol must be finite and in [0, 1)")]
    SingularTol,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            singular_tol: 1e-12,
        }
    }
}

impl Config {
    /// Creates a new config.
    ///
    /// # Errors
    ///
    /// Returns an error if `singular_tol` is negative, non-finite, or not
    /// below one.
    pub fn new(singular_tol: f64) -> Result<Self, ConfigError> {
        if !singular_tol.is_finite() || !(0.0..1.0).contains(&singular_tol) {
            return Err(ConfigError::SingularTol);
        }
        Ok(Self { singular_tol })
    }

    /// Returns the reciprocal condition number below which the Jacobian is
    /// treated as singular.
    #[must_use]
    pub fn singular_tol(&self) -> f64 {
        self.singular_tol
    }
}
