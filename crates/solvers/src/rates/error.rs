use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur while solving for angular rates.
#[derive(Debug, Error)]
pub enum Error {
    /// The Jacobian is singular, so the rates are not unique.
    #[error("singular jacobian (reciprocal condition {rcond:e})")]
    Singular { rcond: f64 },

    #[error("non-finite {what}")]
    NonFinite { what: &'static str },

    #[error("{what} has {found} entries, expected {expected}")]
    Dimension {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("loop equation failed")]
    Equation(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn equation<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Equation(Box::new(err))
    }
}
