use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur during a Newton position solve.
#[derive(Debug, Error)]
pub enum Error {
    /// The residual stayed above tolerance for every allowed iteration.
    #[error("no convergence after {iters} iterations (residual norm {residual_norm:e})")]
    NotConverged {
        iters: usize,
        residual_norm: f64,
        angles: Vec<f64>,
    },

    /// The Jacobian lost rank, typically at a toggle configuration.
    #[error("singular jacobian at iteration {iter} (reciprocal condition {rcond:e})")]
    SingularJacobian {
        iter: usize,
        rcond: f64,
        angles: Vec<f64>,
    },

    #[error("non-finite residual at iteration {iter}")]
    NonFiniteResidual { iter: usize, angles: Vec<f64> },

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

    /// Returns the last iterate, when the failure happened mid-solve.
    #[must_use]
    pub fn angles(&self) -> Option<&[f64]> {
        match self {
            Self::NotConverged { angles, .. }
            | Self::SingularJacobian { angles, .. }
            | Self::NonFiniteResidual { angles, .. } => Some(angles),
            Self::Dimension { .. } | Self::Equation(_) => None,
        }
    }
}
