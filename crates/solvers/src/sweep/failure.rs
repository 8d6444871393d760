use thiserror::Error;

use crate::{position::newton, rates};

/// The stage at which a sample failed, with the stage's error.
#[derive(Debug, Error)]
pub enum Failure {
    #[error("position solve failed")]
    Position(#[source] newton::Error),

    #[error("velocity solve failed")]
    Velocity(#[source] rates::Error),

    #[error("acceleration solve failed")]
    Acceleration(#[source] rates::Error),
}

/// Broad classification of a sample failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The position solve found no closing configuration.
    ///
    /// This includes a singular Jacobian hit mid-iteration, which usually
    /// means the input swept through a toggle point.
    Convergence,

    /// The velocity or acceleration system is singular.
    SingularSystem,

    /// The loop equation failed or returned malformed values.
    Equation,
}

impl Failure {
    /// Classifies the failure.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Position(
                newton::Error::NotConverged { .. }
                | newton::Error::SingularJacobian { .. }
                | newton::Error::NonFiniteResidual { .. },
            ) => FailureKind::Convergence,
            Self::Velocity(rates::Error::Singular { .. })
            | Self::Acceleration(rates::Error::Singular { .. }) => FailureKind::SingularSystem,
            Self::Position(_) | Self::Velocity(_) | Self::Acceleration(_) => FailureKind::Equation,
        }
    }
}
