use std::error::Error as StdError;

use linkage_core::DomainError;
use thiserror::Error;

/// Errors from querying a mechanism's results.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("loop equation failed")]
    Equation(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn equation<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Equation(Box::new(err))
    }
}
