//! Catalog service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::ErrorKind;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("storage error")]
    Sql(#[source] Error),
}

impl CatalogServiceError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Sql(_) => ErrorKind::InternalError,
        }
    }
}

impl From<Error> for CatalogServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
