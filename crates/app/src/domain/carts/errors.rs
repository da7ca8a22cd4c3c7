//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind as DbErrorKind},
};
use thiserror::Error;

use crate::domain::ErrorKind;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("User does not have a cart")]
    NotFound,

    #[error("Product already in cart. Use the cart sidebar to update or remove product from cart")]
    Conflict,

    #[error("Product doesn't exist in database")]
    InvalidReference,

    #[error("Product not in cart")]
    ProductNotInCart,

    #[error("quantity {0} is too large")]
    QuantityOutOfRange(u32),

    #[error("invalid cart data")]
    InvalidData,

    #[error("failed to create cart")]
    CartCreation(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl CartsServiceError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::Conflict => ErrorKind::Conflict,
            Self::InvalidReference => ErrorKind::InvalidReference,
            Self::ProductNotInCart | Self::QuantityOutOfRange(_) | Self::InvalidData => {
                ErrorKind::InvalidState
            }
            Self::CartCreation(_) | Self::Sql(_) => ErrorKind::InternalError,
        }
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(DbErrorKind::UniqueViolation) => Self::Conflict,
            Some(DbErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(DbErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
