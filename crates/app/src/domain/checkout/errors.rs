//! Checkout service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::ErrorKind;

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("User does not have a cart")]
    NotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("No products found in the cart")]
    EmptyCart,

    #[error("Address not set")]
    AddressNotSet,

    #[error("cart total exceeds the supported amount")]
    TotalOverflow,

    #[error("Insufficient balance: total {total} exceeds wallet balance {balance}")]
    InsufficientFunds { balance: u64, total: u64 },

    #[error("storage error")]
    Sql(#[source] Error),
}

impl CheckoutServiceError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound | Self::UserNotFound => ErrorKind::NotFound,
            Self::EmptyCart | Self::AddressNotSet | Self::TotalOverflow => ErrorKind::InvalidState,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::Sql(_) => ErrorKind::InternalError,
        }
    }
}

impl From<Error> for CheckoutServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
