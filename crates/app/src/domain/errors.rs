//! Error kinds shared by the domain services.

use serde::Serialize;

/// Machine-checkable classification of a service failure.
///
/// Every service error maps onto exactly one kind; an outer layer translates
/// kinds into transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The user has no cart (or the referenced record does not exist).
    NotFound,

    /// The product is already present in the cart.
    Conflict,

    /// The product does not resolve in the catalog.
    InvalidReference,

    /// The operation violates a cart or checkout precondition.
    InvalidState,

    /// The wallet balance does not cover the cart total.
    InsufficientFunds,

    /// The underlying store failed.
    InternalError,
}

impl ErrorKind {
    /// Returns `true` when the failure was caused by the caller's request
    /// rather than by the store.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        !matches!(self, Self::InternalError)
    }
}
