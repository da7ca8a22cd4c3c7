//! Trolley Domain Concerns

pub(crate) mod amounts;
pub mod carts;
pub mod catalog;
pub mod checkout;
pub mod errors;
pub mod users;

pub use errors::ErrorKind;
