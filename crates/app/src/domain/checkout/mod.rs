//! Checkout

pub mod data;
pub mod errors;
pub mod service;

pub use data::{CheckoutConfig, CheckoutReceipt};
pub use errors::CheckoutServiceError;
pub use service::*;
