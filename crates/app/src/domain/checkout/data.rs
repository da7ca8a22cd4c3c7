//! Checkout Data

use serde::Serialize;

use crate::domain::{carts::records::CartRecord, users::records::DEFAULT_ADDRESS};

/// Checkout service settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Address value meaning "shipping details not configured yet".
    pub default_address: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            default_address: DEFAULT_ADDRESS.to_string(),
        }
    }
}

/// Outcome of a committed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    /// The cart after checkout, with no items.
    pub cart: CartRecord,

    /// Amount debited from the wallet.
    pub total: u64,

    /// Number of cart items that were checked out.
    pub item_count: usize,

    /// Wallet balance after the debit.
    pub wallet_money: u64,
}
