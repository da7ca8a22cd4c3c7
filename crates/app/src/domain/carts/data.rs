//! Cart Data

use std::num::NonZeroU32;

use crate::domain::{
    carts::records::{CartItemUuid, CartUuid, ProductSnapshot},
    users::records::UserUuid,
};

/// Payment option recorded on carts created without an explicit one.
pub const DEFAULT_PAYMENT_OPTION: &str = "PAYMENT_OPTION_DEFAULT";

/// Largest quantity a cart item can hold.
pub const MAX_QUANTITY: u32 = i32::MAX.unsigned_abs();

/// Cart service settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartsConfig {
    /// Payment option stamped on lazily created carts.
    pub default_payment_option: String,
}

impl Default for CartsConfig {
    fn default() -> Self {
        Self {
            default_payment_option: DEFAULT_PAYMENT_OPTION.to_string(),
        }
    }
}

/// New Cart Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCart {
    pub uuid: CartUuid,
    pub owner: UserUuid,
    pub payment_option: String,
}

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub cart: CartUuid,
    pub product: ProductSnapshot,
    pub quantity: NonZeroU32,
}
