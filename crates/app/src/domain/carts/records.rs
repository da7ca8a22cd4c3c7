//! Cart Records

use jiff::Timestamp;
use serde::Serialize;

use crate::{
    domain::{
        catalog::records::{ProductRecord, ProductUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
///
/// One per user. `version` increases by one with every committed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub owner: UserUuid,
    pub payment_option: String,
    pub version: i64,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the item holding `product`, if any.
    #[must_use]
    pub fn position_of(&self, product: ProductUuid) -> Option<usize> {
        self.items.iter().position(|item| item.product.uuid == product)
    }

    #[must_use]
    pub fn find_item(&self, product: ProductUuid) -> Option<&CartItemRecord> {
        self.items.iter().find(|item| item.product.uuid == product)
    }

    #[must_use]
    pub fn contains_product(&self, product: ProductUuid) -> bool {
        self.position_of(product).is_some()
    }

    /// Sum of every line total, or `None` on overflow.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.items
            .iter()
            .try_fold(0_u64, |total, item| total.checked_add(item.line_total()?))
    }
}

/// Product fields copied into a cart item when it is added.
///
/// Later catalog changes do not reach items already in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSnapshot {
    pub uuid: ProductUuid,
    pub name: String,
    pub category: String,
    pub cost: u64,
}

impl From<&ProductRecord> for ProductSnapshot {
    fn from(product: &ProductRecord) -> Self {
        Self {
            uuid: product.uuid,
            name: product.name.clone(),
            category: product.category.clone(),
            cost: product.cost,
        }
    }
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// CartItem Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub product: ProductSnapshot,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItemRecord {
    /// Snapshot cost times quantity, or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<u64> {
        self.product.cost.checked_mul(u64::from(self.quantity))
    }
}
