//! Catalog Records

use jiff::Timestamp;
use serde::Serialize;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub category: String,

    /// Unit cost in minor currency units.
    pub cost: u64,

    pub rating: u8,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
