//! User Records

use jiff::Timestamp;
use serde::Serialize;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Address stored for users who have not configured shipping details.
pub const DEFAULT_ADDRESS: &str = "ADDRESS_NOT_SET";

/// The slice of a user account the cart and checkout services rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub email: String,
    pub name: String,

    /// Wallet balance in minor currency units.
    pub wallet_money: u64,

    pub address: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserRecord {
    /// Whether the user has replaced the default shipping address with a
    /// real one.
    #[must_use]
    pub fn has_non_default_address(&self, default_address: &str) -> bool {
        let address = self.address.trim();

        !address.is_empty() && address != default_address.trim()
    }
}
