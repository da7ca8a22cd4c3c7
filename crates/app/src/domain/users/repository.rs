//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use tracing::debug;

use crate::domain::{
    amounts::{try_get_amount, try_into_column},
    users::records::{UserRecord, UserUuid},
};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const LOCK_USER_SQL: &str = include_str!("sql/lock_user.sql");
const DEBIT_WALLET_SQL: &str = include_str!("sql/debit_wallet.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Read the user row and hold its lock until the transaction ends.
    pub(crate) async fn lock_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LOCK_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Subtract `amount` from the wallet, returning the new balance, or
    /// `None` when the balance does not cover it.
    pub(crate) async fn debit_wallet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        amount: u64,
    ) -> Result<Option<u64>, sqlx::Error> {
        let amount_i64 = try_into_column(amount, "wallet_money")?;

        let balance: Option<i64> = query_scalar(DEBIT_WALLET_SQL)
            .bind(user.into_uuid())
            .bind(amount_i64)
            .fetch_optional(&mut **tx)
            .await?;

        debug!(user_uuid = %user, amount, debited = balance.is_some(), "debit wallet");

        balance
            .map(|balance| {
                u64::try_from(balance).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "wallet_money".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            wallet_money: try_get_amount(row, "wallet_money")?,
            address: row.try_get("address")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
