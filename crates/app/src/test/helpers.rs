//! Test Helpers

use std::num::NonZeroU32;

use sqlx::{query, query_as};

use crate::{
    domain::{
        amounts::try_into_column,
        catalog::records::{ProductRecord, ProductUuid},
        users::records::UserUuid,
    },
    test::TestContext,
};

/// Seed a user with the given wallet balance and shipping address.
pub(crate) async fn create_user(
    ctx: &TestContext,
    wallet_money: u64,
    address: &str,
) -> Result<UserUuid, sqlx::Error> {
    let uuid = UserUuid::new();
    let name = format!("user_{}", uuid.into_uuid().simple());

    query(
        "INSERT INTO users (uuid, email, name, wallet_money, address) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(uuid.into_uuid())
    .bind(format!("{name}@example.com"))
    .bind(&name)
    .bind(try_into_column(wallet_money, "wallet_money")?)
    .bind(address)
    .execute(ctx.db.pool())
    .await?;

    Ok(uuid)
}

/// Seed a catalog product.
pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    cost: u64,
) -> Result<ProductRecord, sqlx::Error> {
    query_as::<_, ProductRecord>(
        "INSERT INTO products (uuid, name, category, cost, rating, image) \
         VALUES ($1, $2, 'Fashion', $3, 4, 'https://example.com/product.png') \
         RETURNING uuid, name, category, cost, rating, image, created_at, updated_at",
    )
    .bind(ProductUuid::new().into_uuid())
    .bind(name)
    .bind(try_into_column(cost, "cost")?)
    .fetch_one(ctx.db.pool())
    .await
}

/// Change a product's catalog cost after it has been added to carts.
pub(crate) async fn set_product_cost(
    ctx: &TestContext,
    product: ProductUuid,
    cost: u64,
) -> Result<(), sqlx::Error> {
    query("UPDATE products SET cost = $2, updated_at = now() WHERE uuid = $1")
        .bind(product.into_uuid())
        .bind(try_into_column(cost, "cost")?)
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

pub(crate) fn quantity(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).expect("test quantities are non-zero")
}
