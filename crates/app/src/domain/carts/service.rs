//! Carts service.

use std::num::NonZeroU32;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartsConfig, MAX_QUANTITY, NewCart, NewCartItem},
            errors::CartsServiceError,
            records::{CartItemUuid, CartRecord, CartUuid, ProductSnapshot},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        catalog::{records::ProductUuid, repository::PgCatalogRepository},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    config: CartsConfig,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    catalog_repository: PgCatalogRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db, config: CartsConfig) -> Self {
        Self {
            db,
            config,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            catalog_repository: PgCatalogRepository::new(),
        }
    }

    /// Lock the owner's cart with its items loaded.
    async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut cart = self
            .carts_repository
            .lock_cart(tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        cart.items = self
            .items_repository
            .get_cart_items(tx, cart.uuid)
            .await?;

        Ok(cart)
    }

    /// Lock the owner's cart, creating it first when the owner has none.
    async fn lock_or_create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let created = self
            .carts_repository
            .create_cart_if_absent(
                tx,
                NewCart {
                    uuid: CartUuid::new(),
                    owner: user,
                    payment_option: self.config.default_payment_option.clone(),
                },
            )
            .await
            .map_err(CartsServiceError::CartCreation)?;

        if created {
            info!(user_uuid = %user, "created cart");
        }

        match self.lock_cart(tx, user).await {
            Err(CartsServiceError::NotFound) => Err(CartsServiceError::CartCreation(
                sqlx::Error::RowNotFound,
            )),
            result => result,
        }
    }

    /// Record a committed mutation on `cart`, keeping its loaded items.
    async fn touch_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartRecord,
    ) -> Result<CartRecord, CartsServiceError> {
        let touched = self.carts_repository.touch_cart(tx, cart.uuid).await?;

        Ok(CartRecord {
            items: cart.items,
            ..touched
        })
    }
}

fn ensure_storable(quantity: u32) -> Result<(), CartsServiceError> {
    if quantity > MAX_QUANTITY {
        return Err(CartsServiceError::QuantityOutOfRange(quantity));
    }

    Ok(())
}

#[async_trait]
impl CartsService for PgCartsService {
    #[tracing::instrument(
        name = "carts.service.get_cart",
        skip(self),
        fields(user_uuid = %user, cart_uuid = tracing::field::Empty),
        err
    )]
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut cart = self
            .carts_repository
            .get_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        Span::current().record("cart_uuid", tracing::field::display(cart.uuid));

        cart.items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.add_product",
        skip(self),
        fields(
            user_uuid = %user,
            product_uuid = %product,
            cart_uuid = tracing::field::Empty,
            item_count = tracing::field::Empty
        ),
        err
    )]
    async fn add_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: NonZeroU32,
    ) -> Result<CartRecord, CartsServiceError> {
        ensure_storable(quantity.get())?;

        let mut tx = self.db.begin_transaction().await?;

        let mut cart = self.lock_or_create_cart(&mut tx, user).await?;

        let span = Span::current();

        span.record("cart_uuid", tracing::field::display(cart.uuid));

        if cart.contains_product(product) {
            return Err(CartsServiceError::Conflict);
        }

        let record = self
            .catalog_repository
            .find_product(&mut tx, product)
            .await?
            .ok_or(CartsServiceError::InvalidReference)?;

        let item = self
            .items_repository
            .create_cart_item(
                &mut tx,
                NewCartItem {
                    uuid: CartItemUuid::new(),
                    cart: cart.uuid,
                    product: ProductSnapshot::from(&record),
                    quantity,
                },
            )
            .await?;

        cart.items.push(item);

        let cart = self.touch_cart(&mut tx, cart).await?;

        tx.commit().await?;

        span.record("item_count", cart.items.len());

        info!(cart_uuid = %cart.uuid, product_uuid = %product, "added product to cart");

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.update_product",
        skip(self),
        fields(
            user_uuid = %user,
            product_uuid = %product,
            cart_uuid = tracing::field::Empty,
            item_count = tracing::field::Empty
        ),
        err
    )]
    async fn update_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut cart = self.lock_cart(&mut tx, user).await?;

        let span = Span::current();

        span.record("cart_uuid", tracing::field::display(cart.uuid));

        self.catalog_repository
            .find_product(&mut tx, product)
            .await?
            .ok_or(CartsServiceError::InvalidReference)?;

        let position = cart
            .position_of(product)
            .ok_or(CartsServiceError::ProductNotInCart)?;

        ensure_storable(quantity)?;

        let item = cart.items.remove(position);

        if quantity == 0 {
            self.items_repository
                .delete_cart_item(&mut tx, cart.uuid, item.uuid)
                .await?;

            info!(cart_uuid = %cart.uuid, product_uuid = %product, "removed product from cart");
        } else {
            let updated = self
                .items_repository
                .update_cart_item_quantity(&mut tx, cart.uuid, item.uuid, quantity)
                .await?;

            cart.items.insert(position, updated);

            info!(
                cart_uuid = %cart.uuid,
                product_uuid = %product,
                quantity,
                "updated product quantity"
            );
        }

        let cart = self.touch_cart(&mut tx, cart).await?;

        tx.commit().await?;

        span.record("item_count", cart.items.len());

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.delete_product",
        skip(self),
        fields(
            user_uuid = %user,
            product_uuid = %product,
            cart_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn delete_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.lock_cart(&mut tx, user).await?;

        Span::current().record("cart_uuid", tracing::field::display(cart.uuid));

        let item = cart
            .find_item(product)
            .ok_or(CartsServiceError::ProductNotInCart)?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart.uuid, item.uuid)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::ProductNotInCart);
        }

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        info!(cart_uuid = %cart.uuid, product_uuid = %product, "deleted product from cart");

        Ok(())
    }
}

#[automock]
#[async_trait]
/// Per-user cart operations.
///
/// Every mutating call locks the user's cart row for the length of its
/// transaction, so concurrent calls for one user apply one after another.
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add a catalog product to the user's cart, creating the cart on first use.
    async fn add_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: NonZeroU32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Set the quantity of a product already in the cart; zero removes it.
    async fn update_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove a product from the cart.
    async fn delete_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError>;
}
