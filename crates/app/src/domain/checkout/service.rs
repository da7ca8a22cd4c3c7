//! Checkout service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            records::CartRecord,
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        checkout::{
            data::{CheckoutConfig, CheckoutReceipt},
            errors::CheckoutServiceError,
        },
        users::{
            records::{UserRecord, UserUuid},
            repository::PgUsersRepository,
        },
    },
};

/// Run every checkout precondition against a locked cart and user, in order,
/// returning the amount to debit.
///
/// Pure: nothing is written until all of these pass.
pub fn checkout_total(
    cart: &CartRecord,
    user: &UserRecord,
    default_address: &str,
) -> Result<u64, CheckoutServiceError> {
    if cart.is_empty() {
        return Err(CheckoutServiceError::EmptyCart);
    }

    if !user.has_non_default_address(default_address) {
        return Err(CheckoutServiceError::AddressNotSet);
    }

    let total = cart.total().ok_or(CheckoutServiceError::TotalOverflow)?;

    if user.wallet_money < total {
        return Err(CheckoutServiceError::InsufficientFunds {
            balance: user.wallet_money,
            total,
        });
    }

    Ok(total)
}

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    config: CheckoutConfig,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    users_repository: PgUsersRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db, config: CheckoutConfig) -> Self {
        Self {
            db,
            config,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            users_repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self),
        fields(
            user_uuid = %user,
            cart_uuid = tracing::field::Empty,
            item_count = tracing::field::Empty,
            total = tracing::field::Empty
        ),
        err
    )]
    async fn checkout(&self, user: UserUuid) -> Result<CheckoutReceipt, CheckoutServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        // Cart first, then user: the only lock order used anywhere.
        let mut cart = self
            .carts_repository
            .lock_cart(&mut tx, user)
            .await?
            .ok_or(CheckoutServiceError::NotFound)?;

        let span = Span::current();

        span.record("cart_uuid", tracing::field::display(cart.uuid));

        cart.items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        let item_count = cart.items.len();

        span.record("item_count", item_count);

        let account = self
            .users_repository
            .lock_user(&mut tx, user)
            .await?
            .ok_or(CheckoutServiceError::UserNotFound)?;

        let total = checkout_total(&cart, &account, &self.config.default_address)?;

        span.record("total", total);

        let wallet_money = self
            .users_repository
            .debit_wallet(&mut tx, user, total)
            .await?
            .ok_or(CheckoutServiceError::InsufficientFunds {
                balance: account.wallet_money,
                total,
            })?;

        self.items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        let cart = self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        info!(cart_uuid = %cart.uuid, total, wallet_money, "checked out cart");

        Ok(CheckoutReceipt {
            cart,
            total,
            item_count,
            wallet_money,
        })
    }
}

#[automock]
#[async_trait]
/// Converts a user's cart into a wallet debit.
pub trait CheckoutService: Send + Sync {
    /// Debit the cart total from the user's wallet and empty the cart, as one
    /// transaction.
    async fn checkout(&self, user: UserUuid) -> Result<CheckoutReceipt, CheckoutServiceError>;
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::{
        domain::{
            ErrorKind,
            carts::{
                CartsService,
                records::{CartItemRecord, CartItemUuid, CartUuid, ProductSnapshot},
            },
            catalog::records::ProductUuid,
            users::{UsersService, records::DEFAULT_ADDRESS},
        },
        test::{
            TestContext,
            helpers::{create_product, create_user, quantity},
        },
    };

    use super::*;

    const SHIPPING_ADDRESS: &str = "12 Market Street, Bengaluru";

    fn user(wallet_money: u64, address: &str) -> UserRecord {
        let now = Timestamp::now();

        UserRecord {
            uuid: UserUuid::new(),
            email: "crio-user@example.com".to_string(),
            name: "crio-user".to_string(),
            wallet_money,
            address: address.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn cart(lines: &[(u64, u32)]) -> CartRecord {
        let now = Timestamp::now();

        CartRecord {
            uuid: CartUuid::new(),
            owner: UserUuid::new(),
            payment_option: "PAYMENT_OPTION_DEFAULT".to_string(),
            version: 0,
            items: lines
                .iter()
                .map(|&(cost, quantity)| CartItemRecord {
                    uuid: CartItemUuid::new(),
                    product: ProductSnapshot {
                        uuid: ProductUuid::new(),
                        name: "product".to_string(),
                        category: "Fashion".to_string(),
                        cost,
                    },
                    quantity,
                    created_at: now,
                    updated_at: now,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_cart_is_checked_before_address() {
        let result = checkout_total(&cart(&[]), &user(500, DEFAULT_ADDRESS), DEFAULT_ADDRESS);

        assert!(
            matches!(result, Err(CheckoutServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[test]
    fn default_address_blocks_checkout() {
        let result = checkout_total(
            &cart(&[(100, 1)]),
            &user(500, DEFAULT_ADDRESS),
            DEFAULT_ADDRESS,
        );

        assert!(
            matches!(result, Err(CheckoutServiceError::AddressNotSet)),
            "expected AddressNotSet, got {result:?}"
        );
    }

    #[test]
    fn total_within_balance_is_returned() -> TestResult {
        let total = checkout_total(
            &cart(&[(100, 1), (250, 1)]),
            &user(500, SHIPPING_ADDRESS),
            DEFAULT_ADDRESS,
        )?;

        assert_eq!(total, 350);

        Ok(())
    }

    #[test]
    fn balance_equal_to_total_is_enough() -> TestResult {
        let total = checkout_total(
            &cart(&[(100, 1), (250, 1)]),
            &user(350, SHIPPING_ADDRESS),
            DEFAULT_ADDRESS,
        )?;

        assert_eq!(total, 350);

        Ok(())
    }

    #[test]
    fn quantity_counts_towards_total() {
        let result = checkout_total(
            &cart(&[(100, 3), (250, 1)]),
            &user(500, SHIPPING_ADDRESS),
            DEFAULT_ADDRESS,
        );

        assert!(
            matches!(
                result,
                Err(CheckoutServiceError::InsufficientFunds {
                    balance: 500,
                    total: 550
                })
            ),
            "expected InsufficientFunds, got {result:?}"
        );
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let result = checkout_total(
            &cart(&[(u64::MAX, 1), (1, 1)]),
            &user(u64::MAX, SHIPPING_ADDRESS),
            DEFAULT_ADDRESS,
        );

        assert!(
            matches!(result, Err(CheckoutServiceError::TotalOverflow)),
            "expected TotalOverflow, got {result:?}"
        );
    }

    async fn cart_with_two_items(
        ctx: &TestContext,
        wallet_money: u64,
        address: &str,
    ) -> Result<UserUuid, Box<dyn std::error::Error>> {
        let user = create_user(ctx, wallet_money, address).await?;
        let first = create_product(ctx, "Atomic Habits", 100).await?;
        let second = create_product(ctx, "YONEX Mavis 350 Nylon Shuttle", 250).await?;

        ctx.carts.add_product(user, first.uuid, quantity(1)).await?;
        ctx.carts.add_product(user, second.uuid, quantity(1)).await?;

        Ok(user)
    }

    #[tokio::test]
    async fn checkout_debits_wallet_and_empties_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = cart_with_two_items(&ctx, 500, SHIPPING_ADDRESS).await?;

        let receipt = ctx.checkout.checkout(user).await?;

        assert_eq!(receipt.total, 350);
        assert_eq!(receipt.item_count, 2);
        assert_eq!(receipt.wallet_money, 150);
        assert!(receipt.cart.is_empty());

        let cart = ctx.carts.get_cart(user).await?;

        assert!(cart.is_empty(), "cart should persist with no items");
        assert_eq!(cart.uuid, receipt.cart.uuid);
        assert_eq!(ctx.users.get_user(user).await?.wallet_money, 150);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_uses_quantity_in_total() -> TestResult {
        let ctx = TestContext::new().await;
        let user = cart_with_two_items(&ctx, 1_000, SHIPPING_ADDRESS).await?;

        let cart = ctx.carts.get_cart(user).await?;
        let first = cart.items.first().map(|item| item.product.uuid);

        if let Some(product) = first {
            ctx.carts.update_product(user, product, 3).await?;
        }

        let receipt = ctx.checkout.checkout(user).await?;

        assert_eq!(receipt.total, 550);
        assert_eq!(receipt.wallet_money, 450);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_with_insufficient_balance_changes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let user = cart_with_two_items(&ctx, 300, SHIPPING_ADDRESS).await?;

        let result = ctx.checkout.checkout(user).await;

        assert!(
            matches!(
                result,
                Err(CheckoutServiceError::InsufficientFunds {
                    balance: 300,
                    total: 350
                })
            ),
            "expected InsufficientFunds, got {result:?}"
        );

        assert_eq!(ctx.users.get_user(user).await?.wallet_money, 300);
        assert_eq!(ctx.carts.get_cart(user).await?.items.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_with_default_address_changes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let user = cart_with_two_items(&ctx, 500, DEFAULT_ADDRESS).await?;

        let result = ctx.checkout.checkout(user).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::AddressNotSet)),
            "expected AddressNotSet, got {result:?}"
        );

        assert_eq!(ctx.users.get_user(user).await?.wallet_money, 500);
        assert_eq!(ctx.carts.get_cart(user).await?.items.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_of_empty_cart_is_invalid_state() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, 500, SHIPPING_ADDRESS).await?;
        let product = create_product(&ctx, "Atomic Habits", 100).await?;

        ctx.carts
            .add_product(user, product.uuid, quantity(1))
            .await?;
        ctx.carts.delete_product(user, product.uuid).await?;

        let result = ctx.checkout.checkout(user).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
        assert_eq!(
            result.map(|_| ()).map_err(|error| error.kind()),
            Err(ErrorKind::InvalidState)
        );
        assert_eq!(ctx.users.get_user(user).await?.wallet_money, 500);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_without_cart_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, 500, SHIPPING_ADDRESS).await?;

        let result = ctx.checkout.checkout(user).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_honours_configured_default_address() -> TestResult {
        let ctx = TestContext::new().await;
        let user = cart_with_two_items(&ctx, 500, "PENDING").await?;

        let checkout = PgCheckoutService::new(
            ctx.app_db(),
            CheckoutConfig {
                default_address: "PENDING".to_string(),
            },
        );

        let result = checkout.checkout(user).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::AddressNotSet)),
            "expected AddressNotSet, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_checkouts_debit_once() -> TestResult {
        let ctx = TestContext::new().await;
        let user = cart_with_two_items(&ctx, 1_000, SHIPPING_ADDRESS).await?;

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let checkout = ctx.checkout.clone();

                tokio::spawn(async move { checkout.checkout(user).await })
            })
            .collect();

        let mut succeeded = 0;

        for handle in handles {
            match handle.await? {
                Ok(_) => succeeded += 1,
                Err(CheckoutServiceError::EmptyCart) => {}
                Err(other) => return Err(other.into()),
            }
        }

        assert_eq!(succeeded, 1);
        assert_eq!(ctx.users.get_user(user).await?.wallet_money, 650);

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn add_racing_checkout_is_never_lost_or_double_charged() -> TestResult {
        let ctx = TestContext::new().await;
        let user = cart_with_two_items(&ctx, 1_000, SHIPPING_ADDRESS).await?;
        let late = create_product(&ctx, "Tan Leatherette Weekender Duffle", 150).await?;

        let carts = ctx.carts.clone();
        let checkout = ctx.checkout.clone();

        let (added, checked_out) = tokio::join!(
            tokio::spawn(async move {
                carts
                    .add_product(user, late.uuid, NonZeroU32::MIN)
                    .await
            }),
            tokio::spawn(async move { checkout.checkout(user).await }),
        );

        let _cart = added??;
        let receipt = checked_out??;

        let cart = ctx.carts.get_cart(user).await?;
        let wallet_money = ctx.users.get_user(user).await?.wallet_money;

        // Either the add landed first and was paid for, or it landed after
        // the cart was emptied and is still waiting in the cart.
        if receipt.item_count == 3 {
            assert_eq!(receipt.total, 500);
            assert!(cart.is_empty());
            assert_eq!(wallet_money, 500);
        } else {
            assert_eq!(receipt.total, 350);
            assert_eq!(cart.items.len(), 1);
            assert_eq!(wallet_money, 650);
        }

        Ok(())
    }
}
