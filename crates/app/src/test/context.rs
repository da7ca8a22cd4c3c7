//! Test context for service-level integration tests.

use crate::{
    database::Db,
    domain::{
        carts::{CartsConfig, PgCartsService},
        catalog::PgCatalogService,
        checkout::{CheckoutConfig, PgCheckoutService},
        users::PgUsersService,
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub catalog: PgCatalogService,
    pub users: PgUsersService,
    pub carts: PgCartsService,
    pub checkout: PgCheckoutService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            catalog: PgCatalogService::new(db.clone()),
            users: PgUsersService::new(db.clone()),
            carts: PgCartsService::new(db.clone(), CartsConfig::default()),
            checkout: PgCheckoutService::new(db, CheckoutConfig::default()),
            db: test_db,
        }
    }

    /// A fresh handle on the test database, for services built with
    /// non-default configuration.
    pub fn app_db(&self) -> Db {
        Db::new(self.db.pool().clone())
    }
}
