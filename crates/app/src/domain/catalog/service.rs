//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    #[tracing::instrument(
        name = "catalog.service.find_product",
        skip(self),
        fields(product_uuid = %product),
        err
    )]
    async fn find_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.repository.find_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[automock]
#[async_trait]
/// Read-only product lookup.
pub trait CatalogService: Send + Sync {
    /// Resolve a product by UUID; `None` when the catalog has no such product.
    async fn find_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, CatalogServiceError>;
}
