//! Catalog service.
//!
//! The admin write path for the product catalog. Booking logic never goes
//! through here; it only reads products via the store.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    domain::catalog::{
        errors::CatalogServiceError,
        models::{NewProduct, Product, ProductUuid, RewardSpec},
    },
    store::CatalogStore,
};

/// Catalog service backed by the storage boundary.
#[derive(Clone)]
pub struct RewardsCatalogService {
    catalog: Arc<dyn CatalogStore>,
}

impl RewardsCatalogService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }
}

impl std::fmt::Debug for RewardsCatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardsCatalogService").finish_non_exhaustive()
    }
}

#[async_trait]
impl CatalogService for RewardsCatalogService {
    async fn list_products(&self, active_only: bool) -> Result<Vec<Product>, CatalogServiceError> {
        let mut products = self.catalog.list_products().await?;

        if active_only {
            products.retain(|product| product.active);
        }

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError> {
        self.catalog
            .get_product(product)
            .await?
            .ok_or(CatalogServiceError::NotFound)
    }

    #[tracing::instrument(
        name = "catalog.service.create_product",
        skip(self, product),
        fields(product_uuid = %product.uuid),
        err
    )]
    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError> {
        validate_reward(&product.reward)?;

        let now = Timestamp::now();

        let record = Product {
            uuid: product.uuid,
            brand: product.brand,
            name: product.name,
            reward: product.reward,
            stock_quantity: product.stock_quantity,
            active: true,
            created_at: now,
            updated_at: now,
        };

        self.catalog.insert_product(record.clone()).await?;

        info!(product_uuid = %record.uuid, "created product");

        Ok(record)
    }

    async fn set_product_active(
        &self,
        product: ProductUuid,
        active: bool,
    ) -> Result<Product, CatalogServiceError> {
        let updated = self
            .catalog
            .set_product_active(product, active)
            .await?
            .ok_or(CatalogServiceError::NotFound)?;

        info!(product_uuid = %updated.uuid, active, "toggled product");

        Ok(updated)
    }
}

/// The percentage form is only meaningful between 1 and 8 percent; the
/// per-unit form cannot be invalid by construction.
fn validate_reward(reward: &RewardSpec) -> Result<(), CatalogServiceError> {
    match *reward {
        RewardSpec::PerUnit { .. } => Ok(()),
        RewardSpec::Percentage { percentage, .. } if (1..=8).contains(&percentage) => Ok(()),
        RewardSpec::Percentage { .. } => Err(CatalogServiceError::InvalidReward),
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves the catalog, optionally limited to active products.
    async fn list_products(&self, active_only: bool) -> Result<Vec<Product>, CatalogServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError>;

    /// Creates a product (active by default) after validating its reward.
    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError>;

    /// Enables or disables a product without deleting its history.
    async fn set_product_active(
        &self,
        product: ProductUuid,
        active: bool,
    ) -> Result<Product, CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn lens_product(reward: RewardSpec) -> NewProduct {
        NewProduct {
            uuid: ProductUuid::new(),
            brand: "CooperVision".to_string(),
            name: "Biofinity Toric".to_string(),
            reward,
            stock_quantity: 40,
        }
    }

    #[tokio::test]
    async fn created_product_is_active_and_retrievable() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .catalog
            .create_product(lens_product(RewardSpec::PerUnit { points: 500 }))
            .await?;

        assert!(created.active);

        let fetched = ctx.catalog.get_product(created.uuid).await?;
        assert_eq!(fetched.reward, RewardSpec::PerUnit { points: 500 });

        Ok(())
    }

    #[tokio::test]
    async fn percentage_out_of_range_is_rejected() {
        let ctx = TestContext::new().await;

        for percentage in [0, 9, 100] {
            let result = ctx
                .catalog
                .create_product(lens_product(RewardSpec::Percentage {
                    base_price: Decimal::from(2000),
                    percentage,
                }))
                .await;

            assert!(
                matches!(result, Err(CatalogServiceError::InvalidReward)),
                "expected InvalidReward for {percentage}%, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn boundary_percentages_are_accepted() -> TestResult {
        let ctx = TestContext::new().await;

        for percentage in [1, 8] {
            ctx.catalog
                .create_product(lens_product(RewardSpec::Percentage {
                    base_price: Decimal::from(2000),
                    percentage,
                }))
                .await?;
        }

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let product = lens_product(RewardSpec::PerUnit { points: 100 });

        ctx.catalog.create_product(product.clone()).await?;

        let result = ctx.catalog.create_product(product).await;

        assert!(
            matches!(result, Err(CatalogServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deactivated_products_drop_out_of_the_active_list() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .catalog
            .create_product(lens_product(RewardSpec::PerUnit { points: 100 }))
            .await?;

        ctx.catalog.set_product_active(created.uuid, false).await?;

        let active = ctx.catalog.list_products(true).await?;
        assert!(!active.iter().any(|product| product.uuid == created.uuid));

        let all = ctx.catalog.list_products(false).await?;
        assert!(all.iter().any(|product| product.uuid == created.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
