//! Test context for service-level tests.
//!
//! All services share one in-memory store, so a test sees exactly the
//! cross-service behavior a deployment would: a booking approved through
//! the bookings service is immediately visible to the ledger.

use std::sync::Arc;

use jiff::Timestamp;

use crate::{
    config::RewardsConfig,
    domain::{
        bookings::RewardsBookingsService,
        catalog::{
            RewardsCatalogService,
            models::{Product, ProductUuid, RewardSpec},
        },
        ledger::RewardsLedgerService,
        partners::models::{Partner, PartnerRole, PartnerUuid},
        withdrawals::RewardsWithdrawalsService,
    },
    notify::LogNotifier,
    store::{CatalogStore, PartnersStore, memory::MemoryStore},
};

pub(crate) struct TestContext {
    pub store: Arc<MemoryStore>,
    pub config: RewardsConfig,
    pub partner_uuid: PartnerUuid,
    pub catalog: RewardsCatalogService,
    pub bookings: RewardsBookingsService,
    pub withdrawals: RewardsWithdrawalsService,
    pub ledger: RewardsLedgerService,
}

impl TestContext {
    pub(crate) const PARTNER_NAME: &'static str = "Dr. Asha Rao";
    pub(crate) const PRODUCT_NAME: &'static str = "Biofinity Toric";

    pub(crate) async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let config = RewardsConfig::default();
        let notifier = Arc::new(LogNotifier);

        let catalog = RewardsCatalogService::new(store.clone());
        let bookings = RewardsBookingsService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            notifier.clone(),
        );
        let withdrawals = RewardsWithdrawalsService::new(
            store.clone(),
            store.clone(),
            notifier,
            config.clone(),
        );
        let ledger = RewardsLedgerService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            config.clone(),
        );

        let ctx = Self {
            store,
            config,
            partner_uuid: PartnerUuid::new(),
            catalog,
            bookings,
            withdrawals,
            ledger,
        };

        ctx.insert_partner(ctx.partner_uuid, Self::PARTNER_NAME)
            .await;

        ctx
    }

    /// Register an additional optometrist and return their id.
    pub(crate) async fn create_partner(&self, name: &str) -> PartnerUuid {
        let uuid = PartnerUuid::new();
        self.insert_partner(uuid, name).await;
        uuid
    }

    /// Seed an active product directly into the store, bypassing catalog
    /// validation, and return its id.
    pub(crate) async fn seed_product(&self, reward: RewardSpec) -> ProductUuid {
        let uuid = ProductUuid::new();
        let now = Timestamp::now();

        self.store
            .insert_product(Product {
                uuid,
                brand: "CooperVision".to_string(),
                name: Self::PRODUCT_NAME.to_string(),
                reward,
                stock_quantity: 100,
                active: true,
                created_at: now,
                updated_at: now,
            })
            .await
            .expect("Failed to seed test product");

        uuid
    }

    async fn insert_partner(&self, uuid: PartnerUuid, name: &str) {
        self.store
            .insert_partner(Partner {
                uuid,
                full_name: name.to_string(),
                email: "asha.rao@example.in".to_string(),
                phone: "9876543210".to_string(),
                shop_name: "Rao Vision Care".to_string(),
                city: "Pune".to_string(),
                referral_code: "RAO-OPT-001".to_string(),
                role: PartnerRole::Optometrist,
                created_at: Timestamp::now(),
            })
            .await
            .expect("Failed to seed test partner");
    }
}
