//! In-memory reference store.
//!
//! Backs the service tests and doubles as a working single-process store.
//! All four store traits are implemented over plain maps behind one
//! `RwLock`; holding the write lock across a compare-and-set makes the
//! status update atomic with respect to other writers.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    domain::{
        bookings::models::{Booking, BookingStatus, BookingUuid},
        catalog::models::{Product, ProductUuid},
        partners::models::{Partner, PartnerUuid},
        withdrawals::models::{Withdrawal, WithdrawalStatus, WithdrawalUuid},
    },
    store::{BookingsStore, CatalogStore, PartnersStore, Scope, StoreError, WithdrawalsStore},
};

#[derive(Debug, Default)]
struct Inner {
    products: FxHashMap<ProductUuid, Product>,
    partners: FxHashMap<PartnerUuid, Partner>,
    bookings: FxHashMap<BookingUuid, Booking>,
    withdrawals: FxHashMap<WithdrawalUuid, Withdrawal>,
}

/// Shared in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn get_product(&self, product: ProductUuid) -> Result<Option<Product>, StoreError> {
        Ok(self.inner.read().await.products.get(&product).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.read().await;

        let mut products: Vec<Product> = inner.products.values().cloned().collect();
        products.sort_by_key(|product| product.uuid);

        Ok(products)
    }

    async fn insert_product(&self, product: Product) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        if inner.products.contains_key(&product.uuid) {
            return Err(StoreError::DuplicateKey);
        }

        debug!(product_uuid = %product.uuid, "inserting product");
        inner.products.insert(product.uuid, product);

        Ok(())
    }

    async fn set_product_active(
        &self,
        product: ProductUuid,
        active: bool,
    ) -> Result<Option<Product>, StoreError> {
        let mut inner = self.inner.write().await;

        Ok(inner.products.get_mut(&product).map(|stored| {
            stored.active = active;
            stored.updated_at = jiff::Timestamp::now();
            stored.clone()
        }))
    }
}

#[async_trait]
impl PartnersStore for MemoryStore {
    async fn get_partner(&self, partner: PartnerUuid) -> Result<Option<Partner>, StoreError> {
        Ok(self.inner.read().await.partners.get(&partner).cloned())
    }

    async fn count_partners(&self) -> Result<u64, StoreError> {
        Ok(self.inner.read().await.partners.len() as u64)
    }

    async fn insert_partner(&self, partner: Partner) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        if inner.partners.contains_key(&partner.uuid) {
            return Err(StoreError::DuplicateKey);
        }

        inner.partners.insert(partner.uuid, partner);

        Ok(())
    }
}

#[async_trait]
impl BookingsStore for MemoryStore {
    async fn insert_booking(&self, booking: Booking) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        if inner.bookings.contains_key(&booking.uuid) {
            return Err(StoreError::DuplicateKey);
        }

        debug!(booking_uuid = %booking.uuid, "inserting booking");
        inner.bookings.insert(booking.uuid, booking);

        Ok(())
    }

    async fn get_booking(&self, booking: BookingUuid) -> Result<Option<Booking>, StoreError> {
        Ok(self.inner.read().await.bookings.get(&booking).cloned())
    }

    async fn list_bookings(&self, scope: Scope) -> Result<Vec<Booking>, StoreError> {
        let inner = self.inner.read().await;

        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|booking| scope.matches(booking.partner_uuid))
            .cloned()
            .collect();

        // Newest first; the uuid breaks created_at ties deterministically.
        bookings.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.uuid.cmp(&a.uuid))
        });

        Ok(bookings)
    }

    async fn update_booking_status(
        &self,
        booking: BookingUuid,
        expect: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<Booking>, StoreError> {
        let mut inner = self.inner.write().await;

        let Some(stored) = inner.bookings.get_mut(&booking) else {
            return Ok(None);
        };

        if stored.status != expect {
            debug!(
                booking_uuid = %booking,
                expected = %expect,
                actual = %stored.status,
                "booking status cas lost"
            );
            return Ok(None);
        }

        stored.status = to;

        Ok(Some(stored.clone()))
    }
}

#[async_trait]
impl WithdrawalsStore for MemoryStore {
    async fn insert_withdrawal(&self, withdrawal: Withdrawal) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        if inner.withdrawals.contains_key(&withdrawal.uuid) {
            return Err(StoreError::DuplicateKey);
        }

        debug!(withdrawal_uuid = %withdrawal.uuid, "inserting withdrawal");
        inner.withdrawals.insert(withdrawal.uuid, withdrawal);

        Ok(())
    }

    async fn get_withdrawal(
        &self,
        withdrawal: WithdrawalUuid,
    ) -> Result<Option<Withdrawal>, StoreError> {
        Ok(self.inner.read().await.withdrawals.get(&withdrawal).cloned())
    }

    async fn list_withdrawals(&self, scope: Scope) -> Result<Vec<Withdrawal>, StoreError> {
        let inner = self.inner.read().await;

        let mut withdrawals: Vec<Withdrawal> = inner
            .withdrawals
            .values()
            .filter(|withdrawal| scope.matches(withdrawal.partner_uuid))
            .cloned()
            .collect();

        withdrawals.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.uuid.cmp(&a.uuid))
        });

        Ok(withdrawals)
    }

    async fn update_withdrawal_status(
        &self,
        withdrawal: WithdrawalUuid,
        expect: WithdrawalStatus,
        to: WithdrawalStatus,
    ) -> Result<Option<Withdrawal>, StoreError> {
        let mut inner = self.inner.write().await;

        let Some(stored) = inner.withdrawals.get_mut(&withdrawal) else {
            return Ok(None);
        };

        if stored.status != expect {
            debug!(
                withdrawal_uuid = %withdrawal,
                expected = %expect,
                actual = %stored.status,
                "withdrawal status cas lost"
            );
            return Ok(None);
        }

        stored.status = to;

        Ok(Some(stored.clone()))
    }
}
