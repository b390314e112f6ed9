//! Storage boundary.
//!
//! Durable storage is an external collaborator; the core only depends on
//! these narrow traits. Status updates are compare-and-set on the record's
//! current status so that two racing admin transitions can never both
//! succeed — the loser observes `None` and surfaces it as an invalid
//! transition.

pub mod memory;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::domain::{
    bookings::models::{Booking, BookingStatus, BookingUuid},
    catalog::models::{Product, ProductUuid},
    partners::models::{Partner, PartnerUuid},
    withdrawals::models::{Withdrawal, WithdrawalStatus, WithdrawalUuid},
};

/// Which partner's records a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every partner (admin views).
    All,
    /// A single partner's records.
    Partner(PartnerUuid),
}

impl Scope {
    pub(crate) fn matches(self, partner: PartnerUuid) -> bool {
        match self {
            Self::All => true,
            Self::Partner(uuid) => uuid == partner,
        }
    }
}

/// Failures raised by a storage backend.
///
/// These pass through the services untransformed; retry and backoff policy
/// belongs to the backend, not the core.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists")]
    DuplicateKey,

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Read access to the product catalog, plus the admin write path.
#[automock]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_product(&self, product: ProductUuid) -> Result<Option<Product>, StoreError>;

    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    async fn insert_product(&self, product: Product) -> Result<(), StoreError>;

    /// Returns the updated product, or `None` when it does not exist.
    async fn set_product_active(
        &self,
        product: ProductUuid,
        active: bool,
    ) -> Result<Option<Product>, StoreError>;
}

/// Partner directory lookups.
#[automock]
#[async_trait]
pub trait PartnersStore: Send + Sync {
    async fn get_partner(&self, partner: PartnerUuid) -> Result<Option<Partner>, StoreError>;

    async fn count_partners(&self) -> Result<u64, StoreError>;

    async fn insert_partner(&self, partner: Partner) -> Result<(), StoreError>;
}

/// Booking persistence.
#[automock]
#[async_trait]
pub trait BookingsStore: Send + Sync {
    async fn insert_booking(&self, booking: Booking) -> Result<(), StoreError>;

    async fn get_booking(&self, booking: BookingUuid) -> Result<Option<Booking>, StoreError>;

    /// Newest first.
    async fn list_bookings(&self, scope: Scope) -> Result<Vec<Booking>, StoreError>;

    /// Compare-and-set: applies `to` only while the stored status still
    /// equals `expect`, returning the updated booking. `None` means the
    /// record is missing or another writer got there first.
    async fn update_booking_status(
        &self,
        booking: BookingUuid,
        expect: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<Booking>, StoreError>;
}

/// Withdrawal persistence.
#[automock]
#[async_trait]
pub trait WithdrawalsStore: Send + Sync {
    async fn insert_withdrawal(&self, withdrawal: Withdrawal) -> Result<(), StoreError>;

    async fn get_withdrawal(
        &self,
        withdrawal: WithdrawalUuid,
    ) -> Result<Option<Withdrawal>, StoreError>;

    /// Newest first.
    async fn list_withdrawals(&self, scope: Scope) -> Result<Vec<Withdrawal>, StoreError>;

    /// Same compare-and-set contract as [`BookingsStore::update_booking_status`].
    async fn update_withdrawal_status(
        &self,
        withdrawal: WithdrawalUuid,
        expect: WithdrawalStatus,
        to: WithdrawalStatus,
    ) -> Result<Option<Withdrawal>, StoreError>;
}
