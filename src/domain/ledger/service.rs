//! Ledger service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    config::RewardsConfig,
    domain::{
        ledger::{self, AdminOverview, LedgerSummary, errors::LedgerServiceError},
        partners::models::PartnerUuid,
    },
    store::{BookingsStore, PartnersStore, Scope, WithdrawalsStore},
};

/// Ledger service that recomputes balances from stored history on demand.
#[derive(Clone)]
pub struct RewardsLedgerService {
    partners: Arc<dyn PartnersStore>,
    bookings: Arc<dyn BookingsStore>,
    withdrawals: Arc<dyn WithdrawalsStore>,
    config: RewardsConfig,
}

impl RewardsLedgerService {
    #[must_use]
    pub fn new(
        partners: Arc<dyn PartnersStore>,
        bookings: Arc<dyn BookingsStore>,
        withdrawals: Arc<dyn WithdrawalsStore>,
        config: RewardsConfig,
    ) -> Self {
        Self {
            partners,
            bookings,
            withdrawals,
            config,
        }
    }
}

impl std::fmt::Debug for RewardsLedgerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardsLedgerService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LedgerService for RewardsLedgerService {
    #[tracing::instrument(
        name = "ledger.service.balance",
        skip(self),
        fields(partner_uuid = %partner),
        err
    )]
    async fn balance(&self, partner: PartnerUuid) -> Result<LedgerSummary, LedgerServiceError> {
        let scope = Scope::Partner(partner);

        let bookings = self.bookings.list_bookings(scope).await?;
        let withdrawals = self.withdrawals.list_withdrawals(scope).await?;

        Ok(ledger::balance_of(
            partner,
            &bookings,
            &withdrawals,
            &self.config,
        ))
    }

    async fn overview(&self) -> Result<AdminOverview, LedgerServiceError> {
        let bookings = self.bookings.list_bookings(Scope::All).await?;
        let withdrawals = self.withdrawals.list_withdrawals(Scope::All).await?;
        let partners = self.partners.count_partners().await?;

        Ok(ledger::admin_overview(&bookings, &withdrawals, partners))
    }
}

#[automock]
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// Derive a partner's current balance from full history.
    async fn balance(&self, partner: PartnerUuid) -> Result<LedgerSummary, LedgerServiceError>;

    /// Program-wide counters for the admin dashboard.
    async fn overview(&self) -> Result<AdminOverview, LedgerServiceError>;
}
