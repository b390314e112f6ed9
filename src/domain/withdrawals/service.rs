//! Withdrawals service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    config::RewardsConfig,
    domain::{
        ledger,
        partners::models::PartnerUuid,
        withdrawals::{
            errors::WithdrawalsServiceError,
            models::{Withdrawal, WithdrawalStatus, WithdrawalUuid, is_valid_upi_id},
        },
    },
    notify::{Notifier, RewardsEvent},
    store::{BookingsStore, Scope, WithdrawalsStore},
};

/// Withdrawals service backed by the storage boundary.
#[derive(Clone)]
pub struct RewardsWithdrawalsService {
    bookings: Arc<dyn BookingsStore>,
    withdrawals: Arc<dyn WithdrawalsStore>,
    notifier: Arc<dyn Notifier>,
    config: RewardsConfig,
}

impl RewardsWithdrawalsService {
    #[must_use]
    pub fn new(
        bookings: Arc<dyn BookingsStore>,
        withdrawals: Arc<dyn WithdrawalsStore>,
        notifier: Arc<dyn Notifier>,
        config: RewardsConfig,
    ) -> Self {
        Self {
            bookings,
            withdrawals,
            notifier,
            config,
        }
    }
}

impl std::fmt::Debug for RewardsWithdrawalsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardsWithdrawalsService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WithdrawalsService for RewardsWithdrawalsService {
    #[tracing::instrument(
        name = "withdrawals.service.request_withdrawal",
        skip(self, upi_id),
        fields(
            partner_uuid = %partner,
            withdrawal_uuid = tracing::field::Empty,
            points = tracing::field::Empty
        ),
        err
    )]
    async fn request_withdrawal(
        &self,
        partner: PartnerUuid,
        upi_id: &str,
    ) -> Result<Withdrawal, WithdrawalsServiceError> {
        if !is_valid_upi_id(upi_id) {
            return Err(WithdrawalsServiceError::InvalidDestination);
        }

        // Re-derive the balance from history right before validating so a
        // concurrent request cannot spend the same points twice.
        let scope = Scope::Partner(partner);
        let bookings = self.bookings.list_bookings(scope).await?;
        let withdrawals = self.withdrawals.list_withdrawals(scope).await?;

        let summary = ledger::balance_of(partner, &bookings, &withdrawals, &self.config);

        if summary.available < self.config.min_withdrawal_points {
            return Err(WithdrawalsServiceError::InsufficientBalance);
        }

        // Always the full available balance; partial requests are not a
        // thing this program offers.
        let record = Withdrawal {
            uuid: WithdrawalUuid::new(),
            partner_uuid: partner,
            points: summary.available,
            amount: summary.cash_value,
            upi_id: upi_id.to_string(),
            status: WithdrawalStatus::Pending,
            created_at: Timestamp::now(),
        };

        let span = Span::current();
        span.record("withdrawal_uuid", tracing::field::display(record.uuid));
        span.record("points", tracing::field::display(record.points));

        self.withdrawals.insert_withdrawal(record.clone()).await?;

        self.notifier
            .publish(RewardsEvent::WithdrawalCreated {
                withdrawal: record.uuid,
                status: record.status,
            })
            .await;

        info!(
            withdrawal_uuid = %record.uuid,
            points = record.points,
            amount = %record.amount,
            "created withdrawal request"
        );

        Ok(record)
    }

    #[tracing::instrument(
        name = "withdrawals.service.transition_withdrawal",
        skip(self),
        fields(withdrawal_uuid = %withdrawal, target = %target),
        err
    )]
    async fn transition_withdrawal(
        &self,
        withdrawal: WithdrawalUuid,
        target: WithdrawalStatus,
        as_admin: bool,
    ) -> Result<Withdrawal, WithdrawalsServiceError> {
        if !as_admin {
            return Err(WithdrawalsServiceError::Forbidden);
        }

        let current = self
            .withdrawals
            .get_withdrawal(withdrawal)
            .await?
            .ok_or(WithdrawalsServiceError::NotFound)?;

        if !current.status.can_transition_to(target) {
            return Err(WithdrawalsServiceError::InvalidTransition {
                from: current.status,
                to: target,
            });
        }

        let updated = self
            .withdrawals
            .update_withdrawal_status(withdrawal, current.status, target)
            .await?
            .ok_or(WithdrawalsServiceError::InvalidTransition {
                from: current.status,
                to: target,
            })?;

        self.notifier
            .publish(RewardsEvent::WithdrawalStatusChanged {
                withdrawal: updated.uuid,
                status: updated.status,
            })
            .await;

        info!(
            withdrawal_uuid = %updated.uuid,
            status = %updated.status,
            "withdrawal transitioned"
        );

        Ok(updated)
    }

    async fn list_withdrawals(
        &self,
        scope: Scope,
    ) -> Result<Vec<Withdrawal>, WithdrawalsServiceError> {
        Ok(self.withdrawals.list_withdrawals(scope).await?)
    }
}

#[automock]
#[async_trait]
pub trait WithdrawalsService: Send + Sync {
    /// Requests a payout of the partner's entire available balance.
    async fn request_withdrawal(
        &self,
        partner: PartnerUuid,
        upi_id: &str,
    ) -> Result<Withdrawal, WithdrawalsServiceError>;

    /// Applies an admin decision; withdrawals transition exactly once.
    async fn transition_withdrawal(
        &self,
        withdrawal: WithdrawalUuid,
        target: WithdrawalStatus,
        as_admin: bool,
    ) -> Result<Withdrawal, WithdrawalsServiceError>;

    /// Retrieves withdrawal requests, newest first.
    async fn list_withdrawals(
        &self,
        scope: Scope,
    ) -> Result<Vec<Withdrawal>, WithdrawalsServiceError>;
}
