//! Rewards Ledger
//!
//! The ledger has no stored state of its own: a partner's balance is a pure
//! projection over the full booking and withdrawal history, recomputed on
//! every read. A missed update can therefore only ever produce a stale
//! read, never permanent drift.

pub mod errors;
pub mod service;

pub use errors::LedgerServiceError;
pub use service::*;

use rust_decimal::Decimal;

use crate::{
    config::RewardsConfig,
    domain::{
        bookings::models::{Booking, BookingStatus},
        partners::models::PartnerUuid,
        withdrawals::models::{Withdrawal, WithdrawalStatus},
    },
};

/// A partner's derived point position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSummary {
    /// Lifetime points over approved bookings.
    pub earned: u64,

    /// Points held or paid out: every non-rejected withdrawal counts.
    pub redeemed: u64,

    /// `earned - redeemed`, floored at zero.
    pub available: u64,

    /// `available` converted to cash at the configured rate.
    pub cash_value: Decimal,
}

/// Program-wide counters for the admin overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminOverview {
    pub pending_bookings: u64,
    pub partners: u64,
    pub points_redeemed: u64,
}

/// Derive `partner`'s balance from history.
///
/// Pending withdrawals count as redeemed so the same points cannot be
/// requested twice; rejected ones drop out of the sum, which is what
/// releases their points.
#[must_use]
pub fn balance_of(
    partner: PartnerUuid,
    bookings: &[Booking],
    withdrawals: &[Withdrawal],
    config: &RewardsConfig,
) -> LedgerSummary {
    let earned = bookings
        .iter()
        .filter(|booking| {
            booking.partner_uuid == partner && booking.status == BookingStatus::Approved
        })
        .map(|booking| booking.points_earned)
        .fold(0_u64, u64::saturating_add);

    let redeemed = withdrawals
        .iter()
        .filter(|withdrawal| {
            withdrawal.partner_uuid == partner
                && withdrawal.status != WithdrawalStatus::Rejected
        })
        .map(|withdrawal| withdrawal.points)
        .fold(0_u64, u64::saturating_add);

    let available = earned.saturating_sub(redeemed);

    LedgerSummary {
        earned,
        redeemed,
        available,
        cash_value: cash_value(available, config),
    }
}

/// Convert a point balance to cash at the configured rate.
#[must_use]
pub fn cash_value(points: u64, config: &RewardsConfig) -> Decimal {
    if config.conversion_rate == 0 {
        return Decimal::ZERO;
    }

    Decimal::from(points) / Decimal::from(config.conversion_rate)
}

/// Program-wide admin dashboard counters.
#[must_use]
pub fn admin_overview(
    bookings: &[Booking],
    withdrawals: &[Withdrawal],
    partners: u64,
) -> AdminOverview {
    let pending_bookings = bookings
        .iter()
        .filter(|booking| booking.status == BookingStatus::Waiting)
        .count() as u64;

    let points_redeemed = withdrawals
        .iter()
        .filter(|withdrawal| withdrawal.status == WithdrawalStatus::Approved)
        .map(|withdrawal| withdrawal.points)
        .fold(0_u64, u64::saturating_add);

    AdminOverview {
        pending_bookings,
        partners,
        points_redeemed,
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use crate::domain::{
        bookings::models::{Booking, BookingStatus, BookingUuid},
        catalog::models::ProductUuid,
        withdrawals::models::{Withdrawal, WithdrawalStatus, WithdrawalUuid},
    };

    use super::*;

    fn booking(partner: PartnerUuid, points: u64, status: BookingStatus) -> Booking {
        Booking {
            uuid: BookingUuid::new(),
            partner_uuid: partner,
            product_uuid: ProductUuid::new(),
            product_name: "Biofinity".to_string(),
            partner_name: "Dr. Asha Rao".to_string(),
            quantity: 1,
            points_earned: points,
            proof_ref: None,
            status,
            created_at: Timestamp::now(),
        }
    }

    fn withdrawal(partner: PartnerUuid, points: u64, status: WithdrawalStatus) -> Withdrawal {
        Withdrawal {
            uuid: WithdrawalUuid::new(),
            partner_uuid: partner,
            points,
            amount: Decimal::from(points) / Decimal::from(10),
            upi_id: "asha.rao@okaxis".to_string(),
            status,
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn only_approved_bookings_earn() {
        let partner = PartnerUuid::new();
        let config = RewardsConfig::default();

        let bookings = [
            booking(partner, 5000, BookingStatus::Approved),
            booking(partner, 700, BookingStatus::Waiting),
            booking(partner, 900, BookingStatus::Rejected),
        ];

        let summary = balance_of(partner, &bookings, &[], &config);

        assert_eq!(summary.earned, 5000);
        assert_eq!(summary.available, 5000);
        assert_eq!(summary.cash_value, Decimal::from(500));
    }

    #[test]
    fn pending_and_approved_withdrawals_both_count_as_redeemed() {
        let partner = PartnerUuid::new();
        let config = RewardsConfig::default();

        let bookings = [booking(partner, 6000, BookingStatus::Approved)];
        let withdrawals = [
            withdrawal(partner, 2000, WithdrawalStatus::Approved),
            withdrawal(partner, 3000, WithdrawalStatus::Pending),
        ];

        let summary = balance_of(partner, &bookings, &withdrawals, &config);

        assert_eq!(summary.redeemed, 5000);
        assert_eq!(summary.available, 1000);
    }

    #[test]
    fn rejected_withdrawals_release_their_points() {
        let partner = PartnerUuid::new();
        let config = RewardsConfig::default();

        let bookings = [booking(partner, 5000, BookingStatus::Approved)];
        let withdrawals = [withdrawal(partner, 5000, WithdrawalStatus::Rejected)];

        let summary = balance_of(partner, &bookings, &withdrawals, &config);

        assert_eq!(summary.redeemed, 0);
        assert_eq!(summary.available, 5000);
    }

    #[test]
    fn available_is_floored_at_zero_on_anomalous_history() {
        let partner = PartnerUuid::new();
        let config = RewardsConfig::default();

        let bookings = [booking(partner, 1000, BookingStatus::Approved)];
        let withdrawals = [withdrawal(partner, 4000, WithdrawalStatus::Approved)];

        let summary = balance_of(partner, &bookings, &withdrawals, &config);

        assert_eq!(summary.available, 0);
        assert_eq!(summary.cash_value, Decimal::ZERO);
    }

    #[test]
    fn other_partners_records_are_ignored() {
        let partner = PartnerUuid::new();
        let stranger = PartnerUuid::new();
        let config = RewardsConfig::default();

        let bookings = [
            booking(partner, 1000, BookingStatus::Approved),
            booking(stranger, 9000, BookingStatus::Approved),
        ];
        let withdrawals = [withdrawal(stranger, 500, WithdrawalStatus::Pending)];

        let summary = balance_of(partner, &bookings, &withdrawals, &config);

        assert_eq!(summary.earned, 1000);
        assert_eq!(summary.redeemed, 0);
    }

    #[test]
    fn projection_is_idempotent() {
        let partner = PartnerUuid::new();
        let config = RewardsConfig::default();

        let bookings = [booking(partner, 2500, BookingStatus::Approved)];
        let withdrawals = [withdrawal(partner, 2000, WithdrawalStatus::Pending)];

        let first = balance_of(partner, &bookings, &withdrawals, &config);
        let second = balance_of(partner, &bookings, &withdrawals, &config);

        assert_eq!(first, second);
    }

    #[test]
    fn fractional_cash_values_are_exact() {
        let config = RewardsConfig::default();

        assert_eq!(cash_value(5005, &config), Decimal::new(5005, 1));
    }

    #[test]
    fn overview_counts_pending_bookings_and_paid_points() {
        let partner = PartnerUuid::new();

        let bookings = [
            booking(partner, 100, BookingStatus::Waiting),
            booking(partner, 100, BookingStatus::Waiting),
            booking(partner, 100, BookingStatus::Approved),
        ];
        let withdrawals = [
            withdrawal(partner, 2000, WithdrawalStatus::Approved),
            withdrawal(partner, 999, WithdrawalStatus::Pending),
            withdrawal(partner, 400, WithdrawalStatus::Rejected),
        ];

        let overview = admin_overview(&bookings, &withdrawals, 124);

        assert_eq!(overview.pending_bookings, 2);
        assert_eq!(overview.partners, 124);
        assert_eq!(overview.points_redeemed, 2000);
    }
}
