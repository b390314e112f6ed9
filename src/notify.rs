//! Notification boundary.
//!
//! State changes fan out to an external dispatcher (email, WhatsApp,
//! realtime channels). Delivery is best-effort: publishing never fails from
//! the core's point of view and never blocks a state change on delivery.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::domain::{
    bookings::models::{BookingStatus, BookingUuid},
    withdrawals::models::{WithdrawalStatus, WithdrawalUuid},
};

/// Events emitted by the rewards core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardsEvent {
    BookingCreated {
        booking: BookingUuid,
        status: BookingStatus,
    },
    BookingStatusChanged {
        booking: BookingUuid,
        status: BookingStatus,
    },
    WithdrawalCreated {
        withdrawal: WithdrawalUuid,
        status: WithdrawalStatus,
    },
    WithdrawalStatusChanged {
        withdrawal: WithdrawalUuid,
        status: WithdrawalStatus,
    },
}

/// Outbound event sink.
#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, event: RewardsEvent);
}

/// Notifier that only records events to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn publish(&self, event: RewardsEvent) {
        match event {
            RewardsEvent::BookingCreated { booking, status } => {
                info!(booking_uuid = %booking, status = %status, "booking created");
            }
            RewardsEvent::BookingStatusChanged { booking, status } => {
                info!(booking_uuid = %booking, status = %status, "booking status changed");
            }
            RewardsEvent::WithdrawalCreated { withdrawal, status } => {
                info!(withdrawal_uuid = %withdrawal, status = %status, "withdrawal created");
            }
            RewardsEvent::WithdrawalStatusChanged { withdrawal, status } => {
                info!(withdrawal_uuid = %withdrawal, status = %status, "withdrawal status changed");
            }
        }
    }
}
