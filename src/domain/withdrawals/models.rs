//! Withdrawal Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{domain::partners::models::PartnerUuid, uuids::TypedUuid};

/// Withdrawal UUID
pub type WithdrawalUuid = TypedUuid<Withdrawal>;

/// A request to convert accumulated points into a UPI cash payout.
///
/// A request always covers the partner's entire available balance at the
/// moment of creation; `amount` is `points / conversion rate`, frozen then.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Withdrawal {
    pub uuid: WithdrawalUuid,
    pub partner_uuid: PartnerUuid,
    pub points: u64,
    pub amount: Decimal,
    pub upi_id: String,
    pub status: WithdrawalStatus,
    pub created_at: Timestamp,
}

/// Withdrawal review state.
///
/// Approval records that the external UPI transfer was executed; rejection
/// releases the points back into the available pool via the ledger
/// projection. Both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
}

impl WithdrawalStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}

impl Display for WithdrawalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        };

        f.write_str(label)
    }
}

/// Minimal UPI syntax check: a namespace separator with something on both
/// sides and no embedded whitespace. Anything deeper belongs to the payment
/// collaborator.
#[must_use]
pub fn is_valid_upi_id(upi_id: &str) -> bool {
    if upi_id.chars().any(char::is_whitespace) {
        return false;
    }

    match upi_id.split_once('@') {
        Some((account, namespace)) => !account.is_empty() && !namespace.is_empty(),
        None => false,
    }
}
