//! Booking Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{catalog::models::ProductUuid, partners::models::PartnerUuid},
    uuids::TypedUuid,
};

/// Booking UUID
pub type BookingUuid = TypedUuid<Booking>;

/// A submitted sale record.
///
/// `product_name`, `partner_name` and `points_earned` are frozen at
/// creation; later catalog edits or renames never alter a historical
/// booking. Only `status` ever changes after insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub uuid: BookingUuid,
    pub partner_uuid: PartnerUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub partner_name: String,
    pub quantity: u32,
    pub points_earned: u64,
    pub proof_ref: Option<String>,
    pub status: BookingStatus,
    pub created_at: Timestamp,
}

/// New Booking Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub partner_uuid: PartnerUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub proof_ref: Option<String>,
}

/// Booking review state.
///
/// `waiting` is the only non-terminal state; a rejected booking is never
/// resurrected — resubmission means a new booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Waiting)
    }

    /// Whether the review workflow permits moving from `self` to `target`.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Waiting, Self::Approved) | (Self::Waiting, Self::Rejected)
        )
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            Self::Waiting => "waiting",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        };

        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::BookingStatus::{Approved, Rejected, Waiting};

    #[test]
    fn waiting_can_move_to_either_terminal_state() {
        assert!(Waiting.can_transition_to(Approved));
        assert!(Waiting.can_transition_to(Rejected));
    }

    #[test]
    fn terminal_states_permit_no_transition() {
        for from in [Approved, Rejected] {
            for to in [Waiting, Approved, Rejected] {
                assert!(
                    !from.can_transition_to(to),
                    "{from} -> {to} should be forbidden"
                );
            }
        }
    }

    #[test]
    fn waiting_cannot_transition_to_itself() {
        assert!(!Waiting.can_transition_to(Waiting));
    }

    #[test]
    fn terminality_tracks_the_waiting_state() {
        assert!(!Waiting.is_terminal());
        assert!(Approved.is_terminal());
        assert!(Rejected.is_terminal());
    }
}
