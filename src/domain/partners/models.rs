//! Partner Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Partner UUID
pub type PartnerUuid = TypedUuid<Partner>;

/// A field partner (optometrist) or program administrator.
///
/// Identity and sessions are owned by an external system; the core only
/// needs the display name for booking snapshots and the role for
/// capability checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partner {
    pub uuid: PartnerUuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub shop_name: String,
    pub city: String,
    pub referral_code: String,
    pub role: PartnerRole,
    pub created_at: Timestamp,
}

/// Partner Role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerRole {
    Optometrist,
    Admin,
}

impl Partner {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == PartnerRole::Admin
    }
}
