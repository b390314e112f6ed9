//! Points accrual rule.
//!
//! Pure and total: for any reward specification and quantity the result is
//! a finite, non-negative integer. Malformed catalog data has already been
//! clamped to zero at decode time, so nothing here can produce a
//! non-numeric total.

use crate::domain::catalog::models::RewardSpec;

/// Points earned by a booking of `quantity` units under `reward`.
#[must_use]
pub fn points_for(reward: &RewardSpec, quantity: u32) -> u64 {
    reward.points_per_unit().saturating_mul(u64::from(quantity))
}
