//! Product Records
//!
//! Raw catalog rows as an external store hands them over. Upstream data has
//! shipped rows with absent or non-numeric reward fields, which once leaked
//! `NaN` into point totals; decoding clamps every such field to zero instead
//! of propagating it.

use jiff::Timestamp;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::Deserialize;
use uuid::Uuid;

use super::models::{Product, ProductUuid, RewardSpec};

/// A catalog row before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: Uuid,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub reward_percentage: Option<i64>,
    #[serde(default)]
    pub points_per_unit: Option<i64>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl ProductRecord {
    /// Decode into a model, defaulting malformed numeric fields to zero.
    ///
    /// An explicit `points_per_unit` is authoritative; the price/percentage
    /// formula only applies when it is absent.
    #[must_use]
    pub fn into_product(self) -> Product {
        let reward = match self.points_per_unit {
            Some(points) => RewardSpec::PerUnit {
                points: clamp_points(points),
            },
            None => RewardSpec::Percentage {
                base_price: clamp_price(self.base_price),
                percentage: clamp_percentage(self.reward_percentage),
            },
        };

        let created_at = self.created_at.unwrap_or(Timestamp::UNIX_EPOCH);

        Product {
            uuid: ProductUuid::from_uuid(self.id),
            brand: self.brand.unwrap_or_default(),
            name: self.product_name.unwrap_or_default(),
            reward,
            stock_quantity: self
                .stock_quantity
                .and_then(|quantity| u32::try_from(quantity).ok())
                .unwrap_or(0),
            active: self.active,
            created_at,
            updated_at: created_at,
        }
    }
}

fn clamp_points(points: i64) -> u64 {
    u64::try_from(points).unwrap_or(0)
}

fn clamp_price(price: Option<f64>) -> Decimal {
    price
        .filter(|value| value.is_finite() && *value >= 0.0)
        .and_then(Decimal::from_f64)
        .unwrap_or(Decimal::ZERO)
}

/// Out-of-range percentages are malformed, not "close enough": they earn
/// nothing rather than something surprising.
fn clamp_percentage(percentage: Option<i64>) -> u8 {
    match percentage {
        Some(value @ 1..=8) => u8::try_from(value).unwrap_or(0),
        _ => 0,
    }
}
