//! Product Models

use jiff::Timestamp;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub uuid: ProductUuid,
    pub brand: String,
    pub name: String,
    pub reward: RewardSpec,
    pub stock_quantity: u32,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub brand: String,
    pub name: String,
    pub reward: RewardSpec,
    pub stock_quantity: u32,
}

/// How a product earns points, exactly one form at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardSpec {
    /// A flat number of points per unit sold.
    PerUnit { points: u64 },

    /// A percentage of the base price, floored to whole points per unit.
    Percentage { base_price: Decimal, percentage: u8 },
}

impl RewardSpec {
    /// Points earned for a single unit.
    ///
    /// The percentage form floors, never rounds up, and anything that
    /// would come out negative or non-finite collapses to zero.
    #[must_use]
    pub fn points_per_unit(&self) -> u64 {
        match *self {
            Self::PerUnit { points } => points,
            Self::Percentage {
                base_price,
                percentage,
            } => (base_price * Decimal::from(percentage) / Decimal::ONE_HUNDRED)
                .floor()
                .to_u64()
                .unwrap_or(0),
        }
    }
}
