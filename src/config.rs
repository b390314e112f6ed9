//! Rewards configuration.

use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the points-per-rupee conversion rate.
pub const CONVERSION_RATE_VAR: &str = "REWARD_CONVERSION_RATE";

/// Environment variable overriding the minimum redeemable point balance.
pub const MIN_WITHDRAWAL_VAR: &str = "MIN_WITHDRAWAL_POINTS";

/// Tunable constants for the rewards program.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RewardsConfig {
    /// Points per currency unit when converting a balance to cash.
    pub conversion_rate: u64,

    /// Smallest point balance eligible for a withdrawal request.
    pub min_withdrawal_points: u64,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            conversion_rate: 10,
            min_withdrawal_points: 2000,
        }
    }
}

impl RewardsConfig {
    /// Build a config from the process environment, falling back to the
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(rate) = read_var(CONVERSION_RATE_VAR)? {
            config.conversion_rate = rate;
        }

        if let Some(min) = read_var(MIN_WITHDRAWAL_VAR)? {
            config.min_withdrawal_points = min;
        }

        config.validate()?;

        Ok(config)
    }

    /// A conversion rate of zero would make every balance divide to
    /// infinity; reject it up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.conversion_rate == 0 {
            return Err(ConfigError::ZeroConversionRate);
        }

        Ok(())
    }
}

fn read_var(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::Malformed { name, value: raw }),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::Malformed {
            name,
            value: String::from("<non-unicode>"),
        }),
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a non-negative integer: {value:?}")]
    Malformed { name: &'static str, value: String },

    #[error("conversion rate must be at least 1")]
    ZeroConversionRate,
}
