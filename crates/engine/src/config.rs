use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_core::Money;

/// Tunable bounds for the tolerance-date pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Allowed absolute amount difference, same currency unit as the feeds.
    pub amount_tolerance: Decimal,
    /// Allowed date distance in days, applied on both sides of the bank date.
    pub date_window_days: i64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            amount_tolerance: Decimal::new(100, 2),
            date_window_days: 3,
        }
    }
}

impl MatchConfig {
    pub fn new(amount_tolerance: Decimal, date_window_days: i64) -> Self {
        Self {
            amount_tolerance,
            date_window_days,
        }
    }

    pub fn from_toml(toml_content: &str) -> Result<Self, String> {
        toml::from_str(toml_content).map_err(|e| format!("Failed to parse TOML: {e}"))
    }

    pub fn tolerance(&self) -> Money {
        Money::from_decimal(self.amount_tolerance)
    }
}
