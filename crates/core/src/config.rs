//! Engine configuration.
//!
//! Thresholds and calendar settings the caller may override. Every field has
//! a default so a partial JSON document deserializes cleanly.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CLOSING_SOON_DAYS, DEFAULT_CLOSING_SOON_PROGRESS_PCT};
use crate::errors::{Error, Result};
use crate::utils::time_utils::DEFAULT_VALUATION_TZ;

/// Configuration shared by every analytics operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsConfig {
    /// Calendar for ytd/today windows and monthly buckets (default: UTC)
    pub timezone: Tz,

    /// Funding progress percent at which an open offering is closing soon (default: 80)
    pub closing_soon_progress_pct: Decimal,

    /// Days to deadline at or below which an open offering is closing soon (default: 7)
    pub closing_soon_days: i64,

    /// Count pending events alongside posted ones (default: false)
    pub include_pending_events: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_VALUATION_TZ,
            closing_soon_progress_pct: Decimal::from(DEFAULT_CLOSING_SOON_PROGRESS_PCT),
            closing_soon_days: DEFAULT_CLOSING_SOON_DAYS,
            include_pending_events: false,
        }
    }
}

impl AnalyticsConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: AnalyticsConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects threshold values that would make status derivation meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.closing_soon_progress_pct < Decimal::ZERO
            || self.closing_soon_progress_pct > Decimal::ONE_HUNDRED
        {
            return Err(Error::Config(format!(
                "closingSoonProgressPct must be within 0..=100, got {}",
                self.closing_soon_progress_pct
            )));
        }
        if self.closing_soon_days < 0 {
            return Err(Error::Config(format!(
                "closingSoonDays must not be negative, got {}",
                self.closing_soon_days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.timezone, chrono_tz::UTC);
        assert_eq!(config.closing_soon_progress_pct, dec!(80));
        assert_eq!(config.closing_soon_days, 7);
        assert!(!config.include_pending_events);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            AnalyticsConfig::from_json_str(r#"{"timezone":"Europe/Berlin","closingSoonDays":3}"#)
                .unwrap();
        assert_eq!(config.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(config.closing_soon_days, 3);
        assert_eq!(config.closing_soon_progress_pct, dec!(80));
    }

    #[test]
    fn test_out_of_range_threshold_is_rejected() {
        let err = AnalyticsConfig::from_json_str(r#"{"closingSoonProgressPct":150}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        assert!(AnalyticsConfig::from_json_str(r#"{"timezone":"Mars/Olympus"}"#).is_err());
    }
}
