use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::windows::RangeToken;

/// Aggregated totals the headline ratios are computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiInputs {
    pub total_invested: Decimal,
    pub current_value: Decimal,
    pub total_distributions: Decimal,
}

/// Headline portfolio metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiBundle {
    pub net_cash_flow: Decimal,
    pub total_contributions: Decimal,
    pub total_distributions: Decimal,
    pub total_fees: Decimal,
    pub realized_gains: Decimal,
    pub taxes_withheld: Decimal,
    pub moic: Decimal,
    pub dpi: Decimal,
    /// Same formula as `moic`; exposed under its own label.
    pub tvpi: Decimal,
    pub net_return_pct: Decimal,
}

impl KpiBundle {
    /// Field keys and values in export order.
    pub fn entries(&self) -> [(&'static str, Decimal); 10] {
        [
            ("netCashFlow", self.net_cash_flow),
            ("totalContributions", self.total_contributions),
            ("totalDistributions", self.total_distributions),
            ("totalFees", self.total_fees),
            ("realizedGains", self.realized_gains),
            ("taxesWithheld", self.taxes_withheld),
            ("moic", self.moic),
            ("dpi", self.dpi),
            ("tvpi", self.tvpi),
            ("netReturnPct", self.net_return_pct),
        ]
    }

    /// Copy rounded to display precision.
    pub fn rounded(&self) -> Self {
        let r = |value: Decimal| value.round_dp(DISPLAY_DECIMAL_PRECISION);
        KpiBundle {
            net_cash_flow: r(self.net_cash_flow),
            total_contributions: r(self.total_contributions),
            total_distributions: r(self.total_distributions),
            total_fees: r(self.total_fees),
            realized_gains: r(self.realized_gains),
            taxes_withheld: r(self.taxes_withheld),
            moic: r(self.moic),
            dpi: r(self.dpi),
            tvpi: r(self.tvpi),
            net_return_pct: r(self.net_return_pct),
        }
    }
}

/// Display values scaled for a range-scoped KPI panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeAdjustedValues {
    pub range: RangeToken,
    pub multiplier: Decimal,
    pub adjusted_value: Decimal,
    pub adjusted_distributions: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rounded_uses_display_precision() {
        let bundle = KpiBundle {
            moic: dec!(1.23456),
            dpi: dec!(0.005),
            tvpi: dec!(1.23456),
            net_return_pct: dec!(-12.345),
            total_fees: dec!(10),
            ..Default::default()
        };
        let rounded = bundle.rounded();
        assert_eq!(rounded.moic, dec!(1.23));
        assert_eq!(rounded.tvpi, rounded.moic);
        // Banker's rounding, as `round_dp` does.
        assert_eq!(rounded.dpi, dec!(0.00));
        assert_eq!(rounded.net_return_pct, dec!(-12.34));
        assert_eq!(rounded.total_fees, dec!(10));
    }

    #[test]
    fn test_entries_follow_export_order() {
        let keys: Vec<&str> = KpiBundle::default().entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.first(), Some(&"netCashFlow"));
        assert_eq!(keys.last(), Some(&"netReturnPct"));
        assert_eq!(keys.len(), 10);
    }
}
