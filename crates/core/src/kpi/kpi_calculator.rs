//! Headline KPI formulas.
//!
//! ```text
//! netReturnPct = (currentValue + distributions - invested) / invested * 100
//! moic = tvpi  = (currentValue + distributions) / invested
//! dpi          = distributions / invested
//! ```
//!
//! Every ratio is zero when nothing has been invested, so the values can go
//! straight to a display.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{KpiBundle, KpiInputs, RangeAdjustedValues};
use crate::ledger::{classify, realized_gains, FinancialEvent};
use crate::windows::RangeToken;

/// `numerator / denominator`, or zero for a zero denominator or overflow.
fn guarded_ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

pub fn net_return_pct(inputs: &KpiInputs) -> Decimal {
    let gain = inputs
        .current_value
        .saturating_add(inputs.total_distributions)
        .saturating_sub(inputs.total_invested);
    guarded_ratio(gain, inputs.total_invested)
        .checked_mul(Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
}

pub fn moic(inputs: &KpiInputs) -> Decimal {
    guarded_ratio(
        inputs.current_value.saturating_add(inputs.total_distributions),
        inputs.total_invested,
    )
}

pub fn dpi(inputs: &KpiInputs) -> Decimal {
    guarded_ratio(inputs.total_distributions, inputs.total_invested)
}

/// Total value to paid-in. Defined identically to [`moic`].
pub fn tvpi(inputs: &KpiInputs) -> Decimal {
    moic(inputs)
}

/// Fraction of value change and distributions shown for a range-scoped panel.
///
/// This is a fixed display approximation, not a slice of real history.
/// `today` has no entry and shows unscaled values.
pub fn range_multiplier(range: RangeToken) -> Decimal {
    match range {
        RangeToken::OneMonth => dec!(0.1),
        RangeToken::ThreeMonths => dec!(0.25),
        RangeToken::SixMonths => dec!(0.5),
        RangeToken::OneYear => dec!(0.8),
        RangeToken::YearToDate => dec!(0.7),
        RangeToken::All | RangeToken::Today => Decimal::ONE,
    }
}

pub fn range_adjusted_values(inputs: &KpiInputs, range: RangeToken) -> RangeAdjustedValues {
    let multiplier = range_multiplier(range);
    RangeAdjustedValues {
        range,
        multiplier,
        adjusted_value: inputs.total_invested.saturating_add(
            inputs
                .current_value
                .saturating_sub(inputs.total_invested)
                .saturating_mul(multiplier),
        ),
        adjusted_distributions: inputs.total_distributions.saturating_mul(multiplier),
    }
}

/// Builds the KPI bundle for a set of (already status-filtered) events.
///
/// Capital invested is the sum of contributions and capital calls;
/// distributions are distribution income plus return of capital.
pub fn build_kpi_bundle(events: &[FinancialEvent], current_value: Decimal) -> KpiBundle {
    let totals = classify(events).totals();
    let gains = realized_gains(events);
    let inputs = KpiInputs {
        total_invested: totals.total_contributions,
        current_value,
        total_distributions: totals.total_distributions,
    };

    let bundle = KpiBundle {
        net_cash_flow: totals.net_cash_flow,
        total_contributions: totals.total_contributions,
        total_distributions: totals.total_distributions,
        total_fees: totals.total_fees,
        realized_gains: gains.total,
        taxes_withheld: totals.taxes_withheld,
        moic: moic(&inputs),
        dpi: dpi(&inputs),
        tvpi: tvpi(&inputs),
        net_return_pct: net_return_pct(&inputs),
    };

    debug!(
        "KPI bundle over {} events: invested {}, moic {}, dpi {}",
        events.len(),
        inputs.total_invested,
        bundle.moic.round_dp(4),
        bundle.dpi.round_dp(4)
    );
    bundle
}
