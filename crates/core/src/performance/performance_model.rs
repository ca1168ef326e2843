use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::windows::DateWindow;

/// One point of the portfolio value history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSnapshot {
    pub date: DateTime<Utc>,
    pub portfolio_value: Decimal,
    pub net_return_pct: Decimal,
    pub net_contribution: Decimal,
}

/// Which fallback tier produced a series selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionTier {
    /// Window anchored at the current moment
    Current,
    /// Same range re-anchored at the latest data point
    LatestPoint,
    /// Whole history anchored at the latest data point
    AllHistory,
    /// Input series was empty
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSelection {
    pub points: Vec<PerformanceSnapshot>,
    pub tier: SelectionTier,
    /// Window that produced `points`; `None` for an empty input.
    pub window: Option<DateWindow>,
}

/// Change across a selected series, for chart headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesChange {
    pub start_value: Decimal,
    pub end_value: Decimal,
    pub amount: Decimal,
    /// Percent change; zero when the series starts at zero.
    pub percent: Decimal,
}
