//! Date-range models.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ContractViolation;

/// Symbolic range selector from the dashboard's range picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeToken {
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "all")]
    All,
    #[serde(rename = "today")]
    Today,
}

impl RangeToken {
    pub const ALL_TOKENS: [RangeToken; 7] = [
        RangeToken::OneMonth,
        RangeToken::ThreeMonths,
        RangeToken::SixMonths,
        RangeToken::OneYear,
        RangeToken::YearToDate,
        RangeToken::All,
        RangeToken::Today,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeToken::OneMonth => "1m",
            RangeToken::ThreeMonths => "3m",
            RangeToken::SixMonths => "6m",
            RangeToken::OneYear => "1y",
            RangeToken::YearToDate => "ytd",
            RangeToken::All => "all",
            RangeToken::Today => "today",
        }
    }

    /// Lookback length in days for the fixed-lookback tokens.
    pub fn lookback_days(&self) -> Option<i64> {
        match self {
            RangeToken::OneMonth => Some(30),
            RangeToken::ThreeMonths => Some(90),
            RangeToken::SixMonths => Some(182),
            RangeToken::OneYear => Some(365),
            RangeToken::YearToDate | RangeToken::All | RangeToken::Today => None,
        }
    }
}

impl FromStr for RangeToken {
    type Err = ContractViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangeToken::ALL_TOKENS
            .into_iter()
            .find(|token| token.as_str() == s)
            .ok_or_else(|| ContractViolation::UnknownRangeToken(s.to_string()))
    }
}

impl std::fmt::Display for RangeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A concrete interval. Membership is inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `start <= t <= end`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}
