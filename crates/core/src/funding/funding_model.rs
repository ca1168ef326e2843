//! Funding domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw funding data for a property offering, as supplied by the listing feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRecord {
    pub id: String,
    pub current_funding: Decimal,
    pub target_funding: Decimal,
    #[serde(default)]
    pub funding_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub waitlist_open: bool,
    #[serde(default)]
    pub capacity_remaining: Option<i64>,
    #[serde(default)]
    pub raw_status: Option<String>,
}

impl FundingRecord {
    pub fn new(id: impl Into<String>, current_funding: Decimal, target_funding: Decimal) -> Self {
        Self {
            id: id.into(),
            current_funding,
            target_funding,
            funding_deadline: None,
            waitlist_open: false,
            capacity_remaining: None,
            raw_status: None,
        }
    }

    /// Raw status lower-cased and trimmed; `None` when unset or blank.
    pub fn normalized_raw_status(&self) -> Option<String> {
        self.raw_status
            .as_deref()
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
    }
}

/// Offering status shown to investors. Recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DerivedStatus {
    Funding,
    ClosingSoon,
    Funded,
    Waitlist,
}

impl DerivedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DerivedStatus::Funding => "FUNDING",
            DerivedStatus::ClosingSoon => "CLOSING_SOON",
            DerivedStatus::Funded => "FUNDED",
            DerivedStatus::Waitlist => "WAITLIST",
        }
    }

    /// Human-friendly label for badges.
    pub fn label(&self) -> &'static str {
        match self {
            DerivedStatus::Funding => "Funding",
            DerivedStatus::ClosingSoon => "Closing Soon",
            DerivedStatus::Funded => "Funded",
            DerivedStatus::Waitlist => "Waitlist",
        }
    }
}

impl std::fmt::Display for DerivedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
