//! Query configuration and listing models for the explore views.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::funding::{DerivedStatus, FundingRecord};

/// A typed field value used for filtering, sorting, and grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
    Date(DateTime<Utc>),
}

impl FieldValue {
    /// Label used when grouping by this value.
    pub fn label(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(number) => number.normalize().to_string(),
            FieldValue::Date(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Inclusive numeric bounds on a named field. Open bounds are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericRange {
    pub field: String,
    #[serde(default)]
    pub min: Option<Decimal>,
    #[serde(default)]
    pub max: Option<Decimal>,
}

/// Predicates combined with AND. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Case-insensitive substring over name, location, and sponsor
    pub search: Option<String>,
    pub categories: BTreeSet<String>,
    pub statuses: BTreeSet<String>,
    pub ranges: Vec<NumericRange>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "by", content = "field", rename_all = "camelCase")]
pub enum GroupBy {
    /// Low (<= 3), Medium (<= 6), High (> 6); Unrated without a score
    Risk,
    Category,
    Status,
    Field(String),
}

/// Caller-owned view state for an explore screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryConfig {
    pub filter: FilterCriteria,
    pub sort: Option<SortSpec>,
    pub group_by: Option<GroupBy>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<'a, T> {
    /// Filtered and sorted items
    pub items: Vec<&'a T>,
    /// Present when the query asked for grouping
    pub groups: Option<BTreeMap<String, Vec<&'a T>>>,
}

/// A property offering as listed on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    pub id: String,
    pub name: String,
    pub location: String,
    pub sponsor: String,
    pub property_type: String,
    #[serde(default)]
    pub risk_score: Option<Decimal>,
    #[serde(default)]
    pub target_return_pct: Option<Decimal>,
    #[serde(default)]
    pub minimum_investment: Option<Decimal>,
    pub funding: FundingRecord,
    /// Filled in by status derivation; never read from the feed.
    #[serde(default)]
    pub status: Option<DerivedStatus>,
}

/// An investor's position in one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPosition {
    pub id: String,
    pub property_name: String,
    pub location: String,
    pub sponsor: String,
    pub property_type: String,
    #[serde(default)]
    pub risk_score: Option<Decimal>,
    pub amount_invested: Decimal,
    pub current_value: Decimal,
    pub status: String,
    pub invested_at: DateTime<Utc>,
}
