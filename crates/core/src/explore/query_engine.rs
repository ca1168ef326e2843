//! Filter, sort, and group stages for explore screens.
//!
//! The stages are independent and, when combined, run in that order.
//! Grouping preserves the order produced by the sort stage.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;

use super::{
    Explorable, FieldValue, FilterCriteria, GroupBy, NumericRange, QueryConfig, QueryResult,
    SortDirection, SortSpec,
};
use crate::constants::{LOW_RISK_MAX_SCORE, MEDIUM_RISK_MAX_SCORE};

pub const RISK_LOW: &str = "Low";
pub const RISK_MEDIUM: &str = "Medium";
pub const RISK_HIGH: &str = "High";
pub const RISK_UNRATED: &str = "Unrated";
const UNKNOWN_GROUP: &str = "Unknown";

/// Risk bucket label for a score.
pub fn risk_bucket(score: Option<Decimal>) -> &'static str {
    match score {
        None => RISK_UNRATED,
        Some(s) if s <= Decimal::from(LOW_RISK_MAX_SCORE) => RISK_LOW,
        Some(s) if s <= Decimal::from(MEDIUM_RISK_MAX_SCORE) => RISK_MEDIUM,
        Some(_) => RISK_HIGH,
    }
}

fn contains_ignore_case(set: &BTreeSet<String>, value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    set.iter().any(|candidate| candidate.eq_ignore_ascii_case(value))
}

fn in_range<T: Explorable>(item: &T, range: &NumericRange) -> bool {
    match item.field(&range.field) {
        Some(FieldValue::Number(value)) => {
            range.min.map_or(true, |min| value >= min)
                && range.max.map_or(true, |max| value <= max)
        }
        _ => false,
    }
}

/// Whether `item` satisfies every predicate in `criteria`.
pub fn matches<T: Explorable>(item: &T, criteria: &FilterCriteria) -> bool {
    if let Some(search) = criteria.search.as_deref().map(str::trim) {
        if !search.is_empty() {
            let needle = search.to_lowercase();
            let found = item
                .search_texts()
                .iter()
                .any(|text| text.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }
    }

    if !criteria.categories.is_empty()
        && !contains_ignore_case(&criteria.categories, item.category())
    {
        return false;
    }

    if !criteria.statuses.is_empty()
        && !contains_ignore_case(&criteria.statuses, item.status_label())
    {
        return false;
    }

    criteria.ranges.iter().all(|range| in_range(item, range))
}

pub fn filter_items<'a, T: Explorable>(items: &'a [T], criteria: &FilterCriteria) -> Vec<&'a T> {
    items.iter().filter(|item| matches(*item, criteria)).collect()
}

fn kind_rank(value: &FieldValue) -> u8 {
    match value {
        FieldValue::Number(_) => 0,
        FieldValue::Date(_) => 1,
        FieldValue::Text(_) => 2,
    }
}

/// Zero of the same kind, standing in for a missing value.
fn zero_like(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(_) => FieldValue::Text(String::new()),
        FieldValue::Number(_) => FieldValue::Number(Decimal::ZERO),
        FieldValue::Date(_) => FieldValue::Date(DateTime::<Utc>::default()),
    }
}

fn compare_present(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => x
            .to_lowercase()
            .cmp(&y.to_lowercase())
            .then_with(|| x.cmp(y)),
        (FieldValue::Number(x), FieldValue::Number(y)) => x.cmp(y),
        (FieldValue::Date(x), FieldValue::Date(y)) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Ascending comparison; a missing value sorts as its counterpart's zero.
pub fn compare_field_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => compare_present(x, y),
        (Some(x), None) => compare_present(x, &zero_like(x)),
        (None, Some(y)) => compare_present(&zero_like(y), y),
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort by the requested field and direction. Field values are looked
/// up once per item.
pub fn sort_items<T: Explorable>(items: &mut [&T], sort: &SortSpec) {
    let mut keyed: Vec<(Option<FieldValue>, &T)> = items
        .iter()
        .map(|item| (item.field(&sort.field), *item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = compare_field_values(a.as_ref(), b.as_ref());
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    for (slot, (_, item)) in items.iter_mut().zip(keyed) {
        *slot = item;
    }
}

/// Group label of an item.
pub fn group_label<T: Explorable>(item: &T, group_by: &GroupBy) -> String {
    match group_by {
        GroupBy::Risk => risk_bucket(item.risk_score()).to_string(),
        GroupBy::Category => item.category().unwrap_or(UNKNOWN_GROUP).to_string(),
        GroupBy::Status => item.status_label().unwrap_or(UNKNOWN_GROUP).to_string(),
        GroupBy::Field(name) => item
            .field(name)
            .map(|value| value.label())
            .unwrap_or_else(|| UNKNOWN_GROUP.to_string()),
    }
}

/// Partitions items by label, keeping their incoming order inside each group.
pub fn group_items<'a, T: Explorable>(
    items: &[&'a T],
    group_by: &GroupBy,
) -> BTreeMap<String, Vec<&'a T>> {
    let mut groups: BTreeMap<String, Vec<&'a T>> = BTreeMap::new();
    for item in items {
        groups.entry(group_label(*item, group_by)).or_default().push(*item);
    }
    groups
}

/// Runs filter, then sort, then group.
pub fn apply_query<'a, T: Explorable>(
    items: &'a [T],
    config: &QueryConfig,
) -> QueryResult<'a, T> {
    let mut selected = filter_items(items, &config.filter);
    if let Some(sort) = &config.sort {
        sort_items(&mut selected, sort);
    }
    let groups = config
        .group_by
        .as_ref()
        .map(|group_by| group_items(&selected, group_by));

    debug!(
        "Explore query kept {} of {} items{}",
        selected.len(),
        items.len(),
        groups
            .as_ref()
            .map(|g| format!(" in {} groups", g.len()))
            .unwrap_or_default()
    );

    QueryResult {
        items: selected,
        groups,
    }
}
