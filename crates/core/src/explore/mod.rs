//! Explore module - filtering, sorting, and grouping of listings,
//! positions, and ledger events.

mod explorable;
mod explore_model;
mod query_engine;


pub use explorable::Explorable;
pub use explore_model::{
    FieldValue, FilterCriteria, GroupBy, InvestmentPosition, NumericRange, PropertyListing,
    QueryConfig, QueryResult, SortDirection, SortSpec,
};
pub use query_engine::{
    apply_query, compare_field_values, filter_items, group_items, group_label, matches,
    risk_bucket, sort_items, RISK_HIGH, RISK_LOW, RISK_MEDIUM, RISK_UNRATED,
};
