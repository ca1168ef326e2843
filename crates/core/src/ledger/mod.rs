//! Ledger module - financial events, flow classification, and rollups.

mod cash_flow_aggregator;
mod flow_classifier;
mod ledger_model;
mod realized_gains;

pub use cash_flow_aggregator::aggregate_monthly;
pub use flow_classifier::{
    classify, counted_events, flow_category, flow_direction, is_counted, FlowPartition,
};
pub use ledger_model::{
    EventStatus, EventType, FinancialEvent, FlowCategory, FlowDirection, FlowTotals,
    MonthlyBucket, PositionGain, RealizedGains,
};
pub use realized_gains::realized_gains;
