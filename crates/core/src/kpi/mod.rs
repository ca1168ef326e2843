//! KPI module - headline metrics, range scaling, and CSV export.

mod export;
mod kpi_calculator;
mod kpi_model;

pub use export::{flow_totals_to_csv, kpi_bundle_to_csv, monthly_buckets_to_csv};
pub use kpi_calculator::{
    build_kpi_bundle, dpi, moic, net_return_pct, range_adjusted_values, range_multiplier, tvpi,
};
pub use kpi_model::{KpiBundle, KpiInputs, RangeAdjustedValues};
