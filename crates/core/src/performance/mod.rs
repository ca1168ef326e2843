//! Performance module - value history and range-based series selection.

mod performance_model;
mod series_selector;

pub use performance_model::{PerformanceSnapshot, SelectionTier, SeriesChange, SeriesSelection};
pub use series_selector::{select_series, select_series_detailed, series_change};
