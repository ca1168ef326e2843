//! Windows module - range tokens and concrete date windows.

mod window_calculator;
mod window_model;

pub use window_calculator::{calculate_window, calculate_window_in_tz};
pub use window_model::{DateWindow, RangeToken};
