//! Funding module - offering records and status derivation.

mod funding_model;
mod status_deriver;

pub use funding_model::{DerivedStatus, FundingRecord};
pub use status_deriver::{
    days_to_deadline, derive_status, derive_status_with_config, funding_progress,
};
