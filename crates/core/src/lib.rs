//! Estatefolio Core - Portfolio analytics and offering status derivation.
//!
//! Pure, synchronous calculations over caller-supplied collections:
//! offering status, date-range windows, performance series selection,
//! ledger classification and monthly rollups, headline KPIs, and the
//! filter/sort/group stages behind explore screens.

pub mod analytics;
pub mod config;
pub mod constants;
pub mod errors;
pub mod explore;
pub mod funding;
pub mod kpi;
pub mod ledger;
pub mod performance;
pub mod utils;
pub mod windows;

pub use analytics::AnalyticsService;
pub use config::AnalyticsConfig;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
