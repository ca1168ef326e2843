//! Analytics module - configured entry point over the calculation modules.

mod analytics_service;


pub use analytics_service::AnalyticsService;
