use chrono::{DateTime, Utc};
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::config::AnalyticsConfig;
use crate::explore::{apply_query, Explorable, PropertyListing, QueryConfig, QueryResult};
use crate::funding::{derive_status_with_config, DerivedStatus, FundingRecord};
use crate::kpi::{
    build_kpi_bundle, range_adjusted_values, KpiBundle, KpiInputs, RangeAdjustedValues,
};
use crate::ledger::{
    aggregate_monthly, classify, counted_events, realized_gains, FinancialEvent, FlowTotals,
    MonthlyBucket, RealizedGains,
};
use crate::performance::{select_series_detailed, PerformanceSnapshot, SeriesSelection};
use crate::windows::{calculate_window_in_tz, DateWindow, RangeToken};
use crate::Result;

/// Entry point bundling configuration and the reference clock.
///
/// Holds no mutable state; share it behind an `Arc` if needed.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    config: AnalyticsConfig,
    pinned_now: Option<DateTime<Utc>>,
}

impl AnalyticsService {
    pub fn new(config: AnalyticsConfig) -> Result<Self> {
        config.validate()?;
        Ok(AnalyticsService {
            config,
            pinned_now: None,
        })
    }

    /// Service whose "now" is fixed at `now`.
    pub fn with_clock(config: AnalyticsConfig, now: DateTime<Utc>) -> Result<Self> {
        let mut service = Self::new(config)?;
        service.pinned_now = Some(now);
        Ok(service)
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.pinned_now.unwrap_or_else(Utc::now)
    }

    fn counted(&self, events: &[FinancialEvent]) -> Vec<FinancialEvent> {
        let counted = counted_events(events, self.config.include_pending_events);
        let dropped = events.len() - counted.len();
        if dropped > 0 {
            warn!(
                "Ignoring {} of {} events with a non-counted status",
                dropped,
                events.len()
            );
        }
        counted
    }

    pub fn status(&self, record: &FundingRecord) -> Result<DerivedStatus> {
        derive_status_with_config(record, self.now(), &self.config)
    }

    /// Fills the derived status of every listing. Stops at the first invalid record.
    pub fn annotate_listings(&self, listings: &mut [PropertyListing]) -> Result<()> {
        let now = self.now();
        for listing in listings.iter_mut() {
            let status = derive_status_with_config(&listing.funding, now, &self.config)?;
            listing.status = Some(status);
        }
        debug!("Annotated {} listings with derived status", listings.len());
        Ok(())
    }

    pub fn window(&self, range: RangeToken, first_activity: Option<DateTime<Utc>>) -> DateWindow {
        calculate_window_in_tz(range, self.now(), first_activity, self.config.timezone)
    }

    pub fn series(&self, points: &[PerformanceSnapshot], range: RangeToken) -> SeriesSelection {
        select_series_detailed(points, range, self.now(), self.config.timezone)
    }

    pub fn classify_totals(&self, events: &[FinancialEvent]) -> FlowTotals {
        let counted = self.counted(events);
        classify(&counted).totals()
    }

    /// Monthly buckets for `range`, clamped to the earliest counted event.
    pub fn monthly_cash_flow(
        &self,
        events: &[FinancialEvent],
        range: RangeToken,
    ) -> Vec<MonthlyBucket> {
        let counted = self.counted(events);
        let first_activity = counted.iter().map(|event| event.occurred_at).min();
        let window = self.window(range, first_activity);
        aggregate_monthly(&counted, &window, self.config.timezone)
    }

    pub fn realized_gains(&self, events: &[FinancialEvent]) -> RealizedGains {
        realized_gains(&self.counted(events))
    }

    pub fn kpi_bundle(&self, events: &[FinancialEvent], current_value: Decimal) -> KpiBundle {
        build_kpi_bundle(&self.counted(events), current_value)
    }

    pub fn range_adjusted(
        &self,
        events: &[FinancialEvent],
        current_value: Decimal,
        range: RangeToken,
    ) -> RangeAdjustedValues {
        let totals = self.classify_totals(events);
        let inputs = KpiInputs {
            total_invested: totals.total_contributions,
            current_value,
            total_distributions: totals.total_distributions,
        };
        range_adjusted_values(&inputs, range)
    }

    pub fn explore<'a, T: Explorable>(
        &self,
        items: &'a [T],
        query: &QueryConfig,
    ) -> QueryResult<'a, T> {
        apply_query(items, query)
    }
}
