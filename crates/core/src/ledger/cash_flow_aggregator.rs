//! Monthly cash-flow rollups.

use std::collections::HashMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use log::debug;
use rust_decimal::Decimal;

use super::flow_classifier::flow_direction;
use super::{FinancialEvent, FlowDirection, MonthlyBucket};
use crate::utils::time_utils::{
    first_of_month, get_months_between, saturating_add_days, valuation_date_from_utc,
};
use crate::windows::DateWindow;

#[derive(Default)]
struct MonthTotals {
    inflow: Decimal,
    outflow: Decimal,
    count: u32,
}

/// Builds one bucket per calendar month from the window start through the
/// anchor's month, including months without events. Events outside the
/// window are ignored; events in the trailing one-day epsilon count toward
/// the anchor's month.
///
/// The running balance is a left fold of each month's net flow, starting at
/// zero with the earliest month. Sums saturate at the `Decimal` range.
pub fn aggregate_monthly(
    events: &[FinancialEvent],
    window: &DateWindow,
    tz: Tz,
) -> Vec<MonthlyBucket> {
    let anchor = saturating_add_days(window.end, -1);
    let last_month = first_of_month(valuation_date_from_utc(anchor, tz));
    let months = get_months_between(valuation_date_from_utc(window.start, tz), last_month);

    let mut totals: HashMap<NaiveDate, MonthTotals> = HashMap::new();
    for event in events.iter().filter(|e| window.contains(e.occurred_at)) {
        let month = first_of_month(valuation_date_from_utc(event.occurred_at, tz));
        let entry = totals.entry(month.min(last_month)).or_default();
        let amount = event.abs_amount();
        match flow_direction(event) {
            FlowDirection::Inflow => entry.inflow = entry.inflow.saturating_add(amount),
            FlowDirection::Outflow => entry.outflow = entry.outflow.saturating_add(amount),
        }
        entry.count += 1;
    }

    let buckets: Vec<MonthlyBucket> = months
        .into_iter()
        .scan(Decimal::ZERO, |running_balance, month| {
            let month_totals = totals.remove(&month).unwrap_or_default();
            let net_flow = month_totals.inflow - month_totals.outflow;
            *running_balance = running_balance.saturating_add(net_flow);
            Some(MonthlyBucket {
                month,
                label: month.format("%Y-%m").to_string(),
                inflow: month_totals.inflow,
                outflow: month_totals.outflow,
                net_flow,
                running_balance: *running_balance,
                event_count: month_totals.count,
            })
        })
        .collect();

    debug!(
        "Aggregated {} events into {} monthly buckets",
        events.len(),
        buckets.len()
    );
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::EventType;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn event(
        id: &str,
        event_type: EventType,
        amount: Decimal,
        when: DateTime<Utc>,
    ) -> FinancialEvent {
        FinancialEvent::new(id, "inv-1", event_type, amount, when)
    }

    #[test]
    fn test_running_balance_accumulates() {
        let events = vec![
            event("a", EventType::DistributionIncome, dec!(100), at(2024, 1, 10)),
            event("b", EventType::FeeMgmt, dec!(-50), at(2024, 2, 10)),
            event("c", EventType::SaleProceeds, dec!(200), at(2024, 3, 10)),
        ];
        let window = DateWindow::new(at(2024, 1, 1), at(2024, 3, 31));
        let buckets = aggregate_monthly(&events, &window, chrono_tz::UTC);

        let net: Vec<Decimal> = buckets.iter().map(|b| b.net_flow).collect();
        let running: Vec<Decimal> = buckets.iter().map(|b| b.running_balance).collect();
        assert_eq!(net, vec![dec!(100), dec!(-50), dec!(200)]);
        assert_eq!(running, vec![dec!(100), dec!(50), dec!(250)]);
    }

    #[test]
    fn test_months_without_events_are_present() {
        let events = vec![
            event("a", EventType::Contribution, dec!(1000), at(2024, 1, 5)),
            event("b", EventType::DistributionIncome, dec!(30), at(2024, 4, 5)),
        ];
        let window = DateWindow::new(at(2024, 1, 1), at(2024, 4, 30));
        let buckets = aggregate_monthly(&events, &window, chrono_tz::UTC);

        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-01", "2024-02", "2024-03", "2024-04"]);
        assert_eq!(buckets[1].event_count, 0);
        assert_eq!(buckets[1].net_flow, Decimal::ZERO);
        assert_eq!(buckets[2].running_balance, dec!(-1000));
        assert_eq!(buckets[3].running_balance, dec!(-970));
    }

    #[test]
    fn test_events_outside_window_are_ignored() {
        let events = vec![
            event("old", EventType::Contribution, dec!(1000), at(2023, 12, 5)),
            event("in", EventType::Interest, dec!(10), at(2024, 1, 5)),
        ];
        let window = DateWindow::new(at(2024, 1, 1), at(2024, 1, 31));
        let buckets = aggregate_monthly(&events, &window, chrono_tz::UTC);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].inflow, dec!(10));
        assert_eq!(buckets[0].outflow, Decimal::ZERO);
    }

    #[test]
    fn test_month_assignment_uses_timezone() {
        // 2024-02-01 03:00Z is still January 31 in New York.
        let when = Utc.with_ymd_and_hms(2024, 2, 1, 3, 0, 0).unwrap();
        let events = vec![event("a", EventType::Dividend, dec!(5), when)];
        let window = DateWindow::new(at(2024, 1, 1), at(2024, 2, 20));
        let buckets = aggregate_monthly(&events, &window, chrono_tz::America::New_York);
        assert_eq!(buckets[0].label, "2024-01");
        assert_eq!(buckets[0].inflow, dec!(5));
        assert_eq!(buckets[1].inflow, Decimal::ZERO);
    }

    #[test]
    fn test_anchor_on_month_end_adds_no_trailing_month() {
        let anchor = at(2024, 6, 30);
        let events = vec![
            event("a", EventType::Contribution, dec!(-500), at(2024, 6, 10)),
            event("b", EventType::Interest, dec!(4), anchor + chrono::Duration::hours(6)),
        ];
        let window = DateWindow::new(at(2024, 6, 1), anchor + chrono::Duration::days(1));
        let buckets = aggregate_monthly(&events, &window, chrono_tz::UTC);

        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-06"]);
        assert_eq!(buckets[0].event_count, 2);
        assert_eq!(buckets[0].running_balance, dec!(-496));
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let events = vec![
            event("a", EventType::Dividend, Decimal::MAX, at(2024, 1, 5)),
            event("b", EventType::Dividend, Decimal::MAX, at(2024, 1, 6)),
        ];
        let window = DateWindow::new(at(2024, 1, 1), at(2024, 1, 31));
        let buckets = aggregate_monthly(&events, &window, chrono_tz::UTC);
        assert_eq!(buckets[0].inflow, Decimal::MAX);
        assert_eq!(buckets[0].running_balance, Decimal::MAX);
    }
}
