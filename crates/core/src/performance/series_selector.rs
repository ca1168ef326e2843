//! Selects the slice of a performance series to chart for a range.
//!
//! Selection degrades through fallback tiers instead of returning an empty
//! chart while data exists:
//!
//! 1. Window anchored at `now`
//! 2. Same range anchored at the latest point (skipped for `all`)
//! 3. `all` anchored at the latest point

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::{PerformanceSnapshot, SelectionTier, SeriesChange, SeriesSelection};
use crate::utils::time_utils::DEFAULT_VALUATION_TZ;
use crate::windows::{calculate_window_in_tz, DateWindow, RangeToken};

/// Selects points for `range` on the default calendar.
pub fn select_series(
    all_points: &[PerformanceSnapshot],
    range: RangeToken,
    now: DateTime<Utc>,
) -> Vec<PerformanceSnapshot> {
    select_series_detailed(all_points, range, now, DEFAULT_VALUATION_TZ).points
}

/// Selects points for `range` and reports which tier produced them.
pub fn select_series_detailed(
    all_points: &[PerformanceSnapshot],
    range: RangeToken,
    now: DateTime<Utc>,
    tz: Tz,
) -> SeriesSelection {
    let mut sorted = all_points.to_vec();
    sorted.sort_by_key(|point| point.date);

    let (first_activity, latest) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => {
            return SeriesSelection {
                points: Vec::new(),
                tier: SelectionTier::Empty,
                window: None,
            }
        }
    };

    let window = calculate_window_in_tz(range, now, Some(first_activity), tz);
    let points = points_in_window(&sorted, &window);
    if !points.is_empty() {
        debug!("Series selection for {}: {} points", range, points.len());
        return SeriesSelection {
            points,
            tier: SelectionTier::Current,
            window: Some(window),
        };
    }

    if range != RangeToken::All {
        let window = calculate_window_in_tz(range, latest, Some(first_activity), tz);
        let points = points_in_window(&sorted, &window);
        if !points.is_empty() {
            warn!(
                "No {} data relative to {}; re-anchored at latest point {}",
                range, now, latest
            );
            return SeriesSelection {
                points,
                tier: SelectionTier::LatestPoint,
                window: Some(window),
            };
        }
    }

    let window = calculate_window_in_tz(RangeToken::All, latest, Some(first_activity), tz);
    warn!(
        "No {} data near latest point {}; falling back to full history",
        range, latest
    );
    SeriesSelection {
        points: points_in_window(&sorted, &window),
        tier: SelectionTier::AllHistory,
        window: Some(window),
    }
}

fn points_in_window(
    sorted: &[PerformanceSnapshot],
    window: &DateWindow,
) -> Vec<PerformanceSnapshot> {
    sorted
        .iter()
        .filter(|point| window.contains(point.date))
        .cloned()
        .collect()
}

/// Value change between the first and last point of a selection.
pub fn series_change(points: &[PerformanceSnapshot]) -> Option<SeriesChange> {
    let first = points.first()?;
    let last = points.last()?;
    let amount = last.portfolio_value.saturating_sub(first.portfolio_value);
    let percent = if first.portfolio_value.is_zero() {
        Decimal::ZERO
    } else {
        amount
            .checked_div(first.portfolio_value)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    };
    Some(SeriesChange {
        start_value: first.portfolio_value,
        end_value: last.portfolio_value,
        amount,
        percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn point(date: DateTime<Utc>, value: Decimal) -> PerformanceSnapshot {
        PerformanceSnapshot {
            date,
            portfolio_value: value,
            net_return_pct: Decimal::ZERO,
            net_contribution: Decimal::ZERO,
        }
    }

    #[test]
    fn test_empty_input_returns_empty() {
        let selection =
            select_series_detailed(&[], RangeToken::OneMonth, at(2024, 6, 1), DEFAULT_VALUATION_TZ);
        assert!(selection.points.is_empty());
        assert_eq!(selection.tier, SelectionTier::Empty);
        assert!(selection.window.is_none());
    }

    #[test]
    fn test_current_window_filters_and_sorts() {
        let now = at(2024, 6, 1);
        let points = vec![
            point(now - Duration::days(5), dec!(105)),
            point(now - Duration::days(200), dec!(90)),
            point(now - Duration::days(20), dec!(100)),
        ];
        let selection =
            select_series_detailed(&points, RangeToken::OneMonth, now, DEFAULT_VALUATION_TZ);
        assert_eq!(selection.tier, SelectionTier::Current);
        let values: Vec<Decimal> = selection.points.iter().map(|p| p.portfolio_value).collect();
        assert_eq!(values, vec![dec!(100), dec!(105)]);
    }

    #[test]
    fn test_stale_series_falls_back_to_latest_point() {
        let points = vec![
            point(at(2023, 1, 1), dec!(130)),
            point(at(2022, 12, 1), dec!(120)),
            point(at(2022, 11, 1), dec!(110)),
            point(at(2022, 6, 1), dec!(100)),
        ];
        let selection = select_series_detailed(
            &points,
            RangeToken::ThreeMonths,
            at(2024, 6, 1),
            DEFAULT_VALUATION_TZ,
        );
        assert_eq!(selection.tier, SelectionTier::LatestPoint);
        let dates: Vec<DateTime<Utc>> = selection.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![at(2022, 11, 1), at(2022, 12, 1), at(2023, 1, 1)]);
    }

    #[test]
    fn test_all_range_returns_everything() {
        let points = vec![point(at(2020, 1, 1), dec!(1)), point(at(2021, 1, 1), dec!(2))];
        let selected = select_series(&points, RangeToken::All, at(2024, 6, 1));
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_future_dated_series_re_anchors_at_latest_point() {
        // Clamping to the first activity pushes the start past `now + 1 day`.
        let points = vec![point(at(2030, 1, 1), dec!(1)), point(at(2030, 2, 1), dec!(2))];
        let selection = select_series_detailed(
            &points,
            RangeToken::Today,
            at(2024, 6, 1),
            DEFAULT_VALUATION_TZ,
        );
        assert_eq!(selection.tier, SelectionTier::LatestPoint);
        assert_eq!(selection.points.len(), 1);
    }

    #[test]
    fn test_future_dated_all_range_uses_all_history_tier() {
        let points = vec![point(at(2030, 1, 1), dec!(1)), point(at(2030, 2, 1), dec!(2))];
        let selection =
            select_series_detailed(&points, RangeToken::All, at(2024, 6, 1), DEFAULT_VALUATION_TZ);
        assert_eq!(selection.tier, SelectionTier::AllHistory);
        assert_eq!(selection.points.len(), 2);
    }

    #[test]
    fn test_snapshot_at_max_instant_does_not_overflow() {
        let latest = DateTime::<Utc>::MAX_UTC;
        let points = vec![point(latest, dec!(10))];
        let selection = select_series_detailed(
            &points,
            RangeToken::OneMonth,
            at(2024, 6, 1),
            DEFAULT_VALUATION_TZ,
        );
        assert_eq!(selection.tier, SelectionTier::LatestPoint);
        assert_eq!(selection.points.len(), 1);
        assert_eq!(select_series(&points, RangeToken::OneYear, latest).len(), 1);
    }

    #[test]
    fn test_series_change() {
        let points = vec![point(at(2024, 1, 1), dec!(200)), point(at(2024, 2, 1), dec!(250))];
        let change = series_change(&points).unwrap();
        assert_eq!(change.amount, dec!(50));
        assert_eq!(change.percent, dec!(25));
        assert!(series_change(&[]).is_none());
    }

    #[test]
    fn test_series_change_from_zero_is_zero_percent() {
        let points = vec![point(at(2024, 1, 1), dec!(0)), point(at(2024, 2, 1), dec!(10))];
        assert_eq!(series_change(&points).unwrap().percent, Decimal::ZERO);
    }
}
