//! Turns a [`RangeToken`] and an anchor instant into a concrete [`DateWindow`].
//!
//! Rules:
//! - Fixed lookbacks subtract N days from the anchor
//! - `ytd` starts on Jan 1 of the anchor's year, `today` at local midnight
//! - `all` starts at the first activity (or Jan 1 of the prior year without one)
//! - The start never precedes the first activity
//! - The end is the anchor plus one day; membership is inclusive
//! - Shifts saturate at the representable instant range

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

use super::{DateWindow, RangeToken};
use crate::utils::time_utils::{
    saturating_add_days, start_of_day_utc, valuation_date_from_utc, DEFAULT_VALUATION_TZ,
};

/// Calculates a window on the default (UTC) calendar.
pub fn calculate_window(
    range: RangeToken,
    anchor: DateTime<Utc>,
    first_activity: Option<DateTime<Utc>>,
) -> DateWindow {
    calculate_window_in_tz(range, anchor, first_activity, DEFAULT_VALUATION_TZ)
}

/// Calculates a window, resolving calendar boundaries in `tz`.
pub fn calculate_window_in_tz(
    range: RangeToken,
    anchor: DateTime<Utc>,
    first_activity: Option<DateTime<Utc>>,
    tz: Tz,
) -> DateWindow {
    let anchor_date = valuation_date_from_utc(anchor, tz);

    let start = match range {
        RangeToken::OneMonth
        | RangeToken::ThreeMonths
        | RangeToken::SixMonths
        | RangeToken::OneYear => {
            let days = range.lookback_days().unwrap_or_default();
            saturating_add_days(anchor, -days)
        }
        RangeToken::YearToDate => jan_first(anchor_date.year(), tz).unwrap_or(anchor),
        RangeToken::All => match first_activity {
            Some(first) => first,
            None => jan_first(anchor_date.year() - 1, tz).unwrap_or(anchor),
        },
        RangeToken::Today => start_of_day_utc(anchor_date, tz),
    };

    let start = match first_activity {
        Some(first) if start < first => first,
        _ => start,
    };

    DateWindow::new(start, saturating_add_days(anchor, 1))
}

fn jan_first(year: i32, tz: Tz) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, 1, 1).map(|date| start_of_day_utc(date, tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_all_starts_at_first_activity() {
        let window = calculate_window(RangeToken::All, at(2024, 6, 1), Some(at(2023, 1, 1)));
        assert_eq!(window.start, at(2023, 1, 1));
        assert_eq!(window.end, at(2024, 6, 2));
    }

    #[test]
    fn test_one_year_is_clamped_to_first_activity() {
        let window = calculate_window(RangeToken::OneYear, at(2024, 6, 1), Some(at(2024, 5, 1)));
        assert_eq!(window.start, at(2024, 5, 1));
    }

    #[test]
    fn test_one_year_without_clamp() {
        let window = calculate_window(RangeToken::OneYear, at(2024, 6, 1), Some(at(2020, 1, 1)));
        assert_eq!(window.start, at(2023, 6, 2));
    }

    #[test]
    fn test_fixed_lookbacks() {
        let anchor = at(2024, 6, 1);
        let cases = [
            (RangeToken::OneMonth, 30),
            (RangeToken::ThreeMonths, 90),
            (RangeToken::SixMonths, 182),
            (RangeToken::OneYear, 365),
        ];
        for (token, days) in cases {
            let window = calculate_window(token, anchor, None);
            assert_eq!(window.start, anchor - Duration::days(days), "{token}");
        }
    }

    #[test]
    fn test_ytd_starts_on_january_first() {
        let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 15, 30, 0).unwrap();
        let window = calculate_window(RangeToken::YearToDate, anchor, None);
        assert_eq!(window.start, at(2024, 1, 1));
    }

    #[test]
    fn test_all_without_first_activity_uses_prior_year() {
        let window = calculate_window(RangeToken::All, at(2024, 6, 1), None);
        assert_eq!(window.start, at(2023, 1, 1));
    }

    #[test]
    fn test_today_starts_at_local_midnight() {
        let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 2, 0, 0).unwrap();
        let utc_window = calculate_window(RangeToken::Today, anchor, None);
        assert_eq!(utc_window.start, at(2024, 6, 1));

        // 02:00Z is still May 31 in New York (EDT, UTC-4).
        let ny_window =
            calculate_window_in_tz(RangeToken::Today, anchor, None, chrono_tz::America::New_York);
        assert_eq!(ny_window.start, Utc.with_ymd_and_hms(2024, 5, 31, 4, 0, 0).unwrap());
    }

    #[test]
    fn test_end_epsilon_includes_anchor_instant() {
        let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let window = calculate_window(RangeToken::OneMonth, anchor, None);
        assert!(window.contains(anchor));
        assert!(window.contains(anchor + Duration::days(1)));
        assert!(!window.contains(anchor + Duration::days(1) + Duration::seconds(1)));
    }

    #[test]
    fn test_extreme_anchors_saturate() {
        let max = DateTime::<Utc>::MAX_UTC;
        let window = calculate_window(RangeToken::OneMonth, max, None);
        assert_eq!(window.end, max);
        assert_eq!(window.start, max - Duration::days(30));
        assert!(window.contains(max));

        let min = DateTime::<Utc>::MIN_UTC;
        let window = calculate_window(RangeToken::OneYear, min, None);
        assert_eq!(window.start, min);
        assert_eq!(window.end, min + Duration::days(1));
    }
}
