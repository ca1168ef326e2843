use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Default calendar for windows and monthly buckets.
pub const DEFAULT_VALUATION_TZ: Tz = chrono_tz::UTC;

/// Converts a UTC instant to a calendar date in the given timezone.
///
/// This is the single source of truth for converting instants to domain dates.
pub fn valuation_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Returns the UTC instant of local midnight for `date` in `tz`.
///
/// When midnight falls into a DST gap the first valid instant of the day is
/// used; when it is ambiguous the earlier instant wins.
pub fn start_of_day_utc(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // DST gaps are at most an hour or two; walk forward until valid.
            (1..=4)
                .filter_map(|h| date.and_hms_opt(h, 0, 0))
                .find_map(|local| tz.from_local_datetime(&local).earliest())
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
        }
    }
}

/// Shifts `instant` by whole days, saturating at the representable range.
pub fn saturating_add_days(instant: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    match instant.checked_add_signed(Duration::days(days)) {
        Some(shifted) => shifted,
        None if days < 0 => DateTime::<Utc>::MIN_UTC,
        None => DateTime::<Utc>::MAX_UTC,
    }
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month following `month_start`.
pub fn next_month(month_start: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if month_start.month() == 12 {
        (month_start.year() + 1, 1)
    } else {
        (month_start.year(), month_start.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Returns every month start from the month of `start` through the month of
/// `end`, inclusive. Empty when `start > end`.
pub fn get_months_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    let last = first_of_month(end);
    let mut months = Vec::new();
    let mut current = first_of_month(start);
    while current <= last {
        months.push(current);
        match next_month(current) {
            Some(next) => current = next,
            None => break,
        }
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_months_between_crosses_year() {
        let months = get_months_between(d(2023, 11, 15), d(2024, 2, 3));
        assert_eq!(
            months,
            vec![d(2023, 11, 1), d(2023, 12, 1), d(2024, 1, 1), d(2024, 2, 1)]
        );
    }

    #[test]
    fn test_months_between_reversed_is_empty() {
        assert!(get_months_between(d(2024, 3, 1), d(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_start_of_day_in_new_york() {
        let start = start_of_day_utc(d(2024, 6, 1), chrono_tz::America::New_York);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 6, 1, 4, 0, 0).unwrap());
    }

    #[test]
    fn test_valuation_date_shifts_with_timezone() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap();
        assert_eq!(valuation_date_from_utc(instant, chrono_tz::UTC), d(2024, 1, 1));
        assert_eq!(
            valuation_date_from_utc(instant, chrono_tz::America::New_York),
            d(2023, 12, 31)
        );
    }
}
