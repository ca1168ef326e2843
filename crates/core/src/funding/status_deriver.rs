//! Offering status derivation.
//!
//! Maps a [`FundingRecord`] to exactly one [`DerivedStatus`] using a fixed
//! precedence chain:
//!
//! 1. FUNDED-class (progress >= 100, closed raw status, or no capacity left),
//!    reported as WAITLIST when the waitlist is open
//! 2. CLOSING_SOON for open offerings near target or near deadline
//! 3. FUNDING for open offerings below target
//! 4. WAITLIST when explicitly requested
//! 5. FUNDING otherwise

use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;

use super::{DerivedStatus, FundingRecord};
use crate::config::AnalyticsConfig;
use crate::constants::{FULLY_FUNDED_PROGRESS_PCT, MILLIS_PER_DAY};
use crate::errors::{ContractViolation, Result};

/// What a normalized raw status says about the raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawStatusClass {
    /// Unset or one of the accepting-money statuses
    Open,
    Closed,
    Waitlist,
    Unrecognized,
}

fn raw_status_class(raw: Option<&str>) -> RawStatusClass {
    match raw {
        None | Some("available" | "funding") => RawStatusClass::Open,
        Some("funded" | "closed" | "fully_funded" | "completed") => RawStatusClass::Closed,
        Some("waitlist") => RawStatusClass::Waitlist,
        Some(_) => RawStatusClass::Unrecognized,
    }
}

/// Funding progress in percent. A zero target yields zero progress.
pub fn funding_progress(record: &FundingRecord) -> Decimal {
    if record.target_funding.is_zero() {
        return Decimal::ZERO;
    }
    record
        .current_funding
        .checked_div(record.target_funding)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Whole days until the funding deadline, rounded up. `None` without a deadline.
pub fn days_to_deadline(record: &FundingRecord, now: DateTime<Utc>) -> Option<i64> {
    record.funding_deadline.map(|deadline| {
        let millis = (deadline - now).num_milliseconds();
        ceil_div(millis, MILLIS_PER_DAY)
    })
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator.div_euclid(denominator);
    if numerator.rem_euclid(denominator) == 0 {
        quotient
    } else {
        quotient + 1
    }
}

/// Derives the status using default thresholds.
pub fn derive_status(record: &FundingRecord, now: DateTime<Utc>) -> Result<DerivedStatus> {
    derive_status_with_config(record, now, &AnalyticsConfig::default())
}

/// Derives the status of an offering.
///
/// Returns an error only when the record violates its contract (negative
/// funding amounts). Every valid record maps to exactly one status.
pub fn derive_status_with_config(
    record: &FundingRecord,
    now: DateTime<Utc>,
    config: &AnalyticsConfig,
) -> Result<DerivedStatus> {
    validate_record(record)?;

    let progress = funding_progress(record);
    let raw_status = record.normalized_raw_status();
    let raw_class = raw_status_class(raw_status.as_deref());

    let is_funded_class = progress >= Decimal::from(FULLY_FUNDED_PROGRESS_PCT)
        || raw_class == RawStatusClass::Closed
        || record.capacity_remaining.is_some_and(|c| c <= 0);

    if is_funded_class {
        return Ok(if record.waitlist_open {
            DerivedStatus::Waitlist
        } else {
            DerivedStatus::Funded
        });
    }

    if raw_class == RawStatusClass::Open {
        let near_target = progress >= config.closing_soon_progress_pct;
        let near_deadline =
            days_to_deadline(record, now).is_some_and(|days| days <= config.closing_soon_days);
        if near_target || near_deadline {
            debug!(
                "Offering {} closing soon (progress {}%, near deadline: {})",
                record.id,
                progress.round_dp(2),
                near_deadline
            );
            return Ok(DerivedStatus::ClosingSoon);
        }
        // Funded-class already handled progress >= 100.
        return Ok(DerivedStatus::Funding);
    }

    if raw_class == RawStatusClass::Waitlist || record.waitlist_open {
        return Ok(DerivedStatus::Waitlist);
    }

    Ok(DerivedStatus::Funding)
}

fn validate_record(record: &FundingRecord) -> Result<()> {
    if record.current_funding < Decimal::ZERO {
        return Err(ContractViolation::NegativeFunding {
            record_id: record.id.clone(),
            field: "currentFunding",
            value: record.current_funding.to_string(),
        }
        .into());
    }
    if record.target_funding < Decimal::ZERO {
        return Err(ContractViolation::NegativeFunding {
            record_id: record.id.clone(),
            field: "targetFunding",
            value: record.target_funding.to_string(),
        }
        .into());
    }
    Ok(())
}
