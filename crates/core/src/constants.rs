/// Decimal precision for display and export
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Milliseconds in one day, used for deadline arithmetic
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Funding progress (percent) at which an offering counts as fully funded
pub const FULLY_FUNDED_PROGRESS_PCT: i64 = 100;

/// Default funding progress (percent) at which an open offering is closing soon
pub const DEFAULT_CLOSING_SOON_PROGRESS_PCT: i64 = 80;

/// Default days-to-deadline at or below which an open offering is closing soon
pub const DEFAULT_CLOSING_SOON_DAYS: i64 = 7;

/// Risk score at or below which a listing is bucketed as low risk
pub const LOW_RISK_MAX_SCORE: i64 = 3;

/// Risk score at or below which a listing is bucketed as medium risk
pub const MEDIUM_RISK_MAX_SCORE: i64 = 6;
