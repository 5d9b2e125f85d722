//! Minute arithmetic on the deep time axis.
//!
//! Every instant is a signed count of minutes from the Unix epoch. Values are
//! `i64` and always lie in `[MIN_MINUTES, MAX_MINUTES]`; arithmetic that would
//! leave that domain saturates at its edges.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Signed minutes since 1970-01-01T00:00Z.
pub type Minutes = i64;

pub const MINUTES_PER_HOUR: Minutes = 60;
pub const MINUTES_PER_DAY: Minutes = 24 * MINUTES_PER_HOUR;
/// Julian year (365.25 days).
pub const MINUTES_PER_YEAR: Minutes = 525_960;

/// Calendar year of the epoch.
pub const EPOCH_YEAR: i64 = 1970;

/// Furthest distance from the epoch the axis can represent, in years.
pub const MAX_YEARS_FROM_EPOCH: i64 = 14_000_000_000;

pub const MIN_MINUTES: Minutes = -MAX_YEARS_FROM_EPOCH * MINUTES_PER_YEAR;
pub const MAX_MINUTES: Minutes = MAX_YEARS_FROM_EPOCH * MINUTES_PER_YEAR;

/// Years handled through the proleptic Gregorian calendar. Outside this band
/// years are Julian-year multiples from the epoch.
const CALENDAR_YEARS: std::ops::RangeInclusive<i64> = -200_000..=200_000;

/// Clamp a wide intermediate into the representable domain.
pub fn clamp_wide(value: i128) -> Minutes {
    value.clamp(i128::from(MIN_MINUTES), i128::from(MAX_MINUTES)) as Minutes
}

/// Add `delta` to `base`, saturating at the domain edges.
pub fn offset(base: Minutes, delta: Minutes) -> Minutes {
    clamp_wide(i128::from(base) + i128::from(delta))
}

/// Clamp `value` into `[lo, hi]` without panicking when `lo > hi`.
///
/// An empty interval collapses onto `lo`.
pub fn clamp_between(value: Minutes, lo: Minutes, hi: Minutes) -> Minutes {
    value.min(hi).max(lo)
}

/// Convert a fractional number of years into minutes.
///
/// Returns `None` when the result would leave the domain.
pub fn years_to_minutes(years: f64) -> Option<Minutes> {
    let minutes = years * MINUTES_PER_YEAR as f64;
    if !minutes.is_finite() || minutes.abs() > MAX_MINUTES as f64 {
        return None;
    }
    Some(minutes.round() as Minutes)
}

/// Convert a minute count into fractional years.
pub fn minutes_to_years(minutes: Minutes) -> f64 {
    minutes as f64 / MINUTES_PER_YEAR as f64
}

/// Minutes for a UTC timestamp.
pub fn from_datetime(dt: DateTime<Utc>) -> Minutes {
    dt.timestamp().div_euclid(60)
}

/// Minutes for a naive (UTC) date-time.
pub fn from_naive(dt: NaiveDateTime) -> Minutes {
    from_datetime(dt.and_utc())
}

/// UTC timestamp for a minute count, if chrono can represent it.
pub fn to_datetime(minutes: Minutes) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(minutes.checked_mul(60)?, 0)
}

/// The current wall-clock time in minutes.
pub fn now_minutes() -> Minutes {
    from_datetime(Utc::now())
}

/// First minute of a calendar year (astronomical numbering, 1 BCE = year 0).
pub fn year_start(year: i64) -> Minutes {
    if CALENDAR_YEARS.contains(&year) {
        if let Some(date) = i32::try_from(year)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
        {
            return from_naive(date.and_time(NaiveTime::MIN));
        }
    }
    clamp_wide(i128::from(year.saturating_sub(EPOCH_YEAR)) * i128::from(MINUTES_PER_YEAR))
}

/// Calendar year containing `minutes` (astronomical numbering).
pub fn year_of(minutes: Minutes) -> i64 {
    match to_datetime(minutes) {
        Some(dt) if CALENDAR_YEARS.contains(&i64::from(dt.year())) => i64::from(dt.year()),
        _ => EPOCH_YEAR + minutes.div_euclid(MINUTES_PER_YEAR),
    }
}
