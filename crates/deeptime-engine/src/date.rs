//! Text date parsing and label formatting.
//!
//! Accepted input forms:
//! - `now`, `now+1d`, `now - 3h` (units `m`, `h`, `d`, `y`)
//! - `2024-05-01`, `2024-05-01 12:30`, `-500-01-01`
//! - `1200 BCE`, `1200 CE`, `753 BC`, `1066 AD`
//! - `66 Ma`, `4.5 Ga`, `12 ka` (years before present)
//! - `4.5 billion years ago`, `300 years ago`
//! - `@<minutes>` for a raw minute count

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::minutes::{
    from_naive, minutes_to_years, to_datetime, year_of, year_start, years_to_minutes, Minutes,
    MAX_MINUTES, MINUTES_PER_DAY, MINUTES_PER_HOUR, MINUTES_PER_YEAR, MIN_MINUTES,
};

/// Why a text date was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("empty date")]
    Empty,

    #[error("unrecognized date: {0}")]
    Unrecognized(String),

    #[error("invalid calendar date: {0}")]
    InvalidCalendar(String),

    #[error("date out of range: {0}")]
    OutOfRange(String),
}

/// How instants are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    /// Calendar dates (`2024-05-01 12:30`, `3000 BCE`).
    #[default]
    Calendar,
    /// Distance from the present (`4.5 billion years ago`).
    EarthView,
}

/// Parse a text date relative to `now`.
pub fn parse_date(text: &str, now: Minutes) -> Result<Minutes, DateParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::Empty);
    }
    let lower = trimmed.to_ascii_lowercase();

    if lower == "now" {
        return Ok(now);
    }

    let parsed = parse_raw(&lower)
        .or_else(|| parse_relative(&lower, now))
        .or_else(|| parse_calendar(&lower))
        .or_else(|| parse_era_year(&lower))
        .or_else(|| parse_before_present(&lower, now));

    match parsed {
        Some(Ok(minutes)) if (MIN_MINUTES..=MAX_MINUTES).contains(&minutes) => Ok(minutes),
        Some(Ok(_)) => Err(DateParseError::OutOfRange(trimmed.to_string())),
        Some(Err(e)) => Err(attach_input(e, trimmed)),
        None => Err(DateParseError::Unrecognized(trimmed.to_string())),
    }
}

fn attach_input(err: DateParseError, input: &str) -> DateParseError {
    match err {
        DateParseError::InvalidCalendar(_) => DateParseError::InvalidCalendar(input.to_string()),
        DateParseError::OutOfRange(_) => DateParseError::OutOfRange(input.to_string()),
        other => other,
    }
}

type Parsed = Option<Result<Minutes, DateParseError>>;

fn parse_raw(s: &str) -> Parsed {
    let rest = s.strip_prefix('@')?;
    Some(
        rest.trim()
            .parse::<i64>()
            .map_err(|_| DateParseError::OutOfRange(String::new())),
    )
}

fn parse_relative(s: &str, now: Minutes) -> Parsed {
    let re = Regex::new(r"^now\s*([+-])\s*(\d+)\s*([mhdy])$").ok()?;
    let caps = re.captures(s)?;
    let Ok(amount) = caps[2].parse::<i64>() else {
        return Some(Err(DateParseError::OutOfRange(String::new())));
    };
    let unit = match &caps[3] {
        "m" => 1,
        "h" => MINUTES_PER_HOUR,
        "d" => MINUTES_PER_DAY,
        _ => MINUTES_PER_YEAR,
    };
    let Some(delta) = amount.checked_mul(unit) else {
        return Some(Err(DateParseError::OutOfRange(String::new())));
    };
    let delta = if &caps[1] == "-" { -delta } else { delta };
    Some(
        now.checked_add(delta)
            .ok_or_else(|| DateParseError::OutOfRange(String::new())),
    )
}

fn parse_calendar(s: &str) -> Parsed {
    let re = Regex::new(r"^(-?\d{1,6})-(\d{1,2})-(\d{1,2})(?:[ t](\d{1,2}):(\d{2}))?$").ok()?;
    let caps = re.captures(s)?;
    let invalid = || DateParseError::InvalidCalendar(String::new());

    let year = caps[1].parse::<i32>().ok();
    let month = caps[2].parse::<u32>().ok();
    let day = caps[3].parse::<u32>().ok();
    let Some(date) = year
        .zip(month)
        .zip(day)
        .and_then(|((y, m), d)| NaiveDate::from_ymd_opt(y, m, d))
    else {
        return Some(Err(invalid()));
    };

    let time = match (caps.get(4), caps.get(5)) {
        (Some(h), Some(m)) => {
            let hour = h.as_str().parse::<u32>().ok();
            let minute = m.as_str().parse::<u32>().ok();
            match hour.zip(minute).and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)) {
                Some(t) => t,
                None => return Some(Err(invalid())),
            }
        }
        _ => NaiveTime::MIN,
    };

    Some(Ok(from_naive(date.and_time(time))))
}

fn parse_era_year(s: &str) -> Parsed {
    let re = Regex::new(r"^(\d+)\s*(bce|bc|ce|ad)$").ok()?;
    let caps = re.captures(s)?;
    let Ok(year) = caps[1].parse::<i64>() else {
        return Some(Err(DateParseError::OutOfRange(String::new())));
    };
    if year == 0 {
        // There is no year zero in BCE/CE notation.
        return Some(Err(DateParseError::InvalidCalendar(String::new())));
    }
    let astronomical = match &caps[2] {
        "bce" | "bc" => 1 - year,
        _ => year,
    };
    Some(Ok(year_start(astronomical)))
}

fn parse_before_present(s: &str, now: Minutes) -> Parsed {
    let short = Regex::new(r"^(\d+(?:\.\d+)?)\s*(ka|ma|ga)$").ok()?;
    let long =
        Regex::new(r"^(\d+(?:\.\d+)?)\s*(thousand|million|billion)?\s*years?\s+ago$").ok()?;

    let (value, scale) = if let Some(caps) = short.captures(s) {
        let scale = match &caps[2] {
            "ka" => 1e3,
            "ma" => 1e6,
            _ => 1e9,
        };
        (caps[1].to_string(), scale)
    } else if let Some(caps) = long.captures(s) {
        let scale = match caps.get(2).map(|m| m.as_str()) {
            Some("thousand") => 1e3,
            Some("million") => 1e6,
            Some("billion") => 1e9,
            _ => 1.0,
        };
        (caps[1].to_string(), scale)
    } else {
        return None;
    };

    let Ok(value) = value.parse::<f64>() else {
        return Some(Err(DateParseError::OutOfRange(String::new())));
    };
    Some(
        years_to_minutes(value * scale)
            .and_then(|ago| now.checked_sub(ago))
            .ok_or_else(|| DateParseError::OutOfRange(String::new())),
    )
}

/// Format `value` with at most `decimals` places, dropping trailing zeros.
fn trim_float(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Scale a year count into a short phrase (`4.5 billion`, `12 thousand`, `300`).
pub fn format_year_count(years: f64) -> String {
    let abs = years.abs();
    if abs >= 1e9 {
        format!("{} billion", trim_float(years / 1e9, 2))
    } else if abs >= 1e6 {
        format!("{} million", trim_float(years / 1e6, 2))
    } else if abs >= 1e4 {
        format!("{} thousand", trim_float(years / 1e3, 1))
    } else {
        trim_float(years, 0)
    }
}

fn plural(value: &str, unit: &str) -> String {
    if value == "1" {
        format!("{value} {unit}")
    } else {
        format!("{value} {unit}s")
    }
}

/// Human-readable length of a span of minutes.
pub fn format_span(len: Minutes) -> String {
    let abs = len.unsigned_abs();
    let text = if abs < MINUTES_PER_HOUR.unsigned_abs() {
        plural(&abs.to_string(), "minute")
    } else if abs < MINUTES_PER_DAY.unsigned_abs() {
        plural(&trim_float(abs as f64 / MINUTES_PER_HOUR as f64, 1), "hour")
    } else if abs < MINUTES_PER_YEAR.unsigned_abs() {
        plural(&trim_float(abs as f64 / MINUTES_PER_DAY as f64, 1), "day")
    } else {
        let years = format_year_count(abs as f64 / MINUTES_PER_YEAR as f64);
        if years == "1" {
            "1 year".to_string()
        } else {
            format!("{years} years")
        }
    };
    if len < 0 {
        format!("-{text}")
    } else {
        text
    }
}

/// Calendar label for an instant.
pub fn format_calendar(minutes: Minutes) -> String {
    let year = year_of(minutes);
    if (1..=9_999).contains(&year) {
        if let Some(dt) = to_datetime(minutes) {
            return dt.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    if year <= 0 {
        // Astronomical year 0 is 1 BCE.
        let bce = 1 - year;
        format!("{} BCE", format_year_count(bce as f64))
    } else {
        format!("{} CE", format_year_count(year as f64))
    }
}

/// Label relative to the present (`4.5 billion years ago`, `in 3 days`).
pub fn format_relative(minutes: Minutes, now: Minutes) -> String {
    let diff = i128::from(now) - i128::from(minutes);
    if diff == 0 {
        return "now".to_string();
    }
    let abs = diff.unsigned_abs();
    let text = if abs < u128::from(MINUTES_PER_YEAR.unsigned_abs()) {
        format_span(abs as Minutes)
    } else {
        let years = format_year_count(minutes_to_years(abs as Minutes));
        if years == "1" {
            "1 year".to_string()
        } else {
            format!("{years} years")
        }
    };
    if diff > 0 {
        format!("{text} ago")
    } else {
        format!("in {text}")
    }
}

/// Label an instant in the given mode.
pub fn format_minutes(minutes: Minutes, mode: LabelMode, now: Minutes) -> String {
    match mode {
        LabelMode::Calendar => format_calendar(minutes),
        LabelMode::EarthView => format_relative(minutes, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2024-01-01T00:00Z.
    const NOW: Minutes = 28_401_120;

    #[test]
    fn test_parse_now_and_offsets() {
        assert_eq!(parse_date("now", NOW), Ok(NOW));
        assert_eq!(parse_date(" NOW ", NOW), Ok(NOW));
        assert_eq!(parse_date("now+1d", NOW), Ok(NOW + 1_440));
        assert_eq!(parse_date("now - 3h", NOW), Ok(NOW - 180));
        assert_eq!(parse_date("now+2y", NOW), Ok(NOW + 2 * MINUTES_PER_YEAR));
    }

    #[test]
    fn test_parse_calendar() {
        assert_eq!(parse_date("2024-01-01", NOW), Ok(NOW));
        assert_eq!(parse_date("2024-01-01 12:30", NOW), Ok(NOW + 750));
        assert_eq!(parse_date("1970-01-01T00:01", NOW), Ok(1));
    }

    #[test]
    fn test_parse_invalid_calendar() {
        assert_eq!(
            parse_date("2024-02-30", NOW),
            Err(DateParseError::InvalidCalendar("2024-02-30".into()))
        );
        assert!(matches!(
            parse_date("2024-01-01 25:00", NOW),
            Err(DateParseError::InvalidCalendar(_))
        ));
    }

    #[test]
    fn test_parse_bce_ce() {
        assert_eq!(parse_date("1066 AD", NOW), Ok(year_start(1066)));
        assert_eq!(parse_date("1 BCE", NOW), Ok(year_start(0)));
        assert_eq!(parse_date("3000 bce", NOW), Ok(year_start(-2_999)));
        assert!(matches!(
            parse_date("0 CE", NOW),
            Err(DateParseError::InvalidCalendar(_))
        ));
    }

    #[test]
    fn test_parse_before_present() {
        let ga = parse_date("4.5 Ga", NOW).unwrap();
        assert_eq!(ga, NOW - years_to_minutes(4.5e9).unwrap());
        assert_eq!(parse_date("4.5 billion years ago", NOW), Ok(ga));
        assert_eq!(
            parse_date("300 years ago", NOW),
            Ok(NOW - 300 * MINUTES_PER_YEAR)
        );
        assert_eq!(
            parse_date("66 Ma", NOW),
            Ok(NOW - 66_000_000 * MINUTES_PER_YEAR)
        );
    }

    #[test]
    fn test_parse_raw_minutes() {
        assert_eq!(parse_date("@-42", NOW), Ok(-42));
    }

    #[test]
    fn test_parse_rejections() {
        assert_eq!(parse_date("   ", NOW), Err(DateParseError::Empty));
        assert_eq!(
            parse_date("next tuesday", NOW),
            Err(DateParseError::Unrecognized("next tuesday".into()))
        );
        assert_eq!(
            parse_date("20 Ga", NOW),
            Err(DateParseError::OutOfRange("20 Ga".into()))
        );
        assert!(matches!(
            parse_date("@99999999999999999999", NOW),
            Err(DateParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_format_calendar() {
        assert_eq!(format_calendar(NOW), "2024-01-01 00:00");
        assert_eq!(format_calendar(NOW + 750), "2024-01-01 12:30");
        assert_eq!(format_calendar(year_start(-2_999)), "3000 BCE");
        assert_eq!(format_calendar(year_start(-4_500_000_000)), "4.5 billion BCE");
        assert_eq!(format_calendar(year_start(2_000_000)), "2 million CE");
    }

    #[test]
    fn test_format_relative() {
        assert_eq!(format_relative(NOW, NOW), "now");
        assert_eq!(format_relative(NOW - 1_440, NOW), "1 day ago");
        assert_eq!(format_relative(NOW + 90, NOW), "in 1.5 hours");
        assert_eq!(
            format_relative(NOW - years_to_minutes(4.5e9).unwrap(), NOW),
            "4.5 billion years ago"
        );
        assert_eq!(format_relative(NOW - MINUTES_PER_YEAR, NOW), "1 year ago");
    }

    #[test]
    fn test_format_span() {
        assert_eq!(format_span(1), "1 minute");
        assert_eq!(format_span(45), "45 minutes");
        assert_eq!(format_span(1_440), "1 day");
        assert_eq!(format_span(2_160), "1.5 days");
        assert_eq!(format_span(12_000 * MINUTES_PER_YEAR), "12 thousand years");
        assert_eq!(format_span(-60), "-1 hour");
    }

    #[test]
    fn test_format_minutes_modes() {
        assert_eq!(format_minutes(NOW, LabelMode::Calendar, NOW), "2024-01-01 00:00");
        assert_eq!(format_minutes(NOW, LabelMode::EarthView, NOW), "now");
    }
}
