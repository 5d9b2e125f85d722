//! Drag granularity levels.

use serde::{Deserialize, Serialize};

use crate::minutes::{Minutes, MINUTES_PER_DAY, MINUTES_PER_HOUR, MINUTES_PER_YEAR};

/// How far one pixel of drag motion moves a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Minute,
    Hour,
    Day,
    Year,
    ThousandYears,
    MillionYears,
    BillionYears,
}

impl Granularity {
    /// All levels, finest first.
    pub const ALL: [Self; 7] = [
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Year,
        Self::ThousandYears,
        Self::MillionYears,
        Self::BillionYears,
    ];

    /// Minutes moved per pixel of drag.
    pub fn minutes_per_pixel(self) -> Minutes {
        match self {
            Self::Minute => 1,
            Self::Hour => MINUTES_PER_HOUR,
            Self::Day => MINUTES_PER_DAY,
            Self::Year => MINUTES_PER_YEAR,
            Self::ThousandYears => 1_000 * MINUTES_PER_YEAR,
            Self::MillionYears => 1_000_000 * MINUTES_PER_YEAR,
            Self::BillionYears => 1_000_000_000 * MINUTES_PER_YEAR,
        }
    }

    /// Human-readable unit name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Year => "year",
            Self::ThousandYears => "thousand years",
            Self::MillionYears => "million years",
            Self::BillionYears => "billion years",
        }
    }

    /// Compact unit tag for status lines.
    pub fn short(self) -> &'static str {
        match self {
            Self::Minute => "min",
            Self::Hour => "h",
            Self::Day => "d",
            Self::Year => "y",
            Self::ThousandYears => "ky",
            Self::MillionYears => "My",
            Self::BillionYears => "Gy",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|g| *g == self).unwrap_or(0)
    }

    /// Next finer level. Saturates at minutes.
    #[must_use]
    pub fn finer(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    /// Next coarser level. Saturates at billions of years.
    #[must_use]
    pub fn coarser(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error for an unrecognized granularity name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown granularity: {0}")]
pub struct UnknownGranularity(pub String);

impl std::str::FromStr for Granularity {
    type Err = UnknownGranularity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minute" | "minutes" | "min" | "m" => Ok(Self::Minute),
            "hour" | "hours" | "h" => Ok(Self::Hour),
            "day" | "days" | "d" => Ok(Self::Day),
            "year" | "years" | "y" => Ok(Self::Year),
            "thousand_years" | "thousand-years" | "ky" | "ka" => Ok(Self::ThousandYears),
            "million_years" | "million-years" | "my" | "ma" => Ok(Self::MillionYears),
            "billion_years" | "billion-years" | "gy" | "ga" => Ok(Self::BillionYears),
            _ => Err(UnknownGranularity(s.to_string())),
        }
    }
}
