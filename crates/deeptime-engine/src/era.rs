//! Geological and historical era lookup.
//!
//! The table is ordered and contiguous: each era ends where the next one
//! begins. Boundaries are calendar years in astronomical numbering, so
//! `-4_600_000_000` is 4.6 billion years before year zero.

use serde::Serialize;

use crate::minutes::{year_start, Minutes};
use crate::range::DateRange;

/// Label shown for instants outside the table.
pub const UNKNOWN_ERA: &str = "Unknown era";

/// Broad family an era belongs to, used for tooltip styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EraKind {
    Geological,
    Historical,
    Future,
}

/// A named span of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Era {
    pub name: &'static str,
    /// First year of the era (inclusive).
    pub start_year: i64,
    /// First year after the era (exclusive).
    pub end_year: i64,
    pub kind: EraKind,
}

impl Era {
    const fn new(name: &'static str, start_year: i64, end_year: i64, kind: EraKind) -> Self {
        Self {
            name,
            start_year,
            end_year,
            kind,
        }
    }

    /// The era as a minute range. The end is the first minute of the next era.
    pub fn range(&self) -> DateRange {
        DateRange::new(year_start(self.start_year), year_start(self.end_year))
    }
}

/// Era boundaries, oldest first.
pub static ERAS: &[Era] = &[
    Era::new("Hadean", -4_600_000_000, -4_000_000_000, EraKind::Geological),
    Era::new("Archean", -4_000_000_000, -2_500_000_000, EraKind::Geological),
    Era::new("Proterozoic", -2_500_000_000, -538_800_000, EraKind::Geological),
    Era::new("Paleozoic", -538_800_000, -251_902_000, EraKind::Geological),
    Era::new("Mesozoic", -251_902_000, -66_000_000, EraKind::Geological),
    Era::new("Paleogene", -66_000_000, -23_030_000, EraKind::Geological),
    Era::new("Neogene", -23_030_000, -2_580_000, EraKind::Geological),
    Era::new("Pleistocene", -2_580_000, -9_700, EraKind::Geological),
    Era::new("Holocene", -9_700, -3_000, EraKind::Geological),
    Era::new("Ancient history", -3_000, 476, EraKind::Historical),
    Era::new("Middle Ages", 476, 1_453, EraKind::Historical),
    Era::new("Early modern", 1_453, 1_789, EraKind::Historical),
    Era::new("Modern", 1_789, 1_945, EraKind::Historical),
    Era::new("Contemporary", 1_945, 2_100, EraKind::Historical),
    Era::new("Near future", 2_100, 1_000_000, EraKind::Future),
    Era::new("Deep future", 1_000_000, 1_000_000_000, EraKind::Future),
];

/// The era containing `minutes`, if the table covers it.
pub fn era_at(minutes: Minutes) -> Option<&'static Era> {
    // Eras are sorted by start, so the candidate is the last one starting at or before `minutes`.
    let idx = ERAS.partition_point(|era| year_start(era.start_year) <= minutes);
    let era = ERAS.get(idx.checked_sub(1)?)?;
    (minutes < year_start(era.end_year)).then_some(era)
}

/// Era name for `minutes`, falling back to [`UNKNOWN_ERA`].
pub fn era_name(minutes: Minutes) -> &'static str {
    era_at(minutes).map_or(UNKNOWN_ERA, |era| era.name)
}
