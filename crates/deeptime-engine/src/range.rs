//! Date ranges on the deep time axis.

use serde::Serialize;

use crate::minutes::{clamp_between, clamp_wide, offset, Minutes, MAX_MINUTES, MIN_MINUTES};

/// An ordered `[start, end]` pair of minutes.
///
/// Construction always yields `start <= end`, with both ends inside the
/// representable domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: Minutes,
    end: Minutes,
}

impl DateRange {
    /// The full representable axis.
    pub const FULL: Self = Self {
        start: MIN_MINUTES,
        end: MAX_MINUTES,
    };

    /// Create a range, swapping an inverted pair and clamping to the domain.
    pub fn new(a: Minutes, b: Minutes) -> Self {
        let a = clamp_wide(i128::from(a));
        let b = clamp_wide(i128::from(b));
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn start(&self) -> Minutes {
        self.start
    }

    pub fn end(&self) -> Minutes {
        self.end
    }

    /// Length in minutes. Never negative.
    pub fn len(&self) -> Minutes {
        self.end - self.start
    }

    /// Whether the range is a single instant.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, minutes: Minutes) -> bool {
        (self.start..=self.end).contains(&minutes)
    }

    pub fn contains_range(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Clamp an instant into the range.
    pub fn clamp(&self, minutes: Minutes) -> Minutes {
        clamp_between(minutes, self.start, self.end)
    }

    /// Move both ends by `delta`, saturating at the domain edges.
    ///
    /// Near an edge the length shrinks rather than the range overflowing.
    #[must_use]
    pub fn shift(self, delta: Minutes) -> Self {
        Self::new(offset(self.start, delta), offset(self.end, delta))
    }

    /// Smallest range covering both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Overlap of both ranges, if any.
    pub fn intersect(self, other: Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Self { start, end })
    }

    /// Grow by `pad` minutes on each side.
    #[must_use]
    pub fn padded(self, pad: Minutes) -> Self {
        Self::new(offset(self.start, -pad), offset(self.end, pad))
    }

    /// Translate the range so it lies inside `outer`, keeping its length.
    ///
    /// A range longer than `outer` is cut down to `outer`.
    #[must_use]
    pub fn fit_within(self, outer: Self) -> Self {
        if self.len() >= outer.len() {
            return outer;
        }
        if self.start < outer.start {
            self.shift(outer.start - self.start)
        } else if self.end > outer.end {
            self.shift(outer.end - self.end)
        } else {
            self
        }
    }

    /// Enforce a minimum length inside `outer`.
    ///
    /// The end is pushed forward first; if `outer` runs out the start is
    /// pulled back instead. Returns `outer` when it is itself too short.
    #[must_use]
    pub fn with_min_len(self, min_len: Minutes, outer: Self) -> Self {
        if self.len() >= min_len {
            return self;
        }
        if outer.len() <= min_len {
            return outer;
        }
        let end = offset(self.start, min_len);
        if end <= outer.end {
            Self {
                start: self.start,
                end,
            }
        } else {
            Self {
                start: offset(outer.end, -min_len),
                end: outer.end,
            }
        }
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self { start: 0, end: 0 }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_at_epoch() {
        let range = DateRange::default();
        assert_eq!(range, DateRange::new(0, 0));
        assert!(range.is_empty());
    }

    #[test]
    fn test_new_swaps_inverted_pair() {
        let range = DateRange::new(100, 10);
        assert_eq!(range.start(), 10);
        assert_eq!(range.end(), 100);
        assert_eq!(range.len(), 90);
    }

    #[test]
    fn test_new_clamps_to_domain() {
        let range = DateRange::new(i64::MIN, i64::MAX);
        assert_eq!(range, DateRange::FULL);
    }

    #[test]
    fn test_contains() {
        let range = DateRange::new(0, 10);
        assert!(range.contains(0));
        assert!(range.contains(10));
        assert!(!range.contains(11));
        assert!(range.contains_range(&DateRange::new(2, 8)));
        assert!(!range.contains_range(&DateRange::new(-1, 8)));
    }

    #[test]
    fn test_shift_saturates() {
        let range = DateRange::new(MAX_MINUTES - 5, MAX_MINUTES);
        let shifted = range.shift(10);
        assert_eq!(shifted.end(), MAX_MINUTES);
        assert_eq!(shifted.start(), MAX_MINUTES);
    }

    #[test]
    fn test_intersect() {
        let a = DateRange::new(0, 10);
        assert_eq!(a.intersect(DateRange::new(5, 20)), Some(DateRange::new(5, 10)));
        assert_eq!(a.intersect(DateRange::new(11, 20)), None);
    }

    #[test]
    fn test_fit_within() {
        let outer = DateRange::new(0, 100);
        assert_eq!(DateRange::new(-10, 10).fit_within(outer), DateRange::new(0, 20));
        assert_eq!(DateRange::new(95, 115).fit_within(outer), DateRange::new(80, 100));
        assert_eq!(DateRange::new(40, 60).fit_within(outer), DateRange::new(40, 60));
        assert_eq!(DateRange::new(-50, 150).fit_within(outer), outer);
    }

    #[test]
    fn test_with_min_len() {
        let outer = DateRange::new(0, 100);
        assert_eq!(DateRange::new(10, 10).with_min_len(5, outer), DateRange::new(10, 15));
        // Not enough room before the outer end: pull the start back
        assert_eq!(DateRange::new(98, 100).with_min_len(5, outer), DateRange::new(95, 100));
        // Already long enough
        assert_eq!(DateRange::new(10, 30).with_min_len(5, outer), DateRange::new(10, 30));
    }
}
