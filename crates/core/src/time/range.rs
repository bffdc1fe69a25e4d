use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::instant::Instant;
use crate::correctness::check_predicate_true;

/// A half-open `[start, end)` time range; empty when `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: Instant,
    pub end: Instant,
}

impl TimeRange {
    pub fn new(start: Instant, end: Instant) -> Result<Self> {
        check_predicate_true(start <= end, "TimeRange start must be <= end")?;
        Ok(TimeRange { start, end })
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub fn contains(self, instant: Instant) -> bool {
        instant >= self.start && instant < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_range() {
        let start = Instant::from_micros(10);
        let end = Instant::from_micros(5);
        assert!(TimeRange::new(start, end).is_err());
    }

    #[test]
    fn equal_bounds_is_empty() {
        let t = Instant::from_micros(10);
        let range = TimeRange::new(t, t).unwrap();
        assert!(range.is_empty());
        assert!(!range.contains(t));
    }

    #[test]
    fn contains_is_half_open() {
        let range = TimeRange::new(Instant::from_micros(0), Instant::from_micros(10)).unwrap();
        assert!(range.contains(Instant::from_micros(0)));
        assert!(!range.contains(Instant::from_micros(10)));
        assert!(range.contains(Instant::from_micros(9)));
    }
}
