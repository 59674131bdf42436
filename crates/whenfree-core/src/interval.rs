//! Absolute time intervals used inside the pipeline.
//!
//! [`Interval`] is a plain `[start, end)` span of UTC instants;
//! [`BusyInterval`] additionally carries the busy/tentative status so
//! the tentative taint survives merging.

use chrono::{DateTime, Duration, Utc};

use crate::calendar::EventStatus;

/// A half-open span `[start, end)` of UTC instants with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Start of the span (inclusive).
    pub start: DateTime<Utc>,
    /// End of the span (exclusive).
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Creates a new interval.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Returns the duration of the interval.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns the duration in minutes, including fractional seconds.
    pub fn duration_minutes(&self) -> f64 {
        self.duration().num_seconds() as f64 / 60.0
    }
}

/// A busy span tagged with its (possibly merged) status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyInterval {
    /// Start of the span (inclusive).
    pub start: DateTime<Utc>,
    /// End of the span (exclusive).
    pub end: DateTime<Utc>,
    /// Busy, or tentative if any contributing event was tentative.
    pub status: EventStatus,
}

impl BusyInterval {
    /// Creates a new busy interval.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, status: EventStatus) -> Self {
        Self { start, end, status }
    }

    /// Checks for strict overlap with the given span.
    ///
    /// Touching endpoints do not count as overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 20, h, min, 0).unwrap()
    }

    #[test]
    fn duration_minutes() {
        let iv = Interval::new(utc(9, 0), utc(10, 30));
        assert_eq!(iv.duration(), Duration::minutes(90));
        assert_eq!(iv.duration_minutes(), 90.0);
    }

    #[test]
    fn strict_overlap() {
        let busy = BusyInterval::new(utc(13, 0), utc(14, 0), EventStatus::Tentative);

        // Overlapping
        assert!(busy.overlaps(&Interval::new(utc(12, 30), utc(15, 0))));
        assert!(busy.overlaps(&Interval::new(utc(13, 30), utc(13, 45))));

        // Touching endpoints are not overlap
        assert!(!busy.overlaps(&Interval::new(utc(12, 0), utc(13, 0))));
        assert!(!busy.overlaps(&Interval::new(utc(14, 0), utc(15, 0))));

        // Disjoint
        assert!(!busy.overlaps(&Interval::new(utc(8, 0), utc(9, 0))));
    }
}
