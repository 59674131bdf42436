//! Busy-interval building and merging.
//!
//! Groups one user's events by the UTC calendar day of their start
//! instant and merges overlapping or adjacent spans per day. An event
//! crossing midnight is attributed only to its start day; the tail past
//! midnight is not separately represented.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::calendar::{EventStatus, UserCalendar};
use crate::error::{ScheduleError, ScheduleResult};
use crate::interval::BusyInterval;
use crate::time;

/// Per-day busy intervals for one user, keyed by UTC day of the start
/// instant. Intervals within a day are unsorted and unmerged; run
/// [`merge_busy`] before inverting.
pub type BusyByDay = BTreeMap<NaiveDate, Vec<BusyInterval>>;

/// Resolves a user's events to UTC busy intervals grouped by day.
///
/// Fails with `InvalidCalendar` if any event ends at or before its
/// start, and propagates timestamp/timezone errors from normalization.
pub fn busy_by_day(user: &UserCalendar) -> ScheduleResult<BusyByDay> {
    let tz = time::timezone(&user.timezone)?;
    let mut days = BusyByDay::new();

    for event in &user.events {
        let start = time::to_utc(&event.start, tz)?;
        let end = time::to_utc(&event.end, tz)?;
        if start >= end {
            return Err(ScheduleError::invalid_calendar(
                &user.user_id,
                format!("event ends at or before it starts ({} / {})", event.start, event.end),
            ));
        }
        days.entry(start.date_naive())
            .or_default()
            .push(BusyInterval::new(start, end, event.status));
    }

    Ok(days)
}

/// Merges overlapping or touching busy intervals into maximal runs.
///
/// The result is sorted by start and non-overlapping. The tentative
/// taint is sticky: once any contributing interval is tentative, the
/// whole merged run stays tentative.
pub fn merge_busy(mut intervals: Vec<BusyInterval>) -> Vec<BusyInterval> {
    if intervals.is_empty() {
        return intervals;
    }
    intervals.sort_by_key(|b| b.start);

    let mut merged: Vec<BusyInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                last.end = last.end.max(interval.end);
                if interval.status == EventStatus::Tentative {
                    last.status = EventStatus::Tentative;
                }
            }
            _ => merged.push(interval),
        }
    }
    merged
}
