//! Free-interval inversion.
//!
//! Subtracts one day's merged busy intervals from the availability
//! window, keeping only gaps at least `min_block` long.

use chrono::Duration;

use crate::interval::{BusyInterval, Interval};

/// Inverts merged busy intervals against an availability window.
///
/// `busy` must be sorted by start and non-overlapping (the output of
/// [`super::busy::merge_busy`]). Gaps shorter than `min_block` are
/// dropped entirely, not truncated.
pub fn invert_busy(window: &Interval, busy: &[BusyInterval], min_block: Duration) -> Vec<Interval> {
    let mut free = Vec::new();
    let mut cursor = window.start;

    for interval in busy {
        if interval.start - cursor >= min_block {
            free.push(Interval::new(cursor, interval.start));
        }
        // A busy span can start before the cursor when it lies outside
        // the window or abuts the previous advance; never move backwards.
        cursor = cursor.max(interval.end);
    }

    if window.end - cursor >= min_block {
        free.push(Interval::new(cursor, window.end));
    }

    free
}
