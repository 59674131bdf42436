//! Per-day availability window resolution.
//!
//! Composes a user's local `HH:MM` availability bounds with each
//! candidate day in the user's timezone, producing absolute UTC
//! windows. DST means the same bounds can land on different UTC
//! offsets on different days.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::calendar::UserCalendar;
use crate::error::{ScheduleError, ScheduleResult};
use crate::interval::Interval;
use crate::time;

/// Resolves a user's availability window for each of the given days.
///
/// Fails with `InvalidTimeOfDay` on malformed bounds and with
/// `InvalidCalendar` if the window is empty or inverted.
pub fn availability_windows(
    user: &UserCalendar,
    days: &BTreeSet<NaiveDate>,
) -> ScheduleResult<BTreeMap<NaiveDate, Interval>> {
    let tz = time::timezone(&user.timezone)?;
    let start = time::parse_time_of_day(&user.availability_start)?;
    let end = time::parse_time_of_day(&user.availability_end)?;
    if start >= end {
        return Err(ScheduleError::invalid_calendar(
            &user.user_id,
            format!(
                "availability window {}-{} is empty or inverted",
                user.availability_start, user.availability_end
            ),
        ));
    }

    let mut windows = BTreeMap::new();
    for &day in days {
        windows.insert(
            day,
            Interval::new(
                time::compose_local(day, start, tz)?,
                time::compose_local(day, end, tz)?,
            ),
        );
    }
    Ok(windows)
}
