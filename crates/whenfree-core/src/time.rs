//! Time normalization.
//!
//! Converts caller-supplied local wall-clock timestamps (with a named
//! IANA zone) to absolute UTC instants, and composes instants from a
//! calendar date plus a time of day. DST is handled by the zone data:
//! the same local time of day can map to different UTC offsets on
//! different dates.

use chrono::offset::LocalResult;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{ScheduleError, ScheduleResult};

/// Resolves an IANA timezone name.
pub fn timezone(name: &str) -> ScheduleResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| ScheduleError::UnknownTimezone(name.to_string()))
}

/// Converts an ISO 8601 timestamp to a UTC instant.
///
/// A timestamp carrying a UTC offset (or `Z`) converts directly and
/// `tz` is ignored. A naive timestamp is interpreted as wall-clock
/// time in `tz`. Ambiguous local times (DST fall-back) resolve to the
/// earlier instant; nonexistent local times (DST spring-forward) are
/// rejected.
pub fn to_utc(value: &str, tz: Tz) -> ScheduleResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|e| ScheduleError::invalid_timestamp(value, e.to_string()))?;

    resolve_local(naive, tz).ok_or_else(|| {
        ScheduleError::invalid_timestamp(value, format!("local time does not exist in {tz}"))
    })
}

/// Parses an `HH:MM` time of day.
pub fn parse_time_of_day(value: &str) -> ScheduleResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| ScheduleError::InvalidTimeOfDay(value.to_string()))
}

/// Builds a UTC instant from a calendar date and a time of day
/// interpreted in the given zone.
pub fn compose_local(date: NaiveDate, time: NaiveTime, tz: Tz) -> ScheduleResult<DateTime<Utc>> {
    let naive = NaiveDateTime::new(date, time);
    resolve_local(naive, tz).ok_or_else(|| {
        ScheduleError::invalid_timestamp(
            naive.format("%Y-%m-%dT%H:%M").to_string(),
            format!("local time does not exist in {tz}"),
        )
    })
}

fn resolve_local(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        // Fall-back transition: the wall clock repeats; take the first pass.
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}
