//! The mutual free-time pipeline.
//!
//! Data flows strictly forward: events become per-day busy intervals
//! ([`busy`]), availability bounds become per-day UTC windows
//! ([`availability`]), inversion yields per-user free intervals
//! ([`free`]), a sweep line intersects them across participants
//! ([`intersect`]), and each mutual block is tagged and scored
//! ([`score`]). [`calculate_mutual_free_time`] wires the stages
//! together across all candidate days.

pub mod availability;
pub mod busy;
pub mod free;
pub mod intersect;
pub mod score;

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::calendar::{FreeBlock, UserCalendar};
use crate::error::ScheduleResult;
use crate::interval::Interval;
use crate::time;

pub use busy::BusyByDay;

/// Default minimum mutual block length, in minutes.
pub const DEFAULT_MIN_BLOCK_MINUTES: i64 = 30;

/// Computes the mutual free-time blocks for a set of participants.
///
/// A block is emitted only when every participant is simultaneously
/// free for at least `min_block_minutes`. The result is sorted by
/// `(date, start)` ascending. The computation is a pure function of
/// its inputs; nothing is cached or shared between calls.
///
/// # Errors
///
/// Fails eagerly on the first malformed calendar: unparseable
/// timestamps, unknown timezones, malformed availability bounds, or
/// inverted event/availability spans. No partial result is produced.
pub fn calculate_mutual_free_time(
    participants: &[UserCalendar],
    min_block_minutes: i64,
) -> ScheduleResult<Vec<FreeBlock>> {
    let min_block = Duration::minutes(min_block_minutes);

    // Candidate days: the UTC day of every event boundary of every
    // participant.
    let mut days: BTreeSet<NaiveDate> = BTreeSet::new();
    for user in participants {
        let tz = time::timezone(&user.timezone)?;
        for event in &user.events {
            days.insert(time::to_utc(&event.start, tz)?.date_naive());
            days.insert(time::to_utc(&event.end, tz)?.date_naive());
        }
    }

    let busy_by_user: Vec<BusyByDay> = participants
        .iter()
        .map(busy::busy_by_day)
        .collect::<ScheduleResult<_>>()?;
    let windows_by_user: Vec<_> = participants
        .iter()
        .map(|user| availability::availability_windows(user, &days))
        .collect::<ScheduleResult<_>>()?;
    let roster: Vec<String> = participants.iter().map(|u| u.user_id.clone()).collect();

    let mut blocks = Vec::new();
    for &day in &days {
        let per_user_free: Vec<Vec<Interval>> = participants
            .iter()
            .enumerate()
            .map(|(idx, _)| {
                let merged = busy::merge_busy(
                    busy_by_user[idx].get(&day).cloned().unwrap_or_default(),
                );
                match windows_by_user[idx].get(&day) {
                    Some(window) => free::invert_busy(window, &merged, min_block),
                    // No availability window blocks out the whole day
                    // for the group.
                    None => Vec::new(),
                }
            })
            .collect();

        let mutual = intersect::intersect_free(&per_user_free, min_block);
        debug!(%day, mutual_blocks = mutual.len(), "Intersected free intervals");

        for interval in mutual {
            blocks.push(FreeBlock {
                date: day,
                start: interval.start.format("%H:%M").to_string(),
                end: interval.end.format("%H:%M").to_string(),
                participants_available: roster.clone(),
                tag: score::classify(&interval, &busy_by_user),
                score: score::score(&interval),
            });
        }
    }

    blocks.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.start.cmp(&b.start)));
    debug!(
        participants = roster.len(),
        days = days.len(),
        blocks = blocks.len(),
        "Mutual free-time computation finished"
    );
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{BlockTag, CalendarEvent};
    use crate::error::ScheduleError;

    fn user(id: &str, avail: (&str, &str), events: Vec<CalendarEvent>) -> UserCalendar {
        UserCalendar::new(id, avail.0, avail.1, "UTC").with_events(events)
    }

    #[test]
    fn two_users_route_around_both_busy_windows() {
        // user1 busy 09:00-10:00, user2 busy 11:00-12:00, both
        // available 08:00-22:00
        let participants = vec![
            user(
                "user1",
                ("08:00", "22:00"),
                vec![CalendarEvent::busy(
                    "2025-06-20T09:00:00",
                    "2025-06-20T10:00:00",
                )],
            ),
            user(
                "user2",
                ("08:00", "22:00"),
                vec![CalendarEvent::busy(
                    "2025-06-20T11:00:00",
                    "2025-06-20T12:00:00",
                )],
            ),
        ];

        let blocks = calculate_mutual_free_time(&participants, 30).unwrap();
        let spans: Vec<(&str, &str)> = blocks
            .iter()
            .map(|b| (b.start.as_str(), b.end.as_str()))
            .collect();
        assert_eq!(
            spans,
            vec![("08:00", "09:00"), ("10:00", "11:00"), ("12:00", "22:00")]
        );
        assert!(blocks.iter().all(|b| b.tag == BlockTag::BestMatch));
        assert!(
            blocks
                .iter()
                .all(|b| b.participants_available == ["user1", "user2"])
        );
    }

    #[test]
    fn tentative_tail_past_midnight_taints_next_day() {
        // The tentative hold is attributed to the 20th but its tail
        // reaches into the 21st, where it no longer blocks free time
        // yet still taints the mutual block.
        let participants = vec![
            user(
                "user1",
                ("08:00", "22:00"),
                vec![CalendarEvent::tentative(
                    "2025-06-20T22:00:00",
                    "2025-06-21T13:00:00",
                )],
            ),
            user("user2", ("08:00", "22:00"), vec![]),
        ];

        let blocks = calculate_mutual_free_time(&participants, 30).unwrap();
        assert_eq!(blocks.len(), 2);

        // 20th: free right up to the tentative start, which only
        // touches the block, so no taint
        assert_eq!(blocks[0].date.to_string(), "2025-06-20");
        assert_eq!((&blocks[0].start[..], &blocks[0].end[..]), ("08:00", "22:00"));
        assert_eq!(blocks[0].tag, BlockTag::BestMatch);

        // 21st: whole window free, strictly overlapped by the tail
        assert_eq!(blocks[1].date.to_string(), "2025-06-21");
        assert_eq!(blocks[1].tag, BlockTag::Tentative);
    }

    #[test]
    fn twenty_nine_minute_gap_is_dropped() {
        let participants = vec![
            user(
                "user1",
                ("08:00", "09:29"),
                vec![CalendarEvent::busy(
                    "2025-06-20T08:00:00",
                    "2025-06-20T09:00:00",
                )],
            ),
            user("user2", ("08:00", "22:00"), vec![]),
        ];

        let blocks = calculate_mutual_free_time(&participants, 30).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn day_without_candidate_events_yields_nothing() {
        // No participant has an event boundary on the 22nd, so the
        // 22nd is never considered even though everyone is free.
        let participants = vec![
            user(
                "user1",
                ("08:00", "22:00"),
                vec![CalendarEvent::busy(
                    "2025-06-20T09:00:00",
                    "2025-06-20T10:00:00",
                )],
            ),
            user("user2", ("08:00", "22:00"), vec![]),
        ];

        let blocks = calculate_mutual_free_time(&participants, 30).unwrap();
        assert!(blocks.iter().all(|b| b.date.to_string() == "2025-06-20"));
    }

    #[test]
    fn weekend_evening_block_scores_all_bonuses() {
        // 2025-06-21 is a Saturday; block starts 19:00
        let participants = vec![user(
            "user1",
            ("19:00", "21:00"),
            vec![CalendarEvent::busy(
                "2025-06-21T18:00:00",
                "2025-06-21T19:00:00",
            )],
        )];

        let blocks = calculate_mutual_free_time(&participants, 30).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!((&blocks[0].start[..], &blocks[0].end[..]), ("19:00", "21:00"));
        assert_eq!(blocks[0].score, 120.0 + 10.0 + 20.0);
    }

    #[test]
    fn output_sorted_and_all_blocks_meet_minimum() {
        let participants = vec![
            user(
                "user1",
                ("08:00", "22:00"),
                vec![
                    CalendarEvent::busy("2025-06-21T15:00:00", "2025-06-21T16:00:00"),
                    CalendarEvent::busy("2025-06-20T09:00:00", "2025-06-20T10:00:00"),
                    CalendarEvent::tentative("2025-06-20T13:00:00", "2025-06-20T14:00:00"),
                ],
            ),
            user(
                "user2",
                ("09:00", "21:00"),
                vec![
                    CalendarEvent::busy("2025-06-20T11:00:00", "2025-06-20T12:00:00"),
                    CalendarEvent::busy("2025-06-21T18:00:00", "2025-06-21T19:00:00"),
                ],
            ),
        ];

        let blocks = calculate_mutual_free_time(&participants, 45).unwrap();
        assert!(!blocks.is_empty());

        for pair in blocks.windows(2) {
            assert!(
                (pair[0].date, &pair[0].start) <= (pair[1].date, &pair[1].start),
                "unsorted output: {pair:?}"
            );
        }
        for block in &blocks {
            let start = time::parse_time_of_day(&block.start).unwrap();
            let end = time::parse_time_of_day(&block.end).unwrap();
            assert!((end - start).num_minutes() >= 45, "short block: {block:?}");
        }
    }

    #[test]
    fn mixed_timezones_intersect_on_the_utc_line() {
        // 16:00-17:00 New York (EDT) == 20:00-21:00 UTC
        let ny = UserCalendar::new("ny", "09:00", "17:00", "America/New_York").with_event(
            CalendarEvent::busy("2025-06-20T09:00:00", "2025-06-20T16:00:00"),
        );
        // 08:00-22:00 UTC, busy until 20:30
        let utc_user = user(
            "utc",
            ("08:00", "22:00"),
            vec![CalendarEvent::busy(
                "2025-06-20T08:00:00",
                "2025-06-20T20:30:00",
            )],
        );

        let blocks = calculate_mutual_free_time(&[ny, utc_user], 30).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!((&blocks[0].start[..], &blocks[0].end[..]), ("20:30", "21:00"));
    }

    #[test]
    fn default_min_block_constant() {
        assert_eq!(DEFAULT_MIN_BLOCK_MINUTES, 30);
    }

    #[test]
    fn no_participants_no_blocks() {
        let blocks = calculate_mutual_free_time(&[], 30).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn malformed_calendar_propagates() {
        let participants = vec![user(
            "user1",
            ("22:00", "08:00"),
            vec![CalendarEvent::busy(
                "2025-06-20T09:00:00",
                "2025-06-20T10:00:00",
            )],
        )];
        let err = calculate_mutual_free_time(&participants, 30).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidCalendar { .. }));
    }
}
