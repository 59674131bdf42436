//! Mutual-block classification and scoring.

use chrono::{Datelike, Timelike, Weekday};

use crate::calendar::{BlockTag, EventStatus};
use crate::interval::Interval;
use crate::schedule::busy::BusyByDay;

/// Flat bonus for blocks starting at or after 18:00 UTC.
const EVENING_BONUS: f64 = 10.0;
/// Flat bonus for blocks starting on a UTC Saturday or Sunday.
const WEEKEND_BONUS: f64 = 20.0;
/// UTC hour from which the evening bonus applies.
const EVENING_START_HOUR: u32 = 18;

/// Tags a mutual block against every participant's busy intervals.
///
/// The block is tentative if any participant has a tentative busy
/// interval strictly overlapping it, in any day bucket; otherwise it
/// is a best match. Checked against the unmerged per-day maps so a
/// midnight-spanning tentative tail is still seen.
pub fn classify(block: &Interval, busy_by_user: &[BusyByDay]) -> BlockTag {
    for days in busy_by_user {
        for intervals in days.values() {
            for busy in intervals {
                if busy.status == EventStatus::Tentative && busy.overlaps(block) {
                    return BlockTag::Tentative;
                }
            }
        }
    }
    BlockTag::BestMatch
}

/// Scores a mutual block: duration in minutes plus evening and weekend
/// bonuses.
///
/// Scores are comparative heuristics with no bounded range; they only
/// order blocks against each other.
pub fn score(block: &Interval) -> f64 {
    let mut score = block.duration_minutes();
    if block.start.hour() >= EVENING_START_HOUR {
        score += EVENING_BONUS;
    }
    if matches!(block.start.weekday(), Weekday::Sat | Weekday::Sun) {
        score += WEEKEND_BONUS;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::BusyInterval;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn utc(d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, h, min, 0).unwrap()
    }

    fn busy_map(intervals: Vec<BusyInterval>) -> BusyByDay {
        let mut map = BusyByDay::new();
        for iv in intervals {
            map.entry(iv.start.date_naive()).or_default().push(iv);
        }
        map
    }

    mod classification {
        use super::*;

        #[test]
        fn tentative_overlap_tags_block() {
            // Tentative 13:00-14:00 against a 12:30-15:00 block
            let busy = busy_map(vec![BusyInterval::new(
                utc(20, 13, 0),
                utc(20, 14, 0),
                EventStatus::Tentative,
            )]);
            let block = Interval::new(utc(20, 12, 30), utc(20, 15, 0));
            assert_eq!(classify(&block, &[busy]), BlockTag::Tentative);
        }

        #[test]
        fn firm_busy_never_tags() {
            let busy = busy_map(vec![BusyInterval::new(
                utc(20, 13, 0),
                utc(20, 14, 0),
                EventStatus::Busy,
            )]);
            let block = Interval::new(utc(20, 12, 30), utc(20, 15, 0));
            assert_eq!(classify(&block, &[busy]), BlockTag::BestMatch);
        }

        #[test]
        fn touching_tentative_does_not_tag() {
            let busy = busy_map(vec![BusyInterval::new(
                utc(20, 13, 0),
                utc(20, 14, 0),
                EventStatus::Tentative,
            )]);
            let before = Interval::new(utc(20, 12, 0), utc(20, 13, 0));
            let after = Interval::new(utc(20, 14, 0), utc(20, 15, 0));
            assert_eq!(classify(&before, &[busy.clone()]), BlockTag::BestMatch);
            assert_eq!(classify(&after, &[busy]), BlockTag::BestMatch);
        }

        #[test]
        fn any_participant_can_taint() {
            let clean = busy_map(vec![]);
            let tainted = busy_map(vec![BusyInterval::new(
                utc(20, 9, 0),
                utc(20, 10, 0),
                EventStatus::Tentative,
            )]);
            let block = Interval::new(utc(20, 9, 30), utc(20, 11, 0));
            assert_eq!(classify(&block, &[clean, tainted]), BlockTag::Tentative);
        }

        #[test]
        fn previous_day_bucket_is_checked() {
            // Midnight-spanning tentative event attributed to the 20th,
            // block on the 21st overlapping its tail
            let busy = busy_map(vec![BusyInterval::new(
                utc(20, 23, 0),
                utc(21, 2, 0),
                EventStatus::Tentative,
            )]);
            assert_eq!(busy.len(), 1);
            assert!(busy.contains_key(&NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()));

            let block = Interval::new(utc(21, 1, 0), utc(21, 3, 0));
            assert_eq!(classify(&block, &[busy]), BlockTag::Tentative);
        }
    }

    mod scoring {
        use super::*;

        #[test]
        fn base_is_duration_minutes() {
            // 2025-06-20 is a Friday
            let block = Interval::new(utc(20, 10, 0), utc(20, 11, 30));
            assert_eq!(score(&block), 90.0);
        }

        #[test]
        fn evening_start_adds_bonus() {
            let block = Interval::new(utc(20, 18, 0), utc(20, 19, 0));
            assert_eq!(score(&block), 70.0);
        }

        #[test]
        fn late_afternoon_gets_no_bonus() {
            let block = Interval::new(utc(20, 17, 59), utc(20, 18, 59));
            assert_eq!(score(&block), 60.0);
        }

        #[test]
        fn weekend_evening_stacks_bonuses() {
            // 2025-06-21 is a Saturday: 120 + 10 + 20
            let block = Interval::new(utc(21, 19, 0), utc(21, 21, 0));
            assert_eq!(score(&block), 150.0);
        }

        #[test]
        fn sunday_counts_as_weekend() {
            let block = Interval::new(utc(22, 9, 0), utc(22, 10, 0));
            assert_eq!(score(&block), 80.0);
        }
    }
}
