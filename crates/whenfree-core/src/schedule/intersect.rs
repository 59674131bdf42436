//! Multi-party free-interval intersection.
//!
//! Sweep line over every participant's free-interval endpoints: a
//! mutual window is open exactly while all N participants are in the
//! active set. O(K log K) for K endpoints.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::interval::Interval;

/// Endpoint deltas, ordered so ends sort before starts at a shared instant.
const END: i8 = -1;
const START: i8 = 1;

/// Intersects per-participant free intervals for a single day.
///
/// Returns the intervals during which every participant is free, each
/// at least `min_block` long, ordered by start. An empty participant
/// list yields no intervals.
pub fn intersect_free(per_user: &[Vec<Interval>], min_block: Duration) -> Vec<Interval> {
    let n = per_user.len();
    if n == 0 {
        return Vec::new();
    }

    let mut edges: Vec<(DateTime<Utc>, i8, usize)> = Vec::new();
    for (owner, intervals) in per_user.iter().enumerate() {
        for interval in intervals {
            edges.push((interval.start, START, owner));
            edges.push((interval.end, END, owner));
        }
    }
    edges.sort();

    let mut active: HashSet<usize> = HashSet::with_capacity(n);
    let mut open: Option<DateTime<Utc>> = None;
    let mut mutual = Vec::new();

    for (at, delta, owner) in edges {
        if delta == START {
            active.insert(owner);
        } else {
            active.remove(&owner);
        }

        if active.len() == n {
            open.get_or_insert(at);
        } else if let Some(start) = open.take()
            && at - start >= min_block
        {
            mutual.push(Interval::new(start, at));
        }
    }

    mutual
}
