//! Calendar input and output types.
//!
//! This module provides the data model consumed and produced by the
//! scheduling pipeline:
//! - [`CalendarEvent`] / [`UserCalendar`]: caller-supplied input, one
//!   calendar per participant
//! - [`FreeBlock`]: a mutual free-time slot with tag and score

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether an event firmly blocks time or is only tentatively held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// The event firmly occupies its time span.
    #[default]
    Busy,
    /// The event is tentatively held and may not happen.
    Tentative,
}

/// A single calendar event as supplied by the caller.
///
/// Timestamps are ISO 8601 strings. A timestamp without a UTC offset is
/// interpreted as wall-clock time in the owning calendar's timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event start timestamp.
    pub start: String,
    /// Event end timestamp. Must resolve to an instant after `start`.
    pub end: String,
    /// Busy or tentative.
    #[serde(default)]
    pub status: EventStatus,
}

impl CalendarEvent {
    /// Creates a busy event.
    pub fn busy(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            status: EventStatus::Busy,
        }
    }

    /// Creates a tentative event.
    pub fn tentative(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            status: EventStatus::Tentative,
        }
    }
}

/// One participant's calendar: events plus a daily reachability window.
///
/// The availability bounds are local times of day (`HH:MM`) in the
/// calendar's timezone and must describe a same-day window
/// (`availability_start < availability_end`, no overnight wraparound).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCalendar {
    /// Identifier reported back in every emitted block.
    pub user_id: String,
    /// The participant's busy/tentative events.
    pub events: Vec<CalendarEvent>,
    /// Daily availability start, local `HH:MM`.
    pub availability_start: String,
    /// Daily availability end, local `HH:MM`.
    pub availability_end: String,
    /// IANA timezone name (e.g. "Europe/Paris").
    pub timezone: String,
}

impl UserCalendar {
    /// Creates a calendar with the given identity and availability window.
    pub fn new(
        user_id: impl Into<String>,
        availability_start: impl Into<String>,
        availability_end: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            events: Vec::new(),
            availability_start: availability_start.into(),
            availability_end: availability_end.into(),
            timezone: timezone.into(),
        }
    }

    /// Builder method to add an event.
    pub fn with_event(mut self, event: CalendarEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Builder method to set all events.
    pub fn with_events(mut self, events: Vec<CalendarEvent>) -> Self {
        self.events = events;
        self
    }
}

/// Qualitative tag assigned to a mutual free block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockTag {
    /// No participant has a tentative event touching the block.
    BestMatch,
    /// At least one participant has a tentative event overlapping the block.
    Tentative,
}

/// A mutual free-time slot shared by every requested participant.
///
/// Times are UTC-normalized and rendered as `HH:MM`; `date` serializes
/// as `YYYY-MM-DD`. Created once by the scorer, never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeBlock {
    /// UTC calendar day the block falls on.
    pub date: NaiveDate,
    /// Block start, `HH:MM` (UTC).
    pub start: String,
    /// Block end, `HH:MM` (UTC).
    pub end: String,
    /// The full participant roster of the computation.
    pub participants_available: Vec<String>,
    /// Best match or tentative-conflict-adjacent.
    pub tag: BlockTag,
    /// Comparative desirability heuristic; higher is better.
    pub score: f64,
}
