//! In-memory calendar store.
//!
//! A stand-in for a real calendar backend: maps user identifiers to
//! fully-populated [`UserCalendar`] values. The core pipeline never
//! sees this layer; it receives resolved calendars only.

use std::collections::HashMap;

use whenfree_core::{CalendarEvent, UserCalendar};

/// Maps user identifiers to their calendars.
#[derive(Debug, Clone, Default)]
pub struct CalendarStore {
    calendars: HashMap<String, UserCalendar>,
}

impl CalendarStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a small demo dataset.
    pub fn sample() -> Self {
        let mut store = Self::new();
        store.insert(
            UserCalendar::new("user1", "08:00", "22:00", "UTC").with_events(vec![
                CalendarEvent::busy("2025-06-20T09:00:00", "2025-06-20T10:00:00"),
                CalendarEvent::tentative("2025-06-20T13:00:00", "2025-06-20T14:00:00"),
                CalendarEvent::busy("2025-06-21T15:00:00", "2025-06-21T16:00:00"),
            ]),
        );
        store.insert(
            UserCalendar::new("user2", "09:00", "21:00", "UTC").with_events(vec![
                CalendarEvent::busy("2025-06-20T11:00:00", "2025-06-20T12:00:00"),
                CalendarEvent::busy("2025-06-20T15:00:00", "2025-06-20T16:00:00"),
                CalendarEvent::busy("2025-06-21T18:00:00", "2025-06-21T19:00:00"),
            ]),
        );
        store.insert(
            UserCalendar::new("user3", "08:00", "20:00", "UTC").with_events(vec![
                CalendarEvent::busy("2025-06-20T08:30:00", "2025-06-20T09:30:00"),
                CalendarEvent::busy("2025-06-20T17:00:00", "2025-06-20T18:00:00"),
                CalendarEvent::busy("2025-06-21T12:00:00", "2025-06-21T13:00:00"),
            ]),
        );
        store
    }

    /// Inserts or replaces a calendar, keyed by its user id.
    pub fn insert(&mut self, calendar: UserCalendar) {
        self.calendars.insert(calendar.user_id.clone(), calendar);
    }

    /// Looks up one calendar.
    pub fn get(&self, user_id: &str) -> Option<&UserCalendar> {
        self.calendars.get(user_id)
    }

    /// Resolves a list of user ids to calendars, in request order.
    ///
    /// Returns the first unknown user id as an error.
    pub fn resolve(&self, user_ids: &[String]) -> Result<Vec<UserCalendar>, String> {
        user_ids
            .iter()
            .map(|id| self.get(id).cloned().ok_or_else(|| id.clone()))
            .collect()
    }

    /// Returns all known user ids, sorted.
    pub fn user_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.calendars.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Returns the number of stored calendars.
    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    /// Returns true if the store holds no calendars.
    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }
}
