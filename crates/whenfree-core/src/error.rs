//! Scheduling error types.

use thiserror::Error;

/// Result type for scheduling operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Errors raised while normalizing and validating calendar input.
///
/// All of these are raised eagerly during pipeline processing and
/// propagate to the caller: a malformed calendar cannot yield a
/// meaningful partial result for that user.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// An event or boundary timestamp could not be resolved to a UTC instant.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// A timezone name is not a recognized IANA zone.
    #[error("unknown timezone: {0:?}")]
    UnknownTimezone(String),

    /// An availability bound is not a valid HH:MM time of day.
    #[error("invalid time of day: {0:?} (expected HH:MM)")]
    InvalidTimeOfDay(String),

    /// A calendar violates a structural invariant.
    #[error("invalid calendar for {user_id:?}: {reason}")]
    InvalidCalendar { user_id: String, reason: String },
}

impl ScheduleError {
    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid calendar error.
    pub fn invalid_calendar(user_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCalendar {
            user_id: user_id.into(),
            reason: reason.into(),
        }
    }
}
