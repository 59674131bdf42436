//! Core types and the mutual free-time interval pipeline.

pub mod calendar;
pub mod error;
pub mod interval;
pub mod schedule;
pub mod time;
pub mod tracing;

pub use calendar::{BlockTag, CalendarEvent, EventStatus, FreeBlock, UserCalendar};
pub use error::{ScheduleError, ScheduleResult};
pub use interval::{BusyInterval, Interval};
pub use schedule::{DEFAULT_MIN_BLOCK_MINUTES, calculate_mutual_free_time};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
