//! Request and response types for the whenfree protocol.

use serde::{Deserialize, Serialize};
use whenfree_core::FreeBlock;

use crate::PROTOCOL_VERSION;

/// Message envelope wrapping all protocol messages.
///
/// Every message exchanged between client and server is wrapped in this
/// envelope, which provides versioning and request correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Protocol version (always "1" for v1).
    pub protocol_version: String,
    /// Unique request ID for correlation.
    pub request_id: String,
    /// The actual payload.
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Creates a new envelope with the current protocol version.
    pub fn new(request_id: impl Into<String>, payload: T) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            request_id: request_id.into(),
            payload,
        }
    }

    /// Creates a request envelope.
    pub fn request(request_id: impl Into<String>, request: T) -> Self {
        Self::new(request_id, request)
    }

    /// Creates a response envelope.
    pub fn response(request_id: impl Into<String>, response: T) -> Self {
        Self::new(request_id, response)
    }

    /// Checks if this envelope uses a compatible protocol version.
    pub fn is_compatible(&self) -> bool {
        self.protocol_version == PROTOCOL_VERSION
    }
}

/// Request types that can be sent from client to server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Compute mutual free-time blocks for a set of users.
    FreeTime {
        /// User identifiers to resolve against the calendar store.
        users: Vec<String>,
        /// Minimum block length in minutes; the server default applies
        /// when omitted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_block_minutes: Option<i64>,
    },

    /// List the user identifiers known to the calendar store.
    ListUsers,

    /// Ping to check server liveness.
    Ping,

    /// Request server shutdown.
    Shutdown,
}

impl Request {
    /// Creates a FreeTime request with the server's default minimum block.
    pub fn free_time(users: Vec<String>) -> Self {
        Self::FreeTime {
            users,
            min_block_minutes: None,
        }
    }

    /// Creates a FreeTime request with an explicit minimum block.
    pub fn free_time_with_min_block(users: Vec<String>, min_block_minutes: i64) -> Self {
        Self::FreeTime {
            users,
            min_block_minutes: Some(min_block_minutes),
        }
    }
}

/// Response types sent from server to client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Computed mutual free-time blocks.
    FreeTime {
        /// The blocks, sorted by date and start time.
        blocks: Vec<FreeBlock>,
    },

    /// Known user identifiers.
    Users {
        /// Sorted user identifiers.
        users: Vec<String>,
    },

    /// Generic success response.
    Ok,

    /// Pong response to Ping.
    Pong,

    /// Error response.
    Error {
        /// Error details.
        #[serde(flatten)]
        error: ErrorResponse,
    },
}

impl Response {
    /// Creates a FreeTime response.
    pub fn free_time(blocks: Vec<FreeBlock>) -> Self {
        Self::FreeTime { blocks }
    }

    /// Creates a Users response.
    pub fn users(users: Vec<String>) -> Self {
        Self::Users { users }
    }

    /// Creates an Error response.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Error {
            error: ErrorResponse {
                code,
                message: message.into(),
            },
        }
    }

    /// Returns true if this is a success response.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Error { .. })
    }

    /// Returns the error if this is an error response.
    pub fn as_error(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Error { error } => Some(error),
            _ => None,
        }
    }
}

/// Error details carried by an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Unknown or internal error.
    InternalError,

    /// Invalid request format.
    InvalidRequest,

    /// A requested user is not in the calendar store.
    UnknownUser,

    /// A calendar failed validation (bad timestamp, timezone, or bounds).
    InvalidCalendar,

    /// Server is shutting down.
    ShuttingDown,
}

impl ErrorCode {
    /// Returns a human-readable description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::InternalError => "An internal error occurred",
            Self::InvalidRequest => "The request was invalid",
            Self::UnknownUser => "Requested user is not known to the calendar store",
            Self::InvalidCalendar => "A calendar failed validation",
            Self::ShuttingDown => "Server is shutting down",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use whenfree_core::BlockTag;

    #[test]
    fn envelope_versioning() {
        let envelope = Envelope::request("req-1", Request::Ping);
        assert_eq!(envelope.protocol_version, PROTOCOL_VERSION);
        assert!(envelope.is_compatible());

        let stale = Envelope {
            protocol_version: "0".to_string(),
            request_id: "req-2".to_string(),
            payload: Request::Ping,
        };
        assert!(!stale.is_compatible());
    }

    #[test]
    fn free_time_request_serde() {
        let request = Request::free_time(vec!["user1".to_string(), "user2".to_string()]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "free_time");
        assert_eq!(json["users"][0], "user1");
        assert!(json.get("min_block_minutes").is_none());

        let parsed: Request = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn min_block_round_trips() {
        let request = Request::free_time_with_min_block(vec!["user1".to_string()], 45);
        let json = serde_json::to_string(&request).unwrap();
        let parsed: Request = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn free_time_response_serializes_blocks() {
        let response = Response::free_time(vec![FreeBlock {
            date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            start: "08:00".to_string(),
            end: "09:00".to_string(),
            participants_available: vec!["user1".to_string()],
            tag: BlockTag::BestMatch,
            score: 60.0,
        }]);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "free_time");
        assert_eq!(json["blocks"][0]["date"], "2025-06-20");
        assert_eq!(json["blocks"][0]["tag"], "best_match");
    }

    #[test]
    fn error_response_flattens() {
        let response = Response::error(ErrorCode::UnknownUser, "no calendar for user9");
        assert!(!response.is_success());
        assert_eq!(response.as_error().unwrap().code, ErrorCode::UnknownUser);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["code"], "unknown_user");
        assert_eq!(json["message"], "no calendar for user9");
    }
}
