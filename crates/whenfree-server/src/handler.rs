//! Request/response dispatch handler.
//!
//! Routes incoming protocol requests to the calendar store and the
//! core pipeline, and translates pipeline errors into protocol error
//! responses.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use whenfree_core::{ScheduleError, calculate_mutual_free_time};
use whenfree_protocol::{ErrorCode, Request, Response};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::socket::Connection;
use crate::store::CalendarStore;

/// Server state shared across all connections.
#[derive(Debug)]
pub struct ServerState {
    /// Resolves user ids to calendars.
    store: CalendarStore,
    /// Minimum block length applied when a request omits it.
    default_min_block_minutes: i64,
    /// Whether shutdown has been requested.
    shutdown_requested: bool,
}

/// Shared, concurrently accessible server state.
pub type SharedState = Arc<RwLock<ServerState>>;

/// Creates a new shared state.
pub fn new_shared_state(store: CalendarStore, config: &ServerConfig) -> SharedState {
    Arc::new(RwLock::new(ServerState::new(
        store,
        config.default_min_block_minutes,
    )))
}

impl ServerState {
    /// Creates a new server state around a calendar store.
    pub fn new(store: CalendarStore, default_min_block_minutes: i64) -> Self {
        Self {
            store,
            default_min_block_minutes,
            shutdown_requested: false,
        }
    }

    /// Returns the calendar store.
    pub fn store(&self) -> &CalendarStore {
        &self.store
    }

    /// Marks the server for shutdown.
    pub fn request_shutdown(&mut self) {
        self.shutdown_requested = true;
    }

    /// Returns true if shutdown has been requested.
    pub fn shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }
}

/// Maps a pipeline error to a protocol error response.
fn schedule_error_response(err: &ScheduleError) -> Response {
    let code = match err {
        ScheduleError::InvalidTimestamp { .. }
        | ScheduleError::UnknownTimezone(_)
        | ScheduleError::InvalidTimeOfDay(_)
        | ScheduleError::InvalidCalendar { .. } => ErrorCode::InvalidCalendar,
    };
    Response::error(code, err.to_string())
}

/// Request handler that processes incoming requests and produces responses.
pub struct RequestHandler {
    state: SharedState,
}

impl RequestHandler {
    /// Creates a new request handler with the given state.
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Handles a single request and returns the response.
    pub async fn handle(&self, request: &Request) -> Response {
        match request {
            Request::Ping => {
                debug!("Handling Ping request");
                Response::Pong
            }
            Request::ListUsers => {
                debug!("Handling ListUsers request");
                let state = self.state.read().await;
                Response::users(state.store.user_ids())
            }
            Request::FreeTime {
                users,
                min_block_minutes,
            } => {
                let state = self.state.read().await;
                let min_block = min_block_minutes.unwrap_or(state.default_min_block_minutes);
                debug!(?users, min_block, "Handling FreeTime request");

                let participants = match state.store.resolve(users) {
                    Ok(participants) => participants,
                    Err(unknown) => {
                        warn!(user = %unknown, "Unknown user in FreeTime request");
                        return Response::error(
                            ErrorCode::UnknownUser,
                            format!("no calendar for {unknown}"),
                        );
                    }
                };

                match calculate_mutual_free_time(&participants, min_block) {
                    Ok(blocks) => {
                        debug!(block_count = blocks.len(), "Returning free-time blocks");
                        Response::free_time(blocks)
                    }
                    Err(e) => {
                        warn!(error = %e, "Free-time computation rejected calendar data");
                        schedule_error_response(&e)
                    }
                }
            }
            Request::Shutdown => {
                info!("Handling Shutdown request");
                let mut state = self.state.write().await;
                state.request_shutdown();
                Response::Ok
            }
        }
    }

    /// Handles a connection, processing requests until the connection closes.
    pub async fn handle_connection(&self, mut conn: Connection) -> ServerResult<()> {
        loop {
            match conn.read_request().await {
                Ok(Some(envelope)) => {
                    let response = self.handle(&envelope.payload).await;
                    conn.respond(&envelope.request_id, response).await?;

                    if self.state.read().await.shutdown_requested() {
                        return Err(ServerError::Shutdown);
                    }
                }
                Ok(None) => {
                    debug!("Client disconnected");
                    return Ok(());
                }
                Err(e) => {
                    warn!(error = %e, "Error reading request");
                    return Err(e);
                }
            }
        }
    }
}

/// Creates a connection handler function for use with `SocketServer::run`.
pub fn make_connection_handler(
    state: SharedState,
) -> impl Fn(Connection) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>>
+ Send
+ Sync
+ 'static {
    move |conn| {
        let handler = RequestHandler::new(state.clone());
        Box::pin(async move {
            match handler.handle_connection(conn).await {
                Ok(()) | Err(ServerError::Shutdown) => {}
                Err(e) => warn!(error = %e, "Connection handler failed"),
            }
        })
    }
}
