//! Daemon: calendar store, free-time request dispatch, socket server.
//!
//! This crate provides the whenfree server that handles:
//! - Unix socket IPC for client communication
//! - An in-memory calendar store (stand-in for a real backend)
//! - Dispatch of free-time requests into the core pipeline
//!
//! # Example
//!
//! ```rust,no_run
//! use whenfree_server::{CalendarStore, ServerConfig, SocketServer, make_connection_handler, new_shared_state};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let state = new_shared_state(CalendarStore::sample(), &config);
//!     let server = SocketServer::new(config).await?;
//!     server.run(make_connection_handler(state)).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod handler;
mod socket;
mod store;

pub use config::{ServerConfig, default_socket_path};
pub use error::{ServerError, ServerResult};
pub use handler::{RequestHandler, ServerState, SharedState, make_connection_handler, new_shared_state};
pub use socket::{Connection, SocketServer};
pub use store::CalendarStore;
