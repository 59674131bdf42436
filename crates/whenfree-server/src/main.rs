//! whenfree server entry point.

use tracing::info;

use whenfree_core::tracing::{TracingConfig, init_tracing};
use whenfree_server::{
    CalendarStore, ServerConfig, ServerResult, SocketServer, make_connection_handler,
    new_shared_state,
};

#[tokio::main]
async fn main() -> ServerResult<()> {
    init_tracing(TracingConfig::daemon()).expect("failed to initialize tracing");

    let mut config = ServerConfig::default();
    if let Ok(path) = std::env::var("WHENFREE_SOCKET") {
        config.socket_path = path.into();
    }

    let state = new_shared_state(CalendarStore::sample(), &config);
    let server = SocketServer::new(config).await?;
    info!(path = %server.socket_path().display(), "whenfree server started");

    server
        .run_until_shutdown(make_connection_handler(state), async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
}
