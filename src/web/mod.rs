//! HTTP front end
//!
//! Routes, handlers, page templates and the shared state they run on.

pub mod handlers;
pub mod links;
pub mod router;
pub mod state;
pub mod templates;

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

pub use router::create_router;
pub use state::{AppState, WebSettings};

use crate::errors::ServerError;

/// Bind the listener for `addr`
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            address: addr.to_string(),
            source,
        })
}

/// Serve until Ctrl-C
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), ServerError> {
    let app = create_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler, run until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully...");
}
