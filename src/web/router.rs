//! Router Configuration
//!
//! Route configuration for the share flow.

use axum::{routing::get, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::constants::server;
use crate::web::{handlers, state::AppState};

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.settings().assets_dir);

    Router::new()
        .route("/", get(handlers::start))
        .route(server::RETURN_PATH, get(handlers::share_return))
        .nest_service("/assets", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
