//! HTTP API module
//!
//! This is the presentation boundary: handlers coerce input, send commands
//! to the engine task and render the snapshots it publishes.

pub mod handlers;
pub mod input;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/mode", post(mode_handler))
        .route("/config/interval", put(interval_config_handler))
        .route("/config/countdown", put(countdown_config_handler))
        .route("/start", post(start_handler))
        .route("/pause", post(pause_handler))
        .route("/reset", post(reset_handler))
        .route("/sequence", post(sequence_add_handler).delete(sequence_clear_handler))
        .route("/sequence/mode", put(sequence_mode_handler))
        .route(
            "/sequence/:index",
            put(sequence_update_handler).delete(sequence_remove_handler),
        )
        .route("/state", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
