//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{error, warn};

use crate::{engine::Command, state::AppState};
use super::{
    input::{CountdownConfigInput, IntervalConfigInput, ModeRequest, SequenceModeRequest},
    responses::{ApiResponse, HealthResponse, StatusResponse},
};

/// Send `command` to the engine and wrap the resulting state
async fn apply(
    state: &AppState,
    command: Command,
    message: String,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.apply(command).await {
        Ok(timer) => Ok(Json(ApiResponse::new(message, timer))),
        Err(e) => {
            error!("Failed to apply command: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle POST /mode - Switch timer mode
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ModeRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let message = format!("Switched to {} mode", request.mode.as_str());
    apply(&state, Command::SetMode(request.mode), message).await
}

/// Handle PUT /config/interval - Replace the interval configuration
pub async fn interval_config_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<IntervalConfigInput>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let config = input.into_config();
    apply(
        &state,
        Command::UpdateIntervalConfig(config),
        "Interval configuration updated".to_string(),
    )
    .await
}

/// Handle PUT /config/countdown - Replace the countdown configuration
pub async fn countdown_config_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CountdownConfigInput>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let config = input.into_config();
    apply(
        &state,
        Command::UpdateCountdownConfig(config),
        "Countdown configuration updated".to_string(),
    )
    .await
}

/// Handle POST /start - Start or resume the timer
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, Command::Start, "Timer started".to_string()).await
}

/// Handle POST /pause - Pause the timer
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, Command::Pause, "Timer paused".to_string()).await
}

/// Handle POST /reset - Reinitialize the current mode
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, Command::Reset, "Timer reset".to_string()).await
}

/// Handle POST /sequence - Append an entry to the sequence
pub async fn sequence_add_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<IntervalConfigInput>,
) -> Result<Json<ApiResponse>, StatusCode> {
    apply(
        &state,
        Command::AddToSequence(input.into_config()),
        "Added to sequence".to_string(),
    )
    .await
}

/// Handle PUT /sequence/:index - Replace a sequence entry
pub async fn sequence_update_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
    Json(input): Json<IntervalConfigInput>,
) -> Result<Json<ApiResponse>, StatusCode> {
    check_sequence_index(&state, index)?;
    apply(
        &state,
        Command::UpdateInSequence(index, input.into_config()),
        format!("Updated sequence entry {}", index),
    )
    .await
}

/// Handle DELETE /sequence/:index - Remove a sequence entry
pub async fn sequence_remove_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ApiResponse>, StatusCode> {
    check_sequence_index(&state, index)?;
    apply(
        &state,
        Command::RemoveFromSequence(index),
        format!("Removed sequence entry {}", index),
    )
    .await
}

/// Handle DELETE /sequence - Clear the sequence and leave sequence mode
pub async fn sequence_clear_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, Command::ClearSequence, "Sequence cleared".to_string()).await
}

/// Handle PUT /sequence/mode - Turn sequence mode on or off
pub async fn sequence_mode_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SequenceModeRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let message = if request.enabled {
        "Sequence mode enabled"
    } else {
        "Sequence mode disabled"
    };
    apply(
        &state,
        Command::SetSequenceModeEnabled(request.enabled),
        message.to_string(),
    )
    .await
}

/// Reject indices the engine would ignore, so the client learns about it
fn check_sequence_index(state: &AppState, index: usize) -> Result<(), StatusCode> {
    let len = state.timer.current().state.sequence.len();
    if index >= len {
        warn!("Sequence index {} out of range (len {})", index, len);
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(())
}

/// Handle GET /state - Return the current timer state and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.timer.current(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /events - Stream every published snapshot
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let updates = state.timer.subscribe();

    let stream = stream::unfold((updates, true), |(mut updates, first)| async move {
        if !first && updates.changed().await.is_err() {
            return None;
        }
        let snapshot = updates.borrow_and_update().clone();
        let event = match Event::default().event("state").json_data(&snapshot) {
            Ok(event) => event,
            Err(e) => {
                warn!("Failed to encode state event: {}", e);
                Event::default().event("error").data("encoding failed")
            }
        };
        Some((Ok(event), (updates, false)))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
