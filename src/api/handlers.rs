//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{debug, error, info, warn};

use crate::{
    state::{AppState, TimerState},
    timer::{normalize_field_value, DraftSettings},
};
use super::responses::{
    ApiResponse, DraftFieldRequest, DraftResponse, HealthResponse, ModeRequest, StatusResponse,
};

/// Turn the result of an engine command into an HTTP response
fn command_response(
    state: &AppState,
    action: &str,
    result: Result<TimerState, String>,
    message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(timer) => {
            state.record_action(action);
            info!("{} endpoint called - timer is {}", action, timer.phase.as_str());
            Ok(Json(ApiResponse::new(message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to {} timer: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn draft_response(result: Result<DraftSettings, String>) -> Result<Json<DraftResponse>, StatusCode> {
    match result {
        Ok(draft) => Ok(Json(DraftResponse::new(draft))),
        Err(e) => {
            error!("Failed to access draft settings: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.engine.start();
    command_response(&state, "start", result, "Timer started")
}

/// Handle POST /pause - Pause a running countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.engine.pause();
    command_response(&state, "pause", result, "Timer paused")
}

/// Handle POST /reset - Return to idle
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.engine.reset();
    command_response(&state, "reset", result, "Timer reset")
}

/// Handle POST /apply - Commit draft settings for the active mode
pub async fn apply_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.engine.apply_settings();
    command_response(&state, "apply", result, "Settings applied")
}

/// Handle PUT /mode - Switch between default and pomodoro mode
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ModeRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.engine.set_mode(request.mode);
    command_response(&state, "mode", result, "Mode updated")
}

/// Handle GET /draft - Draft settings for the active mode
pub async fn draft_handler(State(state): State<Arc<AppState>>) -> Result<Json<DraftResponse>, StatusCode> {
    draft_response(state.engine.draft())
}

/// Handle PUT /draft - Stage one settings field
pub async fn set_draft_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DraftFieldRequest>,
) -> Result<Json<DraftResponse>, StatusCode> {
    let value = normalize_field_value(request.field, &request.value);
    if request.value.as_u64() != Some(u64::from(value)) {
        debug!("Normalized {:?} input {} to {}", request.field, request.value, value);
    }
    draft_response(state.engine.set_draft_field(request.field, value))
}

/// Handle DELETE /draft - Discard staged settings
pub async fn cancel_draft_handler(State(state): State<Arc<AppState>>) -> Result<Json<DraftResponse>, StatusCode> {
    draft_response(state.engine.cancel_draft())
}

/// Handle GET /status - Return current timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.engine.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream the timer state on every change
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.engine.subscribe();

    // The first item is the current state, later items follow changes.
    let updates = stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let timer = rx.borrow_and_update().clone();
        let event = match serde_json::to_string(&timer) {
            Ok(data) => Event::default().event("timer").data(data),
            Err(e) => {
                warn!("Failed to serialize timer state: {}", e);
                Event::default().comment("serialization failed")
            }
        };
        Some((Ok::<_, Infallible>(event), (rx, false)))
    });

    Sse::new(updates).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
