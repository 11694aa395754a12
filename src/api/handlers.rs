//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use crate::{
    error::TimerError,
    input::Preset,
    state::{AppState, CollectionSnapshot, TimerId},
};
use super::responses::{
    AddTimerRequest, ApiResponse, ErrorResponse, HealthResponse, PresetResponse, StatusResponse,
};

/// Map a failed operation to a status code and body
fn error_response(state: &AppState, err: TimerError) -> Response {
    match err {
        TimerError::InvalidInput(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::invalid_input(err.to_string(), state.snapshot())),
        )
            .into_response(),
        TimerError::LimitReached { .. } => (
            StatusCode::CONFLICT,
            Json(ApiResponse::limit_reached(err.to_string(), state.snapshot())),
        )
            .into_response(),
        other => {
            error!("Timer operation failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(other.to_string())),
            )
                .into_response()
        }
    }
}

fn snapshot_response(
    state: &AppState,
    result: Result<CollectionSnapshot, TimerError>,
    message: String,
) -> Response {
    match result {
        Ok(timers) => Json(ApiResponse::ok(message, timers)).into_response(),
        Err(e) => error_response(state, e),
    }
}

/// Handle POST /timers - Add a timer from free-form text or a preset
pub async fn add_timer_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddTimerRequest>, JsonRejection>,
) -> Response {
    let input = match payload
        .map_err(|rejection| TimerError::InvalidInput(rejection.body_text()))
        .and_then(|Json(request)| request.into_input())
    {
        Ok(input) => input,
        Err(e) => {
            warn!("Add endpoint rejected request body: {}", e);
            return error_response(&state, e);
        }
    };

    match state.add_timer(&input) {
        Ok((id, timers)) => {
            info!("Add endpoint called - timer {} added", id);
            (StatusCode::CREATED, Json(ApiResponse::added(id, timers))).into_response()
        }
        Err(e) => {
            warn!("Add endpoint rejected {:?}: {}", input, e);
            error_response(&state, e)
        }
    }
}

/// Handle POST /timers/:id/start
pub async fn start_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Response {
    let result = state.start_timer(id);
    snapshot_response(&state, result, format!("Timer {} started", id))
}

/// Handle POST /timers/:id/pause
pub async fn pause_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Response {
    let result = state.pause_timer(id);
    snapshot_response(&state, result, format!("Timer {} paused", id))
}

/// Handle POST /timers/:id/reset - Zero a single timer
pub async fn reset_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Response {
    let result = state.reset_timer(id);
    snapshot_response(&state, result, format!("Timer {} reset", id))
}

/// Handle POST /timers/reset-all - Remove every timer
pub async fn reset_all_handler(State(state): State<Arc<AppState>>) -> Response {
    let result = state.reset_all();
    snapshot_response(&state, result, "All timers cleared".to_string())
}

/// Handle GET /timers
pub async fn list_timers_handler(State(state): State<Arc<AppState>>) -> Json<CollectionSnapshot> {
    Json(state.snapshot())
}

/// Handle GET /presets
pub async fn presets_handler() -> Json<Vec<PresetResponse>> {
    Json(Preset::ALL.into_iter().map(PresetResponse::from).collect())
}

/// Handle GET /status - Return timers, notifier and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timers: state.snapshot(),
        notifications: state.permission(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
