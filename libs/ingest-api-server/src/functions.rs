use std::collections::HashMap;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;

use ingest_engine::handlers::{EVENT_A, EVENT_B};

use crate::AppState;
use crate::error::ApiError;

// ═══════════════════════════════════════════════════════════════
//  Functions: POST /getData, /addValue, /eventA, /eventB
// ═══════════════════════════════════════════════════════════════

/// `getData`: parameters are accepted and logged but do not affect the result.
pub(crate) async fn handle_get_data(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<String>>, ApiError> {
    let params = parse_params(&body)?;
    Ok(Json(get_data(&state, &params)))
}

pub(crate) async fn handle_add_value(
    State(state): State<AppState>,
    Json(value): Json<String>,
) -> StatusCode {
    add_value(&state, value);
    StatusCode::NO_CONTENT
}

pub(crate) async fn handle_event_a(
    State(state): State<AppState>,
    Json(data): Json<String>,
) -> Result<StatusCode, ApiError> {
    invoke_handler(&state, EVENT_A, &data)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn handle_event_b(
    State(state): State<AppState>,
    Json(data): Json<String>,
) -> Result<StatusCode, ApiError> {
    invoke_handler(&state, EVENT_B, &data)?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_params(body: &[u8]) -> Result<HashMap<String, serde_json::Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(HashMap::new());
    }
    match serde_json::from_slice::<Option<HashMap<String, serde_json::Value>>>(body)? {
        Some(params) => Ok(params),
        None => Ok(HashMap::new()),
    }
}

pub(crate) fn get_data(
    state: &AppState,
    params: &HashMap<String, serde_json::Value>,
) -> Vec<String> {
    tracing::info!(params = ?params, "invoked getter");
    state.engine.facade().get_all()
}

pub(crate) fn add_value(state: &AppState, value: String) {
    tracing::info!("invoked writer");
    state.engine.facade().add(value);
}

pub(crate) fn invoke_handler(state: &AppState, name: &str, data: &str) -> Result<(), ApiError> {
    let handler = state
        .engine
        .handler(name)
        .ok_or_else(|| ApiError::UnknownFunction(name.to_string()))?;
    handler.handle(data);
    Ok(())
}
