use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use ingest_engine::handlers::{EVENT_A, EVENT_B};
use ingest_engine::router::RouteOutcome;

use crate::AppState;
use crate::cloudevent::CloudEvent;
use crate::error::ApiError;
use crate::functions;

// ═══════════════════════════════════════════════════════════════
//  Events: POST /router
// ═══════════════════════════════════════════════════════════════

pub(crate) async fn handle_router(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let event = CloudEvent::from_http(&headers, body)?;
    route(&state, event)?;
    Ok(StatusCode::NO_CONTENT)
}

// ═══════════════════════════════════════════════════════════════
//  Events: POST /  (function selected by ce-type)
// ═══════════════════════════════════════════════════════════════

pub(crate) async fn handle_cloud_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let event = CloudEvent::from_http(&headers, body)?;
    let function = event
        .event_type
        .clone()
        .ok_or_else(|| ApiError::Envelope("missing event type".into()))?;
    tracing::info!(function = %function, id = ?event.id, source = %event.source, "cloud event received");

    match function.as_str() {
        "router" => {
            route(&state, event)?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        EVENT_A | EVENT_B => {
            functions::invoke_handler(&state, &function, &event.text()?)?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        "addValue" => {
            functions::add_value(&state, event.text()?);
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        "getData" => {
            let values = functions::get_data(&state, &Default::default());
            Ok(Json(values).into_response())
        }
        _ => Err(ApiError::UnknownFunction(function)),
    }
}

fn route(state: &AppState, event: CloudEvent) -> Result<RouteOutcome, ApiError> {
    let outcome = state.engine.router().route(event.into_event())?;
    tracing::debug!(outcome = ?outcome, "event routed");
    Ok(outcome)
}
