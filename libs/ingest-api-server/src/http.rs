use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;

// ═══════════════════════════════════════════════════════════════
//  REST: GET {prefix}/data
// ═══════════════════════════════════════════════════════════════

pub(crate) async fn handle_get_data(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!("invoked getData");
    Json(state.engine.facade().get_all())
}

// ═══════════════════════════════════════════════════════════════
//  REST: GET {prefix}/data/{index}?upper=true  (suffix from header)
// ═══════════════════════════════════════════════════════════════

#[derive(Deserialize)]
pub(crate) struct IndexParams {
    #[serde(default)]
    upper: bool,
}

pub(crate) async fn handle_get_by_index(
    State(state): State<AppState>,
    Path(index): Path<i64>,
    Query(params): Query<IndexParams>,
    headers: HeaderMap,
) -> Result<String, ApiError> {
    let suffix = headers
        .get(&state.suffix_header)
        .map(|v| {
            String::from_utf8(v.as_bytes().to_vec())
                .map_err(|e| ApiError::Header(format!("{}: {e}", state.suffix_header)))
        })
        .transpose()?;
    tracing::info!(
        index,
        header = %state.suffix_header,
        suffix = ?suffix,
        upper = params.upper,
        "invoked getByIndex"
    );

    Ok(state
        .engine
        .facade()
        .get_by_index(index, suffix.as_deref(), params.upper)?)
}
