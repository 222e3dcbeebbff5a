pub mod cloudevent;
pub mod error;
mod events;
mod functions;
mod http;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderName;
use axum::routing::{get, post};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use ingest_engine::bootstrap::Engine;

pub use error::ApiError;

#[derive(Clone)]
pub(crate) struct AppState {
    engine: Arc<Engine>,
    suffix_header: HeaderName,
}

/// Build the HTTP application: REST routes, function routes and event routes.
pub fn app(engine: Arc<Engine>) -> Result<Router, ApiError> {
    let config = engine.config();
    let suffix_header = HeaderName::try_from(config.suffix_header.as_str())
        .map_err(|e| ApiError::Config(format!("suffix_header '{}': {e}", config.suffix_header)))?;
    let prefix = config.rest_prefix.clone();

    tracing::info!(prefix = %prefix, "rest api is starting");
    tracing::info!("functions are starting");

    let state = AppState {
        engine,
        suffix_header,
    };

    Ok(Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(&format!("{prefix}/data"), get(http::handle_get_data))
        .route(&format!("{prefix}/data/{{index}}"), get(http::handle_get_by_index))
        .route("/getData", post(functions::handle_get_data))
        .route("/addValue", post(functions::handle_add_value))
        .route("/eventA", post(functions::handle_event_a))
        .route("/eventB", post(functions::handle_event_b))
        .route("/router", post(events::handle_router))
        .route("/", post(events::handle_cloud_event))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// HTTP API server: serves until `shutdown` is cancelled.
pub async fn run(
    port: u16,
    engine: Arc<Engine>,
    shutdown: CancellationToken,
) -> Result<(), ApiError> {
    let app = app(engine)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|source| ApiError::Bind { port, source })?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(ApiError::Serve)?;

    Ok(())
}
