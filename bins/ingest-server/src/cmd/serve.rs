use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use ingest_engine::bootstrap::Engine;

use crate::config::ServeArgs;
use crate::error::ServerError;

pub async fn run(args: ServeArgs) -> Result<(), ServerError> {
    tracing::info!("ingest-server starting");

    let config = args.load_config()?;
    let port = config.api_port;
    let engine = Arc::new(Engine::bootstrap(config)?);

    // --- CancellationToken for graceful shutdown ---
    let token = CancellationToken::new();

    // --- API server (REST + functions + events) ---
    let api_engine = engine.clone();
    let api_token = token.clone();
    let mut api_handle =
        tokio::spawn(async move { ingest_api_server::run(port, api_engine, api_token).await });

    tracing::info!(port, "api server listening");

    // --- Wait for Ctrl+C, or for the server to stop on its own ---
    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res?;
            tracing::info!("shutting down...");
        }
        res = &mut api_handle => {
            // server stopped without a shutdown request
            res??;
            return Ok(());
        }
    }

    token.cancel();

    // Drain: wait up to 5s for in-flight requests
    match tokio::time::timeout(Duration::from_secs(5), &mut api_handle).await {
        Ok(Ok(Err(e))) => tracing::error!(error = %e, "api server error"),
        Ok(_) => {}
        Err(_) => {
            tracing::warn!("api server did not stop in time, aborting");
            api_handle.abort();
        }
    }

    tracing::info!(values = engine.facade().store().len(), "shutdown complete");
    Ok(())
}
