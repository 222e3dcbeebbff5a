use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use ingest_api::error::{NotFound, RouteError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("invalid cloud event: {0}")]
    Envelope(String),

    #[error("invalid header {0}")]
    Header(String),

    #[error("invalid request body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("config: {0}")]
    Config(String),

    #[error("bind api :{port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("axum serve: {0}")]
    Serve(std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::UnknownFunction(_) => StatusCode::NOT_FOUND,
            ApiError::Route(_)
            | ApiError::Envelope(_)
            | ApiError::Header(_)
            | ApiError::Body(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Config(_) | ApiError::Bind { .. } | ApiError::Serve(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}
