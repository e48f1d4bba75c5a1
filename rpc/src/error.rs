//! Error types for the RPC layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use goodhaul_lifecycle::LifecycleError;
use serde::Serialize;
use thiserror::Error;

/// Fatal server errors (bind/serve failures).
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// A lifecycle error leaving the service as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub LifecycleError);

impl From<LifecycleError> for ApiError {
    fn from(e: LifecycleError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LifecycleError::Validation(_) => StatusCode::BAD_REQUEST,
            LifecycleError::NotFound => StatusCode::NOT_FOUND,
            LifecycleError::AlreadyClaimed | LifecycleError::AlreadyTerminal => {
                StatusCode::CONFLICT
            }
            LifecycleError::NotAllowed => StatusCode::FORBIDDEN,
            LifecycleError::Expired => StatusCode::GONE,
            LifecycleError::InvalidCode => StatusCode::UNPROCESSABLE_ENTITY,
            LifecycleError::TooSoon { .. } => StatusCode::TOO_MANY_REQUESTS,
            LifecycleError::Storage(_) | LifecycleError::Corrupt(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Internal faults are logged here and reach the caller opaque.
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "internal error serving request");
            ErrorBody {
                error: "internal error".to_string(),
            }
        } else {
            ErrorBody {
                error: self.0.to_string(),
            }
        };
        (status, Json(body)).into_response()
    }
}
