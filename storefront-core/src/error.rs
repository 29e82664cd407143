use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::ErrorBody;
use crate::store::StoreError;

/// Errors surfaced to HTTP clients. Every variant answers `404 Not Found`
/// with a `{"error": "..."}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown resource '{0}'")]
    UnknownResource(String),
    #[error("index {index} out of range for {resource} (len {len})")]
    IndexOutOfRange {
        resource: String,
        index: i64,
        len: usize,
    },
}

impl ApiError {
    /// Attach the resource name to a store failure.
    pub fn from_store(resource: &str, err: StoreError) -> Self {
        match err {
            StoreError::IndexOutOfRange { index, len } => Self::IndexOutOfRange {
                resource: resource.to_string(),
                index,
                len,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let msg = self.to_string();
        tracing::warn!(error = %msg, "request rejected");
        (StatusCode::NOT_FOUND, Json(ErrorBody { error: msg })).into_response()
    }
}
