//! # API Error Types
//!
//! Maps store failures onto the registry protocol's status codes.
//! Registry clients only look at the status, so error responses carry an
//! empty body; the detail goes to the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tfar_store::StoreError;

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource missing or unusable (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport or internal failure (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Classify a store failure and log it against the request it failed.
    pub fn from_store(err: StoreError, request: &str) -> Self {
        if err.is_not_found() {
            tracing::warn!(request, error = %err, "registry lookup failed");
            Self::NotFound(err.to_string())
        } else {
            tracing::error!(request, error = %err, "registry backend failure");
            Self::Internal(err.to_string())
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}
