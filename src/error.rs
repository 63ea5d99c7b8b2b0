//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for all error conditions and implements Axum's
//! `IntoResponse` to convert errors to appropriate HTTP responses with JSON
//! error bodies.
//!
//! Error mappings:
//! - `Upstream`, `DuplicateSha`, `Internal` → 500
//! - `Cancelled` → 504
//! - `InvalidRequest` → 400

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::github::UpstreamError;

#[derive(Debug, Error)]
pub enum AppError {
    /// An upstream call failed; `op` names the operation that produced it.
    #[error("{op} failed: {source}")]
    Upstream {
        op: &'static str,
        #[source]
        source: UpstreamError,
    },

    /// The same commit SHA was observed twice within one run. SHAs are
    /// unique within a repository's history, so this is an upstream data
    /// error that must not be masked.
    #[error("duplicate commit sha: {0}")]
    DuplicateSha(String),

    /// The pipeline was abandoned after another stage failed or the request
    /// deadline elapsed.
    #[error("cancelled: {0}")]
    Cancelled(&'static str),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn upstream(op: &'static str, source: UpstreamError) -> Self {
        AppError::Upstream { op, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Upstream { .. } | AppError::DuplicateSha(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Cancelled(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
