//! # HTTP Errors
//!
//! Every failure leaves the server as the same JSON envelope:
//!
//! ```json
//! { "kind": "not_found", "message": "Customer not found" }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::store::StoreError;

/// Result type for request handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No customer matches the id
    #[error("Customer not found")]
    NotFound,

    /// Body was not valid JSON or did not describe a customer
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The store failed while serving the request
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Wrap a store failure with the operation that hit it
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { context, source }
    }

    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound => "not_found",
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::Store { .. } => "store_failure",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            // Rejected input shares the failure status with store errors
            ApiError::InvalidRequest(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub kind: &'static str,
    pub message: String,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(err: &ApiError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::NotFound => debug!("customer not found"),
            ApiError::InvalidRequest(reason) => debug!(%reason, "rejected request body"),
            ApiError::Store { context, source } => {
                error!(error = %source, fatal = source.is_fatal(), "{}", context)
            }
        }

        let status = self.status_code();
        (status, Json(ErrorEnvelope::from(&self))).into_response()
    }
}
