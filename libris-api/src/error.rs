//! Error types for libris-api
//!
//! Every handler returns [`ApiResult`]; the error is rendered as a status code
//! plus a one-line `{"error": "..."}` body. Store failures are logged here and
//! replaced by a per-operation message so driver details never reach clients.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use libris_common::api::ErrorResponse;
use thiserror::Error;
use tracing::{error, warn};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body, bad path parameter or failed field validation (400)
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid bearer token (401)
    #[error("Unauthorized")]
    Unauthorized,

    /// Login pair does not match the operator identity (401)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Row not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Store failure, including constraint violations (500)
    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: libris_common::Error,
    },

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store { .. } | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store { context, source } = &self {
            if source.is_constraint_violation() {
                warn!(error = %source, "{}", context);
            } else {
                error!(error = %source, "{}", context);
            }
        }

        let status = self.status();
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Attach a per-operation message to repository errors
pub trait StoreResultExt<T> {
    fn or_api(self, context: &'static str) -> ApiResult<T>;
}

impl<T> StoreResultExt<T> for libris_common::Result<T> {
    fn or_api(self, context: &'static str) -> ApiResult<T> {
        self.map_err(|err| match err {
            libris_common::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            libris_common::Error::NotFound(msg) => ApiError::NotFound(msg),
            source => ApiError::Store { context, source },
        })
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
