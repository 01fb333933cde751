//! Shared API request/response types

use serde::{Deserialize, Serialize};

/// `POST /login` body
///
/// Absent fields read as empty strings and fail the credential check (401)
/// rather than the decoder (400).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /login` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Uniform error envelope
///
/// Every non-2xx response carries a single-line message:
///
/// ```json
/// {"error": "Book not found"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
