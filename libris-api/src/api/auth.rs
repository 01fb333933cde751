//! Login endpoint and bearer-token middleware
//!
//! The gate is binary: a correctly signed, unexpired token lets the request
//! through; anything else is a uniform 401.

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Json,
};
use libris_common::api::{ApiAuthError, LoginRequest, TokenResponse};
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /login
///
/// Exchanges the operator username/password for a signed bearer token.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(credentials) = body?;

    match state.tokens.login(&credentials.username, &credentials.password) {
        Ok(token) => {
            info!(username = %credentials.username, "Issued access token");
            Ok(Json(TokenResponse { token }))
        }
        Err(ApiAuthError::InvalidCredentials) => {
            warn!(username = %credentials.username, "Rejected login");
            Err(ApiError::InvalidCredentials)
        }
        Err(e) => Err(ApiError::Internal(format!("Failed to generate token: {}", e))),
    }
}

/// Authentication middleware
///
/// Applied to `/api/*` only. `/login` and `/health` do NOT use it.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match state.tokens.verify_header(header) {
        Ok(claims) => {
            debug!(subject = %claims.sub, path = %request.uri().path(), "Token accepted");
            Ok(next.run(request).await)
        }
        Err(e) => {
            debug!(reason = %e, path = %request.uri().path(), "Token rejected");
            Err(ApiError::Unauthorized)
        }
    }
}
