//! API module for shared HTTP API functionality
//!
//! # Design Principle
//!
//! This module contains ONLY:
//! - Pure functions (no HTTP framework dependencies)
//! - Shared request/response types
//!
//! `libris-api` wraps these with axum middleware and handlers.

pub mod auth;
pub mod types;

pub use auth::{extract_bearer, generate_secret, ApiAuthError, Claims, OperatorCredentials, TokenService};
pub use types::{ErrorResponse, LoginRequest, TokenResponse};
