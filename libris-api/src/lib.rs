//! libris-api library - book/author catalog HTTP service
//!
//! Exposes the router and state so integration tests can drive the service
//! without binding a socket.

use std::sync::Arc;

use axum::Router;
use libris_common::api::TokenService;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;

pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Bearer token issuer/verifier
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, tokens: TokenService) -> Self {
        Self {
            db,
            tokens: Arc::new(tokens),
        }
    }
}

/// Build application router
///
/// `/login` and `/health` are public; everything under `/api` passes the
/// bearer-token gate first.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    // Protected routes (require authentication)
    let protected = Router::new()
        .route("/api/books", get(api::list_books).post(api::create_book))
        .route(
            "/api/books/:id",
            get(api::get_book)
                .put(api::update_book)
                .delete(api::delete_book),
        )
        .route("/api/books/:id/authors", get(api::authors_by_book))
        .route("/api/books/:id/authors/:author_id", post(api::link_book_author))
        .route("/api/authors", get(api::list_authors).post(api::create_author))
        .route(
            "/api/authors/:id",
            get(api::get_author)
                .put(api::update_author)
                .delete(api::delete_author),
        )
        .route("/api/authors/:id/books", get(api::books_by_author))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/login", post(api::login))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
