//! Book endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use libris_common::db::{self, Book, BookInput};

use crate::error::{ApiResult, StoreResultExt};
use crate::AppState;

/// GET /api/books
pub async fn list_books(State(state): State<AppState>) -> ApiResult<Json<Vec<Book>>> {
    let books = db::list_books(&state.db)
        .await
        .or_api("Failed to retrieve books")?;
    Ok(Json(books))
}

/// POST /api/books
pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<BookInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    let Json(input) = body?;
    let book = db::create_book(&state.db, &input)
        .await
        .or_api("Failed to create book")?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// GET /api/books/:id
pub async fn get_book(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Book>> {
    let Path(id) = id?;
    let book = db::get_book(&state.db, id)
        .await
        .or_api("Failed to retrieve book")?;
    Ok(Json(book))
}

/// PUT /api/books/:id
pub async fn update_book(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<BookInput>, JsonRejection>,
) -> ApiResult<Json<Book>> {
    let Path(id) = id?;
    let Json(input) = body?;
    let book = db::update_book(&state.db, id, &input)
        .await
        .or_api("Failed to update book")?;
    Ok(Json(book))
}

/// DELETE /api/books/:id
pub async fn delete_book(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    db::delete_book(&state.db, id)
        .await
        .or_api("Failed to delete book")?;
    Ok(StatusCode::NO_CONTENT)
}
