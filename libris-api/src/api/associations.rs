//! Book <-> author association endpoints

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use libris_common::db::{self, Author, Book};

use crate::error::{ApiResult, StoreResultExt};
use crate::AppState;

/// POST /api/books/:book_id/authors/:author_id
///
/// Unknown ids and repeated pairs are rejected by the store (500).
pub async fn link_book_author(
    State(state): State<AppState>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path((book_id, author_id)) = ids?;
    db::link_book_author(&state.db, book_id, author_id)
        .await
        .or_api("Failed to link book to author")?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/authors/:id/books
pub async fn books_by_author(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<Book>>> {
    let Path(author_id) = id?;
    let books = db::books_by_author(&state.db, author_id)
        .await
        .or_api("Failed to retrieve books by author")?;
    Ok(Json(books))
}

/// GET /api/books/:id/authors
pub async fn authors_by_book(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<Author>>> {
    let Path(book_id) = id?;
    let authors = db::authors_by_book(&state.db, book_id)
        .await
        .or_api("Failed to retrieve authors by book")?;
    Ok(Json(authors))
}
