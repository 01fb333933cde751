//! Author endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use libris_common::db::{self, Author, AuthorInput};

use crate::error::{ApiResult, StoreResultExt};
use crate::AppState;

pub async fn list_authors(State(state): State<AppState>) -> ApiResult<Json<Vec<Author>>> {
    let authors = db::list_authors(&state.db)
        .await
        .or_api("Failed to retrieve authors")?;
    Ok(Json(authors))
}

pub async fn create_author(
    State(state): State<AppState>,
    body: Result<Json<AuthorInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Author>)> {
    let Json(input) = body?;
    let author = db::create_author(&state.db, &input)
        .await
        .or_api("Failed to create author")?;
    Ok((StatusCode::CREATED, Json(author)))
}

pub async fn get_author(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Author>> {
    let Path(id) = id?;
    let author = db::get_author(&state.db, id)
        .await
        .or_api("Failed to retrieve author")?;
    Ok(Json(author))
}

pub async fn update_author(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<AuthorInput>, JsonRejection>,
) -> ApiResult<Json<Author>> {
    let Path(id) = id?;
    let Json(input) = body?;
    let author = db::update_author(&state.db, id, &input)
        .await
        .or_api("Failed to update author")?;
    Ok(Json(author))
}

pub async fn delete_author(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    db::delete_author(&state.db, id)
        .await
        .or_api("Failed to delete author")?;
    Ok(StatusCode::NO_CONTENT)
}
