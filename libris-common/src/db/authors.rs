//! Author database operations

use sqlx::SqlitePool;
use tracing::debug;

use super::models::{Author, AuthorInput};
use crate::{Error, Result};

/// Insert a new author; (name, country) must be unique
pub async fn create_author(pool: &SqlitePool, input: &AuthorInput) -> Result<Author> {
    input.validate()?;

    let result = sqlx::query("INSERT INTO authors (name, country) VALUES (?, ?)")
        .bind(&input.name)
        .bind(&input.country)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    debug!(author_id = id, "Created author");

    Ok(Author {
        id,
        name: input.name.clone(),
        country: input.country.clone(),
    })
}

/// Load author by id
pub async fn get_author(pool: &SqlitePool, id: i64) -> Result<Author> {
    let row = sqlx::query("SELECT id, name, country FROM authors WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref()
        .map(Author::from_row)
        .ok_or_else(|| Error::NotFound(format!("Author {} not found", id)))
}

/// All authors in store order
pub async fn list_authors(pool: &SqlitePool) -> Result<Vec<Author>> {
    let rows = sqlx::query("SELECT id, name, country FROM authors ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(Author::from_row).collect())
}

pub async fn update_author(pool: &SqlitePool, id: i64, input: &AuthorInput) -> Result<Author> {
    input.validate()?;

    let result = sqlx::query("UPDATE authors SET name = ?, country = ? WHERE id = ?")
        .bind(&input.name)
        .bind(&input.country)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Author {} not found", id)));
    }

    debug!(author_id = id, "Updated author");

    Ok(Author {
        id,
        name: input.name.clone(),
        country: input.country.clone(),
    })
}

pub async fn delete_author(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM authors WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Author {} not found", id)));
    }

    debug!(author_id = id, "Deleted author");
    Ok(())
}
