//! Book database operations

use sqlx::SqlitePool;
use tracing::debug;

use super::models::{Book, BookInput};
use crate::{Error, Result};

/// Insert a new book and return it with the store-assigned id
///
/// A duplicate ISBN surfaces as `Error::Database` (UNIQUE constraint).
pub async fn create_book(pool: &SqlitePool, input: &BookInput) -> Result<Book> {
    input.validate_for_create()?;

    let result = sqlx::query("INSERT INTO books (title, published_year, isbn) VALUES (?, ?, ?)")
        .bind(&input.title)
        .bind(input.published_year)
        .bind(&input.isbn)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    debug!(book_id = id, "Created book");

    Ok(Book {
        id,
        title: input.title.clone(),
        published_year: input.published_year,
        isbn: input.isbn.clone(),
    })
}

/// Load book by id
pub async fn get_book(pool: &SqlitePool, id: i64) -> Result<Book> {
    let row = sqlx::query("SELECT id, title, published_year, isbn FROM books WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref()
        .map(Book::from_row)
        .ok_or_else(|| Error::NotFound(format!("Book {} not found", id)))
}

/// All books in store order
pub async fn list_books(pool: &SqlitePool) -> Result<Vec<Book>> {
    let rows = sqlx::query("SELECT id, title, published_year, isbn FROM books ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(Book::from_row).collect())
}

/// Replace every field of an existing book
///
/// ISBN length is not re-checked here, only presence. Zero affected rows
/// is reported as `NotFound`, the same as delete.
pub async fn update_book(pool: &SqlitePool, id: i64, input: &BookInput) -> Result<Book> {
    input.validate()?;

    let result =
        sqlx::query("UPDATE books SET title = ?, published_year = ?, isbn = ? WHERE id = ?")
            .bind(&input.title)
            .bind(input.published_year)
            .bind(&input.isbn)
            .bind(id)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Book {} not found", id)));
    }

    debug!(book_id = id, "Updated book");

    Ok(Book {
        id,
        title: input.title.clone(),
        published_year: input.published_year,
        isbn: input.isbn.clone(),
    })
}

/// Delete book by id; its association rows go with it
pub async fn delete_book(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Book {} not found", id)));
    }

    debug!(book_id = id, "Deleted book");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    fn book_one() -> BookInput {
        BookInput::new("Book 1", 2022, "123456789011x")
    }

    #[tokio::test]
    async fn test_create_and_get_book() {
        let pool = init_memory_database().await.unwrap();

        let created = create_book(&pool, &book_one()).await.expect("create failed");
        assert_eq!(created.id, 1);

        let loaded = get_book(&pool, created.id).await.expect("get failed");
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_without_touching_store() {
        let pool = init_memory_database().await.unwrap();

        let err = create_book(&pool, &BookInput::new("Book 1", 2022, "short"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        assert!(list_books(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_isbn_is_persistence_error() {
        let pool = init_memory_database().await.unwrap();

        create_book(&pool, &book_one()).await.unwrap();
        let err = create_book(&pool, &BookInput::new("Book 2", 2023, "123456789011x"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Database(_)));
        assert!(err.is_constraint_violation());

        let books = list_books(&pool).await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Book 1");
    }

    #[tokio::test]
    async fn test_get_missing_book_is_not_found() {
        let pool = init_memory_database().await.unwrap();

        let err = get_book(&pool, 42).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_books_in_insertion_order() {
        let pool = init_memory_database().await.unwrap();

        assert!(list_books(&pool).await.unwrap().is_empty());

        create_book(&pool, &book_one()).await.unwrap();
        create_book(&pool, &BookInput::new("Book 2", 2023, "123456789012x"))
            .await
            .unwrap();

        let titles: Vec<String> = list_books(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["Book 1", "Book 2"]);
    }

    #[tokio::test]
    async fn test_update_book_replaces_fields() {
        let pool = init_memory_database().await.unwrap();
        let created = create_book(&pool, &book_one()).await.unwrap();

        // Length is not enforced on update
        let updated = update_book(&pool, created.id, &BookInput::new("Book 2", 2023, "978-0"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);

        let loaded = get_book(&pool, created.id).await.unwrap();
        assert_eq!(loaded.title, "Book 2");
        assert_eq!(loaded.published_year, 2023);
        assert_eq!(loaded.isbn, "978-0");
    }

    #[tokio::test]
    async fn test_update_missing_book_is_not_found() {
        let pool = init_memory_database().await.unwrap();

        let err = update_book(&pool, 7, &book_one()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_validates_before_store() {
        let pool = init_memory_database().await.unwrap();
        let created = create_book(&pool, &book_one()).await.unwrap();

        let err = update_book(&pool, created.id, &BookInput::new("", 2023, "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(get_book(&pool, created.id).await.unwrap().title, "Book 1");
    }

    #[tokio::test]
    async fn test_delete_book_twice() {
        let pool = init_memory_database().await.unwrap();
        let created = create_book(&pool, &book_one()).await.unwrap();

        delete_book(&pool, created.id).await.expect("first delete");
        assert!(matches!(get_book(&pool, created.id).await, Err(Error::NotFound(_))));
        assert!(matches!(delete_book(&pool, created.id).await, Err(Error::NotFound(_))));
        assert!(matches!(delete_book(&pool, 999).await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let pool = init_memory_database().await.unwrap();

        let first = create_book(&pool, &book_one()).await.unwrap();
        delete_book(&pool, first.id).await.unwrap();

        let second = create_book(&pool, &book_one()).await.unwrap();
        assert!(second.id > first.id);
    }
}
