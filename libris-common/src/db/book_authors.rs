//! Book <-> author association
//!
//! Rows exist only through [`link_book_author`] and disappear only through the
//! cascading delete of either side. There is no unlink operation.

use sqlx::SqlitePool;
use tracing::debug;

use super::models::{Author, Book};
use crate::Result;

/// Link book to author
///
/// No existence pre-check: the store's foreign keys reject dangling ids and
/// the composite primary key rejects a repeated pair.
pub async fn link_book_author(pool: &SqlitePool, book_id: i64, author_id: i64) -> Result<()> {
    sqlx::query("INSERT INTO books_authors (book_id, author_id) VALUES (?, ?)")
        .bind(book_id)
        .bind(author_id)
        .execute(pool)
        .await?;

    debug!(book_id, author_id, "Linked book to author");
    Ok(())
}

/// Books linked to an author (empty when the author has none or does not exist)
pub async fn books_by_author(pool: &SqlitePool, author_id: i64) -> Result<Vec<Book>> {
    let rows = sqlx::query(
        r#"
        SELECT b.id, b.title, b.published_year, b.isbn
        FROM books AS b
        INNER JOIN books_authors AS ba ON b.id = ba.book_id
        WHERE ba.author_id = ?
        ORDER BY b.id
        "#,
    )
    .bind(author_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(Book::from_row).collect())
}

/// Authors linked to a book
pub async fn authors_by_book(pool: &SqlitePool, book_id: i64) -> Result<Vec<Author>> {
    let rows = sqlx::query(
        r#"
        SELECT a.id, a.name, a.country
        FROM authors AS a
        INNER JOIN books_authors AS ba ON a.id = ba.author_id
        WHERE ba.book_id = ?
        ORDER BY a.id
        "#,
    )
    .bind(book_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(Author::from_row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{
        create_author, create_book, delete_author, delete_book, get_book, AuthorInput, BookInput,
    };
    use crate::Error;

    async fn seeded_pool() -> SqlitePool {
        let pool = crate::db::init_memory_database().await.unwrap();
        create_book(&pool, &BookInput::new("Book 1", 2022, "123456789011x"))
            .await
            .unwrap();
        create_book(&pool, &BookInput::new("Book 2", 2023, "123456789012x"))
            .await
            .unwrap();
        create_author(&pool, &AuthorInput::new("Author 1", "USA"))
            .await
            .unwrap();
        create_author(&pool, &AuthorInput::new("Author 2", "UK"))
            .await
            .unwrap();
        pool
    }

    async fn association_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM books_authors")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_link_visible_from_both_sides_once() {
        let pool = seeded_pool().await;

        link_book_author(&pool, 1, 1).await.unwrap();
        link_book_author(&pool, 2, 1).await.unwrap();
        link_book_author(&pool, 1, 2).await.unwrap();

        let books = books_by_author(&pool, 1).await.unwrap();
        assert_eq!(books.iter().filter(|b| b.id == 1).count(), 1);
        assert_eq!(books.len(), 2);

        let authors = authors_by_book(&pool, 1).await.unwrap();
        assert_eq!(authors.iter().filter(|a| a.id == 1).count(), 1);
        assert_eq!(authors.len(), 2);

        assert_eq!(authors_by_book(&pool, 2).await.unwrap()[0].name, "Author 1");
    }

    #[tokio::test]
    async fn test_duplicate_link_rejected() {
        let pool = seeded_pool().await;

        link_book_author(&pool, 1, 1).await.unwrap();
        let err = link_book_author(&pool, 1, 1).await.unwrap_err();

        assert!(matches!(err, Error::Database(_)));
        assert_eq!(association_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_dangling_link_rejected_by_store() {
        let pool = seeded_pool().await;

        let err = link_book_author(&pool, 99, 1).await.unwrap_err();
        assert!(err.is_constraint_violation());

        let err = link_book_author(&pool, 1, 99).await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));

        assert_eq!(association_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_queries_for_unknown_ids_are_empty() {
        let pool = seeded_pool().await;

        assert!(books_by_author(&pool, 404).await.unwrap().is_empty());
        assert!(authors_by_book(&pool, 404).await.unwrap().is_empty());
        assert!(books_by_author(&pool, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_book_delete_cascades() {
        let pool = seeded_pool().await;
        link_book_author(&pool, 1, 1).await.unwrap();
        link_book_author(&pool, 1, 2).await.unwrap();
        link_book_author(&pool, 2, 2).await.unwrap();

        delete_book(&pool, 1).await.unwrap();

        assert!(authors_by_book(&pool, 1).await.unwrap().is_empty());
        assert!(matches!(get_book(&pool, 1).await, Err(Error::NotFound(_))));
        assert!(books_by_author(&pool, 1).await.unwrap().is_empty());
        assert_eq!(association_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_author_delete_cascades() {
        let pool = seeded_pool().await;
        link_book_author(&pool, 1, 1).await.unwrap();
        link_book_author(&pool, 2, 1).await.unwrap();

        delete_author(&pool, 1).await.unwrap();

        assert!(authors_by_book(&pool, 1).await.unwrap().is_empty());
        assert!(authors_by_book(&pool, 2).await.unwrap().is_empty());
        assert_eq!(association_count(&pool).await, 0);

        // Books themselves survive
        assert!(get_book(&pool, 1).await.is_ok());
    }
}
