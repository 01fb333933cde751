//! HTTP API handlers for libris-api

pub mod associations;
pub mod auth;
pub mod authors;
pub mod books;
pub mod health;

pub use associations::{authors_by_book, books_by_author, link_book_author};
pub use auth::{auth_middleware, login};
pub use authors::{create_author, delete_author, get_author, list_authors, update_author};
pub use books::{create_book, delete_book, get_book, list_books, update_book};
pub use health::health_routes;
