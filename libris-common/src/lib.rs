//! # Libris Common Library
//!
//! Shared code for the Libris catalog service including:
//! - Database schema bootstrap and repository operations
//! - Book / Author models
//! - Access token primitives
//! - Configuration loading

pub mod api;
pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;

pub use error::{Error, Result};
