//! Database models

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::{Error, Result};

/// Required ISBN length on creation
pub const ISBN_LENGTH: usize = 13;

/// Book row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub published_year: i32,
    pub isbn: String,
}

impl Book {
    pub(crate) fn from_row(row: &SqliteRow) -> Self {
        Self {
            id: row.get("id"),
            title: row.get("title"),
            published_year: row.get("published_year"),
            isbn: row.get("isbn"),
        }
    }
}

/// Author row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub country: String,
}

impl Author {
    pub(crate) fn from_row(row: &SqliteRow) -> Self {
        Self {
            id: row.get("id"),
            name: row.get("name"),
            country: row.get("country"),
        }
    }
}

/// Writable book fields (create / update body)
///
/// Missing JSON fields deserialize to their zero value so that validation,
/// not the decoder, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookInput {
    pub title: String,
    pub published_year: i32,
    pub isbn: String,
}

impl BookInput {
    pub fn new(title: impl Into<String>, published_year: i32, isbn: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            published_year,
            isbn: isbn.into(),
        }
    }

    /// Field checks shared by create and update
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() || self.published_year == 0 || self.isbn.is_empty() {
            return Err(Error::InvalidInput("Missing required fields".to_string()));
        }
        Ok(())
    }

    /// Create additionally pins the ISBN length
    pub fn validate_for_create(&self) -> Result<()> {
        self.validate()?;
        let len = self.isbn.chars().count();
        if len != ISBN_LENGTH {
            return Err(Error::InvalidInput(format!(
                "ISBN must be exactly {} characters (got {})",
                ISBN_LENGTH, len
            )));
        }
        Ok(())
    }
}

/// Writable author fields (create / update body)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorInput {
    pub name: String,
    pub country: String,
}

impl AuthorInput {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.country.is_empty() {
            return Err(Error::InvalidInput("Missing required fields".to_string()));
        }
        Ok(())
    }
}
