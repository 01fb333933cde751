//! Database models and queries

pub mod authors;
pub mod book_authors;
pub mod books;
pub mod init;
pub mod models;

pub use authors::*;
pub use book_authors::*;
pub use books::*;
pub use init::*;
pub use models::*;
