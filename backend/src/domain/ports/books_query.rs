//! Driving port for catalogue reads.

use async_trait::async_trait;

use crate::domain::{Book, Error};

/// Read access to the book catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksQuery: Send + Sync {
    /// List every book ordered by id.
    async fn get_all_books(&self) -> Result<Vec<Book>, Error>;
}

/// Fixture query returning an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBooksQuery;

#[async_trait]
impl BooksQuery for FixtureBooksQuery {
    async fn get_all_books(&self) -> Result<Vec<Book>, Error> {
        Ok(Vec::new())
    }
}
