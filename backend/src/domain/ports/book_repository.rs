//! Port for book catalogue persistence.

use async_trait::async_trait;

use crate::domain::{Book, BookMetadata, Isbn};

use super::define_port_error;

define_port_error! {
    /// Errors raised by book repository adapters.
    pub enum BookRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "book repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "book repository query failed: {message}",
    }
}

/// Port for reading and inserting books.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find a book by its ISBN.
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError>;

    /// Insert a new book and return it with its assigned id.
    ///
    /// Existing rows for the same ISBN are never overwritten; adapters return
    /// the stored row instead.
    async fn save(&self, metadata: &BookMetadata) -> Result<Book, BookRepositoryError>;

    /// List every book ordered by id.
    async fn list_all(&self) -> Result<Vec<Book>, BookRepositoryError>;
}

/// Fixture implementation with an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookRepository;

#[async_trait]
impl BookRepository for FixtureBookRepository {
    async fn find_by_isbn(&self, _isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError> {
        Ok(None)
    }

    async fn save(&self, metadata: &BookMetadata) -> Result<Book, BookRepositoryError> {
        Ok(Book::from_metadata(1, metadata.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(Vec::new())
    }
}
