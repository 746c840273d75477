//! Driving port for importing books from the external metadata source.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::Book;

use super::{BookMetadataSourceError, BookRepositoryError};

/// Request to make sure a book is present in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSynchronization {
    /// Raw ISBN as received; validated by the handler.
    pub isbn: String,
}

impl BookSynchronization {
    pub fn new(isbn: impl Into<String>) -> Self {
        Self { isbn: isbn.into() }
    }
}

/// Result of a synchronisation attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookSynchronizationOutcome {
    /// The ISBN was malformed; nothing was contacted.
    Rejected { isbn: String, reason: String },
    /// A book with this ISBN already exists and was left untouched.
    AlreadyPresent { isbn: String },
    /// A new book was fetched and stored.
    Stored(Book),
}

/// Collaborator failures surfaced unchanged to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookSynchronizationError {
    #[error(transparent)]
    Metadata(#[from] BookMetadataSourceError),
    #[error(transparent)]
    Repository(#[from] BookRepositoryError),
}

/// Handles book update notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookSynchronizationCommand: Send + Sync {
    async fn consume_book_update(
        &self,
        request: BookSynchronization,
    ) -> Result<BookSynchronizationOutcome, BookSynchronizationError>;
}

/// Fixture command that reports every book as already present.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookSynchronizationCommand;

#[async_trait]
impl BookSynchronizationCommand for FixtureBookSynchronizationCommand {
    async fn consume_book_update(
        &self,
        request: BookSynchronization,
    ) -> Result<BookSynchronizationOutcome, BookSynchronizationError> {
        Ok(BookSynchronizationOutcome::AlreadyPresent { isbn: request.isbn })
    }
}
