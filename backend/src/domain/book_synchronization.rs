//! Book synchronisation handler.
//!
//! Makes sure a book exists in the catalogue for an incoming ISBN:
//! - malformed ISBNs are rejected without touching any collaborator;
//! - known ISBNs are left untouched;
//! - unknown ISBNs are fetched from the metadata source and stored.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    BookMetadataSource, BookMetadataSourceError, BookRepository, BookSynchronization,
    BookSynchronizationCommand, BookSynchronizationError, BookSynchronizationOutcome,
};
use crate::domain::review_service::map_book_error;
use crate::domain::{Error, Isbn};

/// Service implementing [`BookSynchronizationCommand`].
#[derive(Clone)]
pub struct BookSynchronizationService<B, M: ?Sized> {
    book_repo: Arc<B>,
    metadata_source: Arc<M>,
}

impl<B, M: ?Sized> BookSynchronizationService<B, M> {
    pub fn new(book_repo: Arc<B>, metadata_source: Arc<M>) -> Self {
        Self {
            book_repo,
            metadata_source,
        }
    }
}

#[async_trait]
impl<B, M> BookSynchronizationCommand for BookSynchronizationService<B, M>
where
    B: BookRepository,
    M: BookMetadataSource + ?Sized,
{
    async fn consume_book_update(
        &self,
        request: BookSynchronization,
    ) -> Result<BookSynchronizationOutcome, BookSynchronizationError> {
        let isbn = match Isbn::new(&request.isbn) {
            Ok(isbn) => isbn,
            Err(err) => {
                warn!(isbn = %request.isbn, error = %err, "ignoring malformed isbn");
                return Ok(BookSynchronizationOutcome::Rejected {
                    isbn: request.isbn,
                    reason: err.to_string(),
                });
            }
        };

        if self.book_repo.find_by_isbn(&isbn).await?.is_some() {
            info!(%isbn, "book already present");
            return Ok(BookSynchronizationOutcome::AlreadyPresent {
                isbn: isbn.into(),
            });
        }

        let metadata = self.metadata_source.fetch_metadata_for_book(&isbn).await?;
        let book = self.book_repo.save(&metadata).await?;
        info!(%isbn, book_id = book.id, "stored synchronised book");
        Ok(BookSynchronizationOutcome::Stored(book))
    }
}

impl From<BookSynchronizationError> for Error {
    fn from(error: BookSynchronizationError) -> Self {
        match error {
            BookSynchronizationError::Repository(err) => map_book_error(err),
            BookSynchronizationError::Metadata(err) => match err {
                BookMetadataSourceError::NotFound { .. } => Error::not_found(err.to_string()),
                BookMetadataSourceError::Transport { .. }
                | BookMetadataSourceError::Timeout { .. }
                | BookMetadataSourceError::UpstreamStatus { .. } => {
                    Error::service_unavailable(err.to_string())
                }
                BookMetadataSourceError::Decode { .. } => Error::internal(err.to_string()),
            },
        }
    }
}
