//! Driven port for looking up book metadata in an external catalogue.

use async_trait::async_trait;

use crate::domain::{BookMetadata, Isbn};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while fetching book metadata.
    pub enum BookMetadataSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "metadata transport failed: {message}",
        /// The upstream call exceeded its timeout.
        Timeout { message: String } =>
            "metadata request timed out: {message}",
        /// The upstream answered with a non-success status.
        UpstreamStatus { status: u16, message: String } =>
            "metadata source returned status {status}: {message}",
        /// The response body could not be decoded into metadata.
        Decode { message: String } =>
            "metadata response decode failed: {message}",
        /// The upstream has no entry for the requested ISBN.
        NotFound { isbn: String } =>
            "no metadata found for isbn {isbn}",
    }
}

/// Port for fetching canonical metadata for one ISBN.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookMetadataSource: Send + Sync {
    /// Fetch and normalise metadata for `isbn`.
    async fn fetch_metadata_for_book(
        &self,
        isbn: &Isbn,
    ) -> Result<BookMetadata, BookMetadataSourceError>;
}

/// Fixture source that knows no books.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureBookMetadataSource;

#[async_trait]
impl BookMetadataSource for FixtureBookMetadataSource {
    async fn fetch_metadata_for_book(
        &self,
        isbn: &Isbn,
    ) -> Result<BookMetadata, BookMetadataSourceError> {
        Err(BookMetadataSourceError::not_found(isbn.as_ref()))
    }
}
