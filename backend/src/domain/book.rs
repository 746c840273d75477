//! Book catalogue entries and the metadata they are built from.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Isbn;

/// Value used for optional metadata the upstream source did not provide.
pub const METADATA_PLACEHOLDER: &str = "n.A";

/// Canonical book metadata produced by a metadata source.
///
/// Carries no surrogate id; the repository assigns one on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMetadata {
    pub isbn: Isbn,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub pages: i32,
    pub publisher: String,
    pub thumbnail_url: String,
}

/// Persisted book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    #[schema(value_type = String, example = "9780596004651")]
    pub isbn: Isbn,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub pages: i32,
    pub publisher: String,
    pub thumbnail_url: String,
}

impl Book {
    /// Attach a repository-assigned identifier to fetched metadata.
    pub fn from_metadata(id: i64, metadata: BookMetadata) -> Self {
        let BookMetadata {
            isbn,
            title,
            author,
            description,
            genre,
            pages,
            publisher,
            thumbnail_url,
        } = metadata;
        Self {
            id,
            isbn,
            title,
            author,
            description,
            genre,
            pages,
            publisher,
            thumbnail_url,
        }
    }
}
