//! Port for review persistence and review read models.

use async_trait::async_trait;

use crate::domain::{Isbn, ReviewDraft, ReviewStatistic, ReviewSummary};

use super::define_port_error;

define_port_error! {
    /// Errors raised by review repository adapters.
    pub enum ReviewRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "review repository query failed: {message}",
    }
}

/// Port for writing reviews and reading their projections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persist a review and return its generated id.
    async fn save(&self, draft: &ReviewDraft) -> Result<i64, ReviewRepositoryError>;

    /// Find one review belonging to the book with `isbn`.
    async fn find_by_id(
        &self,
        isbn: &Isbn,
        review_id: i64,
    ) -> Result<Option<ReviewSummary>, ReviewRepositoryError>;

    /// Most recent reviews, newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<ReviewSummary>, ReviewRepositoryError>;

    /// Highest rated reviews, newest first among equal ratings.
    async fn list_top_rated(
        &self,
        limit: i64,
    ) -> Result<Vec<ReviewSummary>, ReviewRepositoryError>;

    /// Per-book rating aggregates ordered by book id.
    async fn statistics(&self) -> Result<Vec<ReviewStatistic>, ReviewRepositoryError>;

    /// Delete a review scoped to its book; returns whether a row was removed.
    async fn delete(&self, isbn: &Isbn, review_id: i64) -> Result<bool, ReviewRepositoryError>;
}

/// Fixture implementation with no stored reviews.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewRepository;

#[async_trait]
impl ReviewRepository for FixtureReviewRepository {
    async fn save(&self, _draft: &ReviewDraft) -> Result<i64, ReviewRepositoryError> {
        Ok(1)
    }

    async fn find_by_id(
        &self,
        _isbn: &Isbn,
        _review_id: i64,
    ) -> Result<Option<ReviewSummary>, ReviewRepositoryError> {
        Ok(None)
    }

    async fn list_recent(&self, _limit: i64) -> Result<Vec<ReviewSummary>, ReviewRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_top_rated(
        &self,
        _limit: i64,
    ) -> Result<Vec<ReviewSummary>, ReviewRepositoryError> {
        Ok(Vec::new())
    }

    async fn statistics(&self) -> Result<Vec<ReviewStatistic>, ReviewRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _isbn: &Isbn, _review_id: i64) -> Result<bool, ReviewRepositoryError> {
        Ok(false)
    }
}
