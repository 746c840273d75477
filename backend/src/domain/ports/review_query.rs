//! Driving port for review reads.

use async_trait::async_trait;

use crate::domain::{Error, Isbn, ReviewOrdering, ReviewStatistic, ReviewSummary};

/// Read operations on reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewQuery: Send + Sync {
    /// List at most `size` reviews in the requested order.
    async fn get_all_reviews(
        &self,
        size: i64,
        order_by: ReviewOrdering,
    ) -> Result<Vec<ReviewSummary>, Error>;

    /// Fetch one review; not found when it belongs to another book.
    async fn get_review_by_id(&self, isbn: &Isbn, review_id: i64) -> Result<ReviewSummary, Error>;

    /// Rating aggregates for every reviewed book.
    async fn get_review_statistics(&self) -> Result<Vec<ReviewStatistic>, Error>;
}

/// Fixture query with no reviews.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewQuery;

#[async_trait]
impl ReviewQuery for FixtureReviewQuery {
    async fn get_all_reviews(
        &self,
        _size: i64,
        _order_by: ReviewOrdering,
    ) -> Result<Vec<ReviewSummary>, Error> {
        Ok(Vec::new())
    }

    async fn get_review_by_id(&self, isbn: &Isbn, review_id: i64) -> Result<ReviewSummary, Error> {
        Err(Error::not_found(format!(
            "review {review_id} not found for book {isbn}"
        )))
    }

    async fn get_review_statistics(&self) -> Result<Vec<ReviewStatistic>, Error> {
        Ok(Vec::new())
    }
}
