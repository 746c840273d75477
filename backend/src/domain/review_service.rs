//! Review domain services.
//!
//! The command service gates submissions on book existence and review quality
//! before persisting; the query service exposes the listing and statistics
//! read models.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    BookRepository, BookRepositoryError, ReviewCommand, ReviewQuery, ReviewRepository,
    ReviewRepositoryError, UserRepository,
};
use crate::domain::{
    Email, Error, Isbn, NewReview, ReviewDraft, ReviewOrdering, ReviewStatistic, ReviewSummary,
    ReviewVerifier, UserService, Username,
};

/// Upper bound applied to listing requests.
pub const MAX_REVIEW_PAGE_SIZE: i64 = 100;

pub(crate) fn map_book_error(error: BookRepositoryError) -> Error {
    match error {
        BookRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("book repository unavailable: {message}"))
        }
        BookRepositoryError::Query { message } => {
            Error::internal(format!("book repository error: {message}"))
        }
    }
}

fn map_review_error(error: ReviewRepositoryError) -> Error {
    match error {
        ReviewRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("review repository unavailable: {message}"))
        }
        ReviewRepositoryError::Query { message } => {
            Error::internal(format!("review repository error: {message}"))
        }
    }
}

/// Review service implementing the command driving port.
#[derive(Clone)]
pub struct ReviewCommandService<B, R, U> {
    book_repo: Arc<B>,
    review_repo: Arc<R>,
    users: UserService<U>,
    verifier: Arc<dyn ReviewVerifier>,
    clock: Arc<dyn Clock>,
}

impl<B, R, U> ReviewCommandService<B, R, U> {
    pub fn new(
        book_repo: Arc<B>,
        review_repo: Arc<R>,
        user_repo: Arc<U>,
        verifier: Arc<dyn ReviewVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            book_repo,
            review_repo,
            users: UserService::new(user_repo, Arc::clone(&clock)),
            verifier,
            clock,
        }
    }
}

#[async_trait]
impl<B, R, U> ReviewCommand for ReviewCommandService<B, R, U>
where
    B: BookRepository,
    R: ReviewRepository,
    U: UserRepository,
{
    async fn create_book_review(
        &self,
        isbn: &Isbn,
        review: NewReview,
        username: &Username,
        email: &Email,
    ) -> Result<i64, Error> {
        let book = self
            .book_repo
            .find_by_isbn(isbn)
            .await
            .map_err(map_book_error)?
            .ok_or_else(|| Error::not_found(format!("book with isbn {isbn} not found")))?;

        if !self.verifier.does_meet_quality_standards(review.content()) {
            warn!(%isbn, %username, "review rejected by quality verifier");
            return Err(Error::bad_review_quality(
                "review content does not meet quality standards",
            ));
        }

        let user = self.users.get_or_create(username, email).await?;
        let draft = ReviewDraft {
            book_id: book.id,
            user_id: user.id,
            review,
            created_at: self.clock.utc(),
        };
        let review_id = self
            .review_repo
            .save(&draft)
            .await
            .map_err(map_review_error)?;

        info!(%isbn, review_id, "stored review");
        Ok(review_id)
    }

    async fn delete_review(&self, isbn: &Isbn, review_id: i64) -> Result<(), Error> {
        let removed = self
            .review_repo
            .delete(isbn, review_id)
            .await
            .map_err(map_review_error)?;
        if removed {
            info!(%isbn, review_id, "deleted review");
        }
        Ok(())
    }
}

/// Review service implementing the query driving port.
#[derive(Clone)]
pub struct ReviewQueryService<R> {
    review_repo: Arc<R>,
}

impl<R> ReviewQueryService<R> {
    pub fn new(review_repo: Arc<R>) -> Self {
        Self { review_repo }
    }
}

#[async_trait]
impl<R> ReviewQuery for ReviewQueryService<R>
where
    R: ReviewRepository,
{
    async fn get_all_reviews(
        &self,
        size: i64,
        order_by: ReviewOrdering,
    ) -> Result<Vec<ReviewSummary>, Error> {
        if size < 1 {
            return Err(Error::invalid_request("size must be at least 1"));
        }
        let limit = size.min(MAX_REVIEW_PAGE_SIZE);
        let reviews = match order_by {
            ReviewOrdering::None => self.review_repo.list_recent(limit).await,
            ReviewOrdering::Rating => self.review_repo.list_top_rated(limit).await,
        };
        reviews.map_err(map_review_error)
    }

    async fn get_review_by_id(&self, isbn: &Isbn, review_id: i64) -> Result<ReviewSummary, Error> {
        self.review_repo
            .find_by_id(isbn, review_id)
            .await
            .map_err(map_review_error)?
            .ok_or_else(|| {
                Error::not_found(format!("review {review_id} not found for book {isbn}"))
            })
    }

    async fn get_review_statistics(&self) -> Result<Vec<ReviewStatistic>, Error> {
        self.review_repo
            .statistics()
            .await
            .map_err(map_review_error)
    }
}

#[cfg(test)]
#[path = "review_service_tests.rs"]
mod tests;
