//! Driving port for review mutations.

use async_trait::async_trait;

use crate::domain::{Email, Error, Isbn, NewReview, Username};

/// Write operations on reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    /// Store a review for the book with `isbn` on behalf of the given author.
    ///
    /// Fails with [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound)
    /// when the book is unknown and with
    /// [`ErrorCode::BadReviewQuality`](crate::domain::ErrorCode::BadReviewQuality)
    /// when the content is rejected. Returns the generated review id.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use book_reviews::domain::{Email, Isbn, NewReview, Username};
    /// # use book_reviews::domain::ports::{FixtureReviewCommand, ReviewCommand};
    /// # async fn example() {
    /// let command = FixtureReviewCommand;
    /// let result = command
    ///     .create_book_review(
    ///         &Isbn::new("9780596004651").expect("valid isbn"),
    ///         NewReview::new("Great", "Worth every page.", 5).expect("valid review"),
    ///         &Username::new("duke").expect("valid username"),
    ///         &Email::new("duke@spring.io").expect("valid email"),
    ///     )
    ///     .await;
    /// assert!(result.is_err());
    /// # }
    /// ```
    async fn create_book_review(
        &self,
        isbn: &Isbn,
        review: NewReview,
        username: &Username,
        email: &Email,
    ) -> Result<i64, Error>;

    /// Delete a review scoped to its book. Missing reviews are ignored.
    async fn delete_review(&self, isbn: &Isbn, review_id: i64) -> Result<(), Error>;
}

/// Fixture command over an empty catalogue: every book is unknown.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewCommand;

#[async_trait]
impl ReviewCommand for FixtureReviewCommand {
    async fn create_book_review(
        &self,
        isbn: &Isbn,
        _review: NewReview,
        _username: &Username,
        _email: &Email,
    ) -> Result<i64, Error> {
        Err(Error::not_found(format!("book with isbn {isbn} not found")))
    }

    async fn delete_review(&self, _isbn: &Isbn, _review_id: i64) -> Result<(), Error> {
        Ok(())
    }
}
