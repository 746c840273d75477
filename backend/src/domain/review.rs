//! Reviews, their validated inputs, and derived read models.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Isbn;

/// Lowest accepted rating.
pub const RATING_MIN: i32 = 1;
/// Highest accepted rating.
pub const RATING_MAX: i32 = 5;
/// Maximum number of characters in a review title.
pub const REVIEW_TITLE_MAX: usize = 255;

/// Validation errors raised while building a [`NewReview`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewValidationError {
    #[error("review title must not be empty")]
    EmptyTitle,
    #[error("review title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("review content must not be empty")]
    EmptyContent,
    #[error("rating must be between {RATING_MIN} and {RATING_MAX}, got {value}")]
    RatingOutOfRange { value: i32 },
}

impl ReviewValidationError {
    /// Name of the payload field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "reviewTitle",
            Self::EmptyContent => "reviewContent",
            Self::RatingOutOfRange { .. } => "rating",
        }
    }
}

/// Star rating between [`RATING_MIN`] and [`RATING_MAX`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct ReviewRating(i32);

impl ReviewRating {
    pub fn new(value: i32) -> Result<Self, ReviewValidationError> {
        if (RATING_MIN..=RATING_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ReviewValidationError::RatingOutOfRange { value })
        }
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl From<ReviewRating> for i32 {
    fn from(value: ReviewRating) -> Self {
        value.0
    }
}

impl TryFrom<i32> for ReviewRating {
    type Error = ReviewValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated review submission prior to persistence.
///
/// # Examples
/// ```
/// use book_reviews::domain::NewReview;
///
/// let review = NewReview::new("Great read", "Clear and practical.", 5).expect("valid review");
/// assert_eq!(review.rating().value(), 5);
/// assert!(NewReview::new("Great read", "Clear.", 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    title: String,
    content: String,
    rating: ReviewRating,
}

impl NewReview {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        rating: i32,
    ) -> Result<Self, ReviewValidationError> {
        let title = title.into();
        let content = content.into();
        if title.trim().is_empty() {
            return Err(ReviewValidationError::EmptyTitle);
        }
        if title.chars().count() > REVIEW_TITLE_MAX {
            return Err(ReviewValidationError::TitleTooLong {
                max: REVIEW_TITLE_MAX,
            });
        }
        if content.trim().is_empty() {
            return Err(ReviewValidationError::EmptyContent);
        }
        let rating = ReviewRating::new(rating)?;
        Ok(Self {
            title,
            content,
            rating,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn rating(&self) -> ReviewRating {
        self.rating
    }
}

/// Review ready to be written, linked to its book and author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub book_id: i64,
    pub user_id: i64,
    pub review: NewReview,
    pub created_at: DateTime<Utc>,
}

/// Ordering applied when listing reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReviewOrdering {
    /// Most recent first.
    #[default]
    None,
    /// Highest rating first, newest first among equal ratings.
    Rating,
}

impl FromStr for ReviewOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "rating" => Ok(Self::Rating),
            other => Err(format!("unsupported review ordering: {other}")),
        }
    }
}

/// Review joined with its book and author for listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub review_id: i64,
    pub review_title: String,
    pub review_content: String,
    pub rating: i32,
    #[schema(value_type = String, example = "9780596004651")]
    pub book_isbn: Isbn,
    pub book_title: String,
    pub book_thumbnail_url: String,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
}

/// Per-book aggregate of ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStatistic {
    pub book_id: i64,
    #[schema(value_type = String, example = "9780596004651")]
    pub isbn: Isbn,
    /// Mean rating rounded to two decimals.
    pub avg: f64,
    pub ratings: i64,
}
