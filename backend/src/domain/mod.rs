//! Domain primitives, services, and ports.
//!
//! Purpose: define the book catalogue and review model independently of
//! HTTP and persistence. Adapters depend on this module; it depends on none
//! of them.
//!
//! Public surface:
//! - Error, ErrorCode — transport-agnostic failure payload.
//! - Isbn, Book, BookMetadata — catalogue entries.
//! - NewReview, ReviewRating, ReviewSummary, ReviewStatistic — review model.
//! - ReviewVerifier, KeywordReviewVerifier — quality gate for review content.
//! - Services implementing the driving ports in [`ports`].

pub mod auth;
pub mod book;
pub mod book_catalogue_service;
pub mod book_synchronization;
pub mod error;
pub mod isbn;
pub mod ports;
pub mod review;
pub mod review_service;
pub mod review_verifier;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::auth::{AuthenticatedUser, Role};
pub use self::book::{Book, BookMetadata, METADATA_PLACEHOLDER};
pub use self::book_catalogue_service::BookCatalogueService;
pub use self::book_synchronization::BookSynchronizationService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::isbn::{Isbn, IsbnValidationError};
pub use self::review::{
    NewReview, ReviewDraft, ReviewOrdering, ReviewRating, ReviewStatistic, ReviewSummary,
    ReviewValidationError,
};
pub use self::review_service::{MAX_REVIEW_PAGE_SIZE, ReviewCommandService, ReviewQueryService};
#[cfg(test)]
pub use self::review_verifier::MockReviewVerifier;
pub use self::review_verifier::{KeywordReviewVerifier, ReviewVerifier};
pub use self::trace_id::TraceId;
pub use self::user::{Email, User, UserValidationError, Username};
pub use self::user_service::UserService;
