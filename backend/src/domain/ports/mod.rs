//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod book_metadata_source;
mod book_repository;
mod book_synchronization_command;
mod books_query;
mod review_command;
mod review_query;
mod review_repository;
mod token_verifier;
mod user_repository;

#[cfg(test)]
pub use book_metadata_source::MockBookMetadataSource;
pub use book_metadata_source::{
    BookMetadataSource, BookMetadataSourceError, FixtureBookMetadataSource,
};
#[cfg(test)]
pub use book_repository::MockBookRepository;
pub use book_repository::{BookRepository, BookRepositoryError, FixtureBookRepository};
#[cfg(test)]
pub use book_synchronization_command::MockBookSynchronizationCommand;
pub use book_synchronization_command::{
    BookSynchronization, BookSynchronizationCommand, BookSynchronizationError,
    BookSynchronizationOutcome, FixtureBookSynchronizationCommand,
};
#[cfg(test)]
pub use books_query::MockBooksQuery;
pub use books_query::{BooksQuery, FixtureBooksQuery};
#[cfg(test)]
pub use review_command::MockReviewCommand;
pub use review_command::{FixtureReviewCommand, ReviewCommand};
#[cfg(test)]
pub use review_query::MockReviewQuery;
pub use review_query::{FixtureReviewQuery, ReviewQuery};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{FixtureReviewRepository, ReviewRepository, ReviewRepositoryError};
#[cfg(test)]
pub use token_verifier::MockTokenVerifier;
pub use token_verifier::{TokenVerificationError, TokenVerifier};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
