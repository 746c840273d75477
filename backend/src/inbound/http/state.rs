//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BookSynchronizationCommand, BooksQuery, FixtureBookSynchronizationCommand, FixtureBooksQuery,
    FixtureReviewCommand, FixtureReviewQuery, ReviewCommand, ReviewQuery,
};

/// Parameter object bundling the port implementations used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub books: Arc<dyn BooksQuery>,
    pub reviews: Arc<dyn ReviewCommand>,
    pub reviews_query: Arc<dyn ReviewQuery>,
    pub synchronization: Arc<dyn BookSynchronizationCommand>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            books: Arc::new(FixtureBooksQuery),
            reviews: Arc::new(FixtureReviewCommand),
            reviews_query: Arc::new(FixtureReviewQuery),
            synchronization: Arc::new(FixtureBookSynchronizationCommand),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub books: Arc<dyn BooksQuery>,
    pub reviews: Arc<dyn ReviewCommand>,
    pub reviews_query: Arc<dyn ReviewQuery>,
    pub synchronization: Arc<dyn BookSynchronizationCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use book_reviews::domain::ports::FixtureBooksQuery;
    /// use book_reviews::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     books: Arc::new(FixtureBooksQuery),
    ///     ..HttpStatePorts::default()
    /// });
    /// let _books = state.books.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            books,
            reviews,
            reviews_query,
            synchronization,
        } = ports;
        Self {
            books,
            reviews,
            reviews_query,
            synchronization,
        }
    }
}
