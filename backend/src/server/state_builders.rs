//! Builders wiring ports into HTTP state.
//!
//! The same domain services run in both modes. With a database pool the
//! Diesel adapters back them; without one they run over the fixture
//! repositories, so the API still applies the existence check and the
//! quality gate while storing nothing.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::warn;

use book_reviews::domain::ports::{
    BookMetadataSource, BookRepository, FixtureBookMetadataSource, FixtureBookRepository,
    FixtureReviewRepository, FixtureUserRepository, ReviewRepository, TokenVerifier,
    UserRepository,
};
use book_reviews::domain::{
    BookCatalogueService, BookSynchronizationService, KeywordReviewVerifier, ReviewCommandService,
    ReviewQueryService,
};
use book_reviews::inbound::http::state::{HttpState, HttpStatePorts};
use book_reviews::outbound::jwt::JwtTokenVerifier;
use book_reviews::outbound::openlibrary::OpenLibraryHttpSource;
use book_reviews::outbound::persistence::{
    DbPool, DieselBookRepository, DieselReviewRepository, DieselUserRepository,
};

use super::config::{JwtConfig, OpenLibraryConfig};
use super::ServerConfig;

/// Build the OpenLibrary adapter.
///
/// # Errors
/// Returns the reqwest error when the HTTP client cannot be constructed.
pub(crate) fn build_metadata_source(
    config: &OpenLibraryConfig,
) -> Result<Arc<dyn BookMetadataSource>, reqwest::Error> {
    let source = OpenLibraryHttpSource::new(
        config.base_url.clone(),
        config.timeout,
        config.credentials.clone(),
    )?;
    Ok(Arc::new(source))
}

pub(crate) fn build_token_verifier(config: &JwtConfig) -> Arc<dyn TokenVerifier> {
    Arc::new(JwtTokenVerifier::new(
        &config.secret,
        config.issuer.as_deref(),
        config.audience.as_deref(),
    ))
}

fn build_ports<B, R, U>(
    books: Arc<B>,
    reviews: Arc<R>,
    users: Arc<U>,
    metadata_source: Arc<dyn BookMetadataSource>,
) -> HttpStatePorts
where
    B: BookRepository + 'static,
    R: ReviewRepository + 'static,
    U: UserRepository + 'static,
{
    HttpStatePorts {
        books: Arc::new(BookCatalogueService::new(Arc::clone(&books))),
        reviews: Arc::new(ReviewCommandService::new(
            Arc::clone(&books),
            Arc::clone(&reviews),
            users,
            Arc::new(KeywordReviewVerifier),
            Arc::new(DefaultClock),
        )),
        reviews_query: Arc::new(ReviewQueryService::new(reviews)),
        synchronization: Arc::new(BookSynchronizationService::new(books, metadata_source)),
    }
}

fn build_db_ports(pool: &DbPool, metadata_source: Arc<dyn BookMetadataSource>) -> HttpStatePorts {
    build_ports(
        Arc::new(DieselBookRepository::new(pool.clone())),
        Arc::new(DieselReviewRepository::new(pool.clone())),
        Arc::new(DieselUserRepository::new(pool.clone())),
        metadata_source,
    )
}

pub(crate) fn build_fixture_ports() -> HttpStatePorts {
    build_ports(
        Arc::new(FixtureBookRepository),
        Arc::new(FixtureReviewRepository),
        Arc::new(FixtureUserRepository),
        Arc::new(FixtureBookMetadataSource),
    )
}

/// Build HTTP state from the server configuration.
///
/// # Errors
/// Fails when the OpenLibrary client cannot be constructed.
pub(crate) fn build_http_state(config: &ServerConfig) -> Result<HttpState, reqwest::Error> {
    let ports = match &config.db_pool {
        Some(pool) => build_db_ports(pool, build_metadata_source(&config.openlibrary)?),
        None => {
            warn!("no database configured; serving fixture repositories");
            build_fixture_ports()
        }
    };
    Ok(HttpState::new(ports))
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::time::Duration;

    use rstest::rstest;
    use url::Url;

    use super::*;
    use book_reviews::domain::{Email, ErrorCode, Isbn, NewReview, Username};
    use book_reviews::outbound::openlibrary::OpenLibraryCredentials;

    fn openlibrary() -> OpenLibraryConfig {
        OpenLibraryConfig {
            base_url: Url::parse("https://openlibrary.org").expect("valid url"),
            timeout: Duration::from_secs(1),
            credentials: OpenLibraryCredentials::default(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_state_serves_empty_catalogue() {
        let config = ServerConfig::new(
            "127.0.0.1:0".parse::<SocketAddr>().expect("valid addr"),
            JwtConfig::new("secret", None, None),
            openlibrary(),
        );
        let state = build_http_state(&config).expect("fixture state");
        let books = state.books.get_all_books().await.expect("fixture books");
        assert!(books.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_state_still_checks_book_existence() {
        let state = HttpState::new(build_fixture_ports());
        let review = NewReview::new("Filler", "lorem ipsum", 5).expect("structurally valid");
        let err = state
            .reviews
            .create_book_review(
                &Isbn::new("9780596004651").expect("valid isbn"),
                review,
                &Username::new("duke").expect("valid username"),
                &Email::new("duke@spring.io").expect("valid email"),
            )
            .await
            .expect_err("fixture catalogue is empty");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    fn metadata_source_builds_for_valid_config() {
        assert!(build_metadata_source(&openlibrary()).is_ok());
    }

    #[rstest]
    fn verifier_rejects_garbage_tokens() {
        let verifier = build_token_verifier(&JwtConfig::new("secret", None, None));
        assert!(verifier.verify("not-a-jwt").is_err());
    }
}
