//! Import books from OpenLibrary for the ISBNs given on the command line.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use book_reviews::domain::BookSynchronizationService;
use book_reviews::domain::ports::{
    BookSynchronization, BookSynchronizationCommand, BookSynchronizationOutcome,
};
use book_reviews::outbound::openlibrary::{OpenLibraryCredentials, OpenLibraryHttpSource};
use book_reviews::outbound::persistence::{DbPool, DieselBookRepository, PoolConfig};
use clap::Parser;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

const DATABASE_URL_VARS: [&str; 2] = ["BOOK_REVIEWS_DATABASE_URL", "DATABASE_URL"];

/// `sync-books` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sync-books",
    about = "Store OpenLibrary metadata for books missing from the catalogue",
    version
)]
struct CliArgs {
    /// ISBN-13 values to synchronise.
    #[arg(required = true, value_name = "isbn")]
    isbns: Vec<String>,
    /// Database connection URL. Falls back to `BOOK_REVIEWS_DATABASE_URL`
    /// then `DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// OpenLibrary base URL.
    #[arg(long = "openlibrary-url", value_name = "url", default_value = "https://openlibrary.org")]
    openlibrary_url: Url,
    /// Request timeout in seconds.
    #[arg(long = "timeout-secs", value_name = "seconds", default_value_t = 5)]
    timeout_secs: u64,
    /// Value for the `X-Custom-Auth` header.
    #[arg(long = "custom-auth", value_name = "token")]
    custom_auth: Option<String>,
    /// Value for the `X-Customer-Id` header.
    #[arg(long = "customer-id", value_name = "id")]
    customer_id: Option<String>,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url, |name| env::var(name).ok())?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let source = OpenLibraryHttpSource::new(
        args.openlibrary_url,
        Duration::from_secs(args.timeout_secs),
        OpenLibraryCredentials {
            custom_auth: args.custom_auth,
            customer_id: args.customer_id,
        },
    )
    .map_err(|error| io::Error::other(format!("create OpenLibrary client: {error}")))?;
    let command = BookSynchronizationService::new(
        Arc::new(DieselBookRepository::new(pool)),
        Arc::new(source),
    );

    let mut failures = 0_usize;
    for isbn in args.isbns {
        match command
            .consume_book_update(BookSynchronization::new(isbn.clone()))
            .await
        {
            Ok(outcome) => println!("{}", describe(&outcome)),
            Err(error) => {
                failures += 1;
                println!("isbn={isbn} status=failed error={error}");
            }
        }
    }

    if failures > 0 {
        return Err(io::Error::other(format!(
            "{failures} synchronisation(s) failed"
        )));
    }
    Ok(())
}

fn describe(outcome: &BookSynchronizationOutcome) -> String {
    match outcome {
        BookSynchronizationOutcome::Rejected { isbn, reason } => {
            format!("isbn={isbn} status=rejected reason={reason}")
        }
        BookSynchronizationOutcome::AlreadyPresent { isbn } => {
            format!("isbn={isbn} status=already_present")
        }
        BookSynchronizationOutcome::Stored(book) => {
            format!("isbn={} status=stored id={} title={}", book.isbn, book.id, book.title)
        }
    }
}

fn resolve_database_url(
    explicit: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    DATABASE_URL_VARS
        .iter()
        .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "database URL missing: set --database-url, BOOK_REVIEWS_DATABASE_URL or DATABASE_URL",
            )
        })
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing helpers.

    use rstest::rstest;

    use super::*;
    use book_reviews::domain::{Book, Isbn};

    #[rstest]
    fn parses_isbns_and_defaults() {
        let args = CliArgs::try_parse_from(["sync-books", "9780596004651", "9781617294532"])
            .expect("arguments parse");
        assert_eq!(args.isbns.len(), 2);
        assert_eq!(args.timeout_secs, 5);
        assert_eq!(args.openlibrary_url.as_str(), "https://openlibrary.org/");
    }

    #[rstest]
    fn requires_at_least_one_isbn() {
        assert!(CliArgs::try_parse_from(["sync-books"]).is_err());
    }

    #[rstest]
    #[case(Some("postgres://cli"), None, None, "postgres://cli")]
    #[case(None, Some("postgres://scoped"), Some("postgres://generic"), "postgres://scoped")]
    #[case(None, None, Some("postgres://generic"), "postgres://generic")]
    #[case(None, Some("  "), Some("postgres://generic"), "postgres://generic")]
    fn database_url_resolution_order(
        #[case] explicit: Option<&str>,
        #[case] scoped: Option<&str>,
        #[case] generic: Option<&str>,
        #[case] expected: &str,
    ) {
        let resolved = resolve_database_url(explicit.map(str::to_owned), |name| match name {
            "BOOK_REVIEWS_DATABASE_URL" => scoped.map(str::to_owned),
            "DATABASE_URL" => generic.map(str::to_owned),
            _ => None,
        })
        .expect("url resolves");
        assert_eq!(resolved, expected);
    }

    #[rstest]
    fn missing_database_url_is_an_error() {
        let error = resolve_database_url(None, |_| None).expect_err("no url");
        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);
    }

    #[rstest]
    fn describes_stored_books() {
        let book = Book {
            id: 9,
            isbn: Isbn::new("9780596004651").expect("valid isbn"),
            title: "Head first Java".to_owned(),
            author: "Kathy Sierra".to_owned(),
            description: "n.A".to_owned(),
            genre: "n.A".to_owned(),
            pages: 619,
            publisher: "O'Reilly".to_owned(),
            thumbnail_url: "n.A".to_owned(),
        };
        assert_eq!(
            describe(&BookSynchronizationOutcome::Stored(book)),
            "isbn=9780596004651 status=stored id=9 title=Head first Java"
        );
    }
}
