//! Reqwest-backed OpenLibrary metadata source.
//!
//! This adapter owns transport details only: URL construction, custom
//! headers, timeout and HTTP error mapping, and JSON decoding into domain
//! metadata.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::OpenLibraryResponseDto;
use crate::domain::ports::{BookMetadataSource, BookMetadataSourceError};
use crate::domain::{BookMetadata, Isbn};

/// Header carrying the shared API credential.
pub const CUSTOM_AUTH_HEADER: &str = "X-Custom-Auth";
/// Header carrying the customer identifier.
pub const CUSTOMER_ID_HEADER: &str = "X-Customer-Id";

/// Credentials sent with every OpenLibrary request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenLibraryCredentials {
    pub custom_auth: Option<String>,
    pub customer_id: Option<String>,
}

/// OpenLibrary source adapter issuing `GET /api/books` lookups.
pub struct OpenLibraryHttpSource {
    client: Client,
    base_url: Url,
    credentials: OpenLibraryCredentials,
}

impl OpenLibraryHttpSource {
    /// Build an adapter using a reqwest client with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        credentials: OpenLibraryCredentials,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    fn request_url(&self, isbn: &Isbn) -> Result<Url, BookMetadataSourceError> {
        build_request_url(&self.base_url, isbn)
    }
}

#[async_trait]
impl BookMetadataSource for OpenLibraryHttpSource {
    async fn fetch_metadata_for_book(
        &self,
        isbn: &Isbn,
    ) -> Result<BookMetadata, BookMetadataSourceError> {
        let url = self.request_url(isbn)?;
        debug!(%isbn, %url, "fetching book metadata");

        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(auth) = &self.credentials.custom_auth {
            request = request.header(CUSTOM_AUTH_HEADER, auth.as_str());
        }
        if let Some(customer_id) = &self.credentials.customer_id {
            request = request.header(CUSTOMER_ID_HEADER, customer_id.as_str());
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_metadata(body.as_ref(), isbn)
    }
}

/// `Url::join` replaces the last path segment unless the base ends in `/`.
fn directory_url(base_url: &Url) -> Url {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn build_request_url(base_url: &Url, isbn: &Isbn) -> Result<Url, BookMetadataSourceError> {
    let mut url = directory_url(base_url).join("api/books").map_err(|err| {
        BookMetadataSourceError::transport(format!("invalid OpenLibrary base URL: {err}"))
    })?;
    url.query_pairs_mut()
        .append_pair("jscmd", "data")
        .append_pair("format", "json")
        .append_pair("bibkeys", isbn.as_ref());
    Ok(url)
}

fn parse_metadata(body: &[u8], isbn: &Isbn) -> Result<BookMetadata, BookMetadataSourceError> {
    let decoded: OpenLibraryResponseDto = serde_json::from_slice(body).map_err(|error| {
        BookMetadataSourceError::decode(format!("invalid OpenLibrary JSON payload: {error}"))
    })?;
    decoded
        .take_book(isbn)
        .ok_or_else(|| BookMetadataSourceError::not_found(isbn.as_ref()))?
        .into_metadata(isbn.clone())
        .map_err(BookMetadataSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> BookMetadataSourceError {
    if error.is_timeout() {
        BookMetadataSourceError::timeout(error.to_string())
    } else {
        BookMetadataSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> BookMetadataSourceError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            BookMetadataSourceError::timeout(format!("status {}", status.as_u16()))
        }
        _ => BookMetadataSourceError::upstream_status(status.as_u16(), body_preview(body)),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network OpenLibrary mapping helpers.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::METADATA_PLACEHOLDER;

    const ISBN: &str = "9780596004651";

    const SUCCESS_BODY: &str = r#"{
        "9780596004651": {
            "publishers": [{ "name": "O'Reilly" }],
            "title": "Head first Java",
            "authors": [
                {
                    "url": "https://openlibrary.org/authors/OL1400543A/Kathy_Sierra",
                    "name": "Kathy Sierra"
                },
                { "name": "Bert Bates" }
            ],
            "number_of_pages": 619,
            "notes": "Your brain on Java--a learner's guide--Cover.Includes index.",
            "subjects": [
                { "name": "Java (Computer program language)", "url": "https://openlibrary.org/subjects/java" },
                { "name": "Programming" }
            ],
            "cover": {
                "small": "https://covers.openlibrary.org/b/id/388761-S.jpg",
                "medium": "https://covers.openlibrary.org/b/id/388761-M.jpg",
                "large": "https://covers.openlibrary.org/b/id/388761-L.jpg"
            }
        }
    }"#;

    const PARTIAL_BODY: &str = r#"{
        "9780596004651": {
            "publishers": [{ "name": "O'Reilly" }],
            "title": "Head second Java",
            "authors": [{ "name": "Kathy Sierra" }],
            "number_of_pages": 42,
            "cover": { "small": "https://covers.openlibrary.org/b/id/388761-S.jpg" }
        }
    }"#;

    #[fixture]
    fn isbn() -> Isbn {
        Isbn::new(ISBN).expect("valid isbn")
    }

    #[rstest]
    fn maps_complete_response(isbn: Isbn) {
        let metadata = parse_metadata(SUCCESS_BODY.as_bytes(), &isbn).expect("decodes");

        assert_eq!(metadata.isbn.as_ref(), ISBN);
        assert_eq!(metadata.title, "Head first Java");
        assert_eq!(
            metadata.thumbnail_url,
            "https://covers.openlibrary.org/b/id/388761-S.jpg"
        );
        assert_eq!(metadata.author, "Kathy Sierra");
        assert_eq!(
            metadata.description,
            "Your brain on Java--a learner's guide--Cover.Includes index."
        );
        assert_eq!(metadata.genre, "Java (Computer program language)");
        assert_eq!(metadata.publisher, "O'Reilly");
        assert_eq!(metadata.pages, 619);
    }

    #[rstest]
    fn fills_placeholders_for_missing_optional_fields(isbn: Isbn) {
        let metadata = parse_metadata(PARTIAL_BODY.as_bytes(), &isbn).expect("decodes");

        assert_eq!(metadata.title, "Head second Java");
        assert_eq!(metadata.description, METADATA_PLACEHOLDER);
        assert_eq!(metadata.genre, METADATA_PLACEHOLDER);
        assert_eq!(metadata.publisher, "O'Reilly");
        assert_eq!(metadata.pages, 42);
    }

    #[rstest]
    fn accepts_typed_notes_and_prefixed_keys(isbn: Isbn) {
        let body = r#"{
            "ISBN:9780596004651": {
                "title": "Head first Java",
                "authors": [{ "name": "Kathy Sierra" }],
                "notes": { "type": "/type/text", "value": "Includes index." }
            }
        }"#;
        let metadata = parse_metadata(body.as_bytes(), &isbn).expect("decodes");

        assert_eq!(metadata.description, "Includes index.");
        assert_eq!(metadata.pages, 0);
        assert_eq!(metadata.publisher, METADATA_PLACEHOLDER);
        assert_eq!(metadata.thumbnail_url, METADATA_PLACEHOLDER);
    }

    #[rstest]
    #[case::just_past_varchar_limit(256)]
    #[case::long(1_000)]
    fn long_metadata_strings_are_kept_whole(isbn: Isbn, #[case] len: usize) {
        let long = "é".repeat(len);
        let body = serde_json::json!({
            ISBN: {
                "title": long,
                "authors": [{ "name": long }],
                "subjects": [{ "name": long }],
                "publishers": [{ "name": long }],
            }
        })
        .to_string();

        let metadata = parse_metadata(body.as_bytes(), &isbn).expect("decodes");

        for field in [
            &metadata.title,
            &metadata.author,
            &metadata.genre,
            &metadata.publisher,
        ] {
            assert_eq!(field.chars().count(), len);
        }
    }

    #[rstest]
    fn empty_object_is_not_found(isbn: Isbn) {
        let error = parse_metadata(b"{}", &isbn).expect_err("no entry");
        assert_eq!(error, BookMetadataSourceError::not_found(ISBN));
    }

    #[rstest]
    #[case::not_json("<html>maintenance</html>")]
    #[case::missing_author(r#"{ "9780596004651": { "title": "Head first Java" } }"#)]
    #[case::missing_title(r#"{ "9780596004651": { "authors": [{ "name": "Kathy Sierra" }] } }"#)]
    fn undecodable_bodies_are_decode_errors(isbn: Isbn, #[case] body: &str) {
        let error = parse_metadata(body.as_bytes(), &isbn).expect_err("decode fails");
        assert!(matches!(error, BookMetadataSourceError::Decode { .. }));
    }

    #[rstest]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR)]
    #[case::unauthorised(StatusCode::UNAUTHORIZED)]
    #[case::not_found(StatusCode::NOT_FOUND)]
    fn non_success_statuses_map_to_upstream_status(#[case] status: StatusCode) {
        let error = map_status_error(status, b"  upstream   unavailable ");
        assert_eq!(
            error,
            BookMetadataSourceError::upstream_status(status.as_u16(), "upstream unavailable")
        );
    }

    #[rstest]
    fn gateway_timeout_maps_to_timeout() {
        let error = map_status_error(StatusCode::GATEWAY_TIMEOUT, b"");
        assert!(matches!(error, BookMetadataSourceError::Timeout { .. }));
    }

    #[rstest]
    #[case("https://openlibrary.org", "https://openlibrary.org/api/books")]
    #[case("https://openlibrary.org/", "https://openlibrary.org/api/books")]
    #[case("https://proxy.test/openlibrary", "https://proxy.test/openlibrary/api/books")]
    #[case("https://proxy.test/openlibrary/", "https://proxy.test/openlibrary/api/books")]
    fn builds_bibkeys_query(isbn: Isbn, #[case] base: &str, #[case] endpoint: &str) {
        let base_url = Url::parse(base).expect("valid base");
        let url = build_request_url(&base_url, &isbn).expect("url builds");
        assert_eq!(
            url.as_str(),
            format!("{endpoint}?jscmd=data&format=json&bibkeys=9780596004651")
        );
    }

    #[rstest]
    fn truncates_long_previews() {
        let body = "x".repeat(200);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }
}
