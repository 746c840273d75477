//! Book synchronisation trigger.
//!
//! ```text
//! POST /api/books/synchronizations
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{BookSynchronization, BookSynchronizationOutcome};
use crate::domain::{Book, Error, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerAuth;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

/// Request payload naming the ISBN to import.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct SynchronizationRequest {
    #[schema(example = "9780596004651")]
    pub isbn: Option<String>,
}

/// Result of a synchronisation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SynchronizationStatus {
    Rejected,
    AlreadyPresent,
    Stored,
}

/// Response payload describing what the synchronisation did.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SynchronizationResponse {
    pub isbn: String,
    pub status: SynchronizationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<Book>,
}

impl From<BookSynchronizationOutcome> for SynchronizationResponse {
    fn from(outcome: BookSynchronizationOutcome) -> Self {
        match outcome {
            BookSynchronizationOutcome::Rejected { isbn, reason } => Self {
                isbn,
                status: SynchronizationStatus::Rejected,
                reason: Some(reason),
                book: None,
            },
            BookSynchronizationOutcome::AlreadyPresent { isbn } => Self {
                isbn,
                status: SynchronizationStatus::AlreadyPresent,
                reason: None,
                book: None,
            },
            BookSynchronizationOutcome::Stored(book) => Self {
                isbn: book.isbn.to_string(),
                status: SynchronizationStatus::Stored,
                reason: None,
                book: Some(book),
            },
        }
    }
}

/// Import a book from OpenLibrary unless it is already catalogued.
#[utoipa::path(
    post,
    path = "/api/books/synchronizations",
    request_body = SynchronizationRequest,
    responses(
        (status = 202, description = "Synchronisation handled", body = SynchronizationResponse),
        (status = 400, description = "Missing ISBN", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 403, description = "Caller is not a moderator", body = ErrorSchema),
        (status = 404, description = "OpenLibrary has no such book", body = ErrorSchema),
        (status = 503, description = "OpenLibrary or database unavailable", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "synchronizeBook",
    security(("BearerAuth" = []))
)]
#[post("/books/synchronizations")]
pub async fn synchronize_book(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    payload: web::Json<SynchronizationRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_role(Role::Moderator)?;
    let isbn = require(payload.into_inner().isbn, FieldName::new("isbn"))?;
    let outcome = state
        .synchronization
        .consume_book_update(BookSynchronization::new(isbn))
        .await
        .map_err(Error::from)?;
    Ok(HttpResponse::Accepted().json(SynchronizationResponse::from(outcome)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::Isbn;
    use crate::domain::ports::{
        BookMetadataSourceError, BookSynchronizationError, MockBookSynchronizationCommand,
        TokenVerifier,
    };
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{MODERATOR_TOKEN, READER_TOKEN, StaticTokenVerifier, bearer};

    async fn call(
        command: MockBookSynchronizationCommand,
        token: &str,
        body: Value,
    ) -> actix_web::dev::ServiceResponse {
        let state = HttpState::new(HttpStatePorts {
            synchronization: Arc::new(command),
            ..HttpStatePorts::default()
        });
        let verifier: Arc<dyn TokenVerifier> = Arc::new(StaticTokenVerifier);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(web::Data::from(verifier))
                .service(web::scope("/api").service(synchronize_book)),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/api/books/synchronizations")
            .insert_header(bearer(token))
            .set_json(body)
            .to_request();
        actix_test::call_service(&app, request).await
    }

    fn stored_book() -> Book {
        Book {
            id: 3,
            isbn: Isbn::new("9780596004651").expect("valid isbn"),
            title: "Head first Java".to_owned(),
            author: "Kathy Sierra".to_owned(),
            description: "n.A".to_owned(),
            genre: "n.A".to_owned(),
            pages: 619,
            publisher: "O'Reilly".to_owned(),
            thumbnail_url: "n.A".to_owned(),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn readers_cannot_trigger_synchronisation() {
        let mut command = MockBookSynchronizationCommand::new();
        command.expect_consume_book_update().times(0);

        let response = call(command, READER_TOKEN, json!({ "isbn": "9780596004651" })).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn stored_book_is_accepted() {
        let mut command = MockBookSynchronizationCommand::new();
        command
            .expect_consume_book_update()
            .withf(|request| request.isbn == "9780596004651")
            .times(1)
            .return_once(|_| Ok(BookSynchronizationOutcome::Stored(stored_book())));

        let response = call(command, MODERATOR_TOKEN, json!({ "isbn": "9780596004651" })).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["status"], "stored");
        assert_eq!(body["book"]["id"], 3);
    }

    #[rstest]
    #[actix_web::test]
    async fn rejected_isbn_is_still_accepted() {
        let mut command = MockBookSynchronizationCommand::new();
        command.expect_consume_book_update().return_once(|request| {
            Ok(BookSynchronizationOutcome::Rejected {
                isbn: request.isbn,
                reason: "isbn must have 13 digits, got 2".to_owned(),
            })
        });

        let response = call(command, MODERATOR_TOKEN, json!({ "isbn": "32" })).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["status"], "rejected");
        assert_eq!(body["isbn"], "32");
        assert!(body.get("book").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_isbn_is_a_bad_request() {
        let mut command = MockBookSynchronizationCommand::new();
        command.expect_consume_book_update().times(0);

        let response = call(command, MODERATOR_TOKEN, json!({})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn upstream_timeout_is_service_unavailable() {
        let mut command = MockBookSynchronizationCommand::new();
        command.expect_consume_book_update().return_once(|_| {
            Err(BookSynchronizationError::Metadata(
                BookMetadataSourceError::timeout("after 5s"),
            ))
        });

        let response = call(command, MODERATOR_TOKEN, json!({ "isbn": "9780596004651" })).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
