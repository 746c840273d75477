//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint, the error payload schemas and
//! the bearer token security scheme. The document backs Swagger UI in debug
//! builds and is printed by the `openapi-dump` binary.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Book, ReviewOrdering, ReviewStatistic, ReviewSummary};
use crate::inbound::http::reviews::CreateReviewRequest;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::synchronization::{
    SynchronizationRequest, SynchronizationResponse, SynchronizationStatus,
};

/// Adds the JWT bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "HS256 token carrying preferred_username, email and optional roles.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Book reviews API",
        description = "Book catalogue, reviews with quality gating, and OpenLibrary synchronisation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::books::get_all_books,
        crate::inbound::http::reviews::get_all_reviews,
        crate::inbound::http::reviews::get_review_statistics,
        crate::inbound::http::reviews::get_review_by_id,
        crate::inbound::http::reviews::create_book_review,
        crate::inbound::http::reviews::delete_review,
        crate::inbound::http::synchronization::synchronize_book,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Book,
        ReviewSummary,
        ReviewStatistic,
        ReviewOrdering,
        CreateReviewRequest,
        SynchronizationRequest,
        SynchronizationResponse,
        SynchronizationStatus,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "books", description = "Book catalogue and synchronisation"),
        (name = "reviews", description = "Book reviews"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
