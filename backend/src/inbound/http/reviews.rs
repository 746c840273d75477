//! Review endpoints.
//!
//! ```text
//! GET    /api/books/reviews
//! GET    /api/books/reviews/statistics
//! GET    /api/books/{isbn}/reviews/{reviewId}
//! POST   /api/books/{isbn}/reviews
//! DELETE /api/books/{isbn}/reviews/{reviewId}
//! ```

use std::str::FromStr;

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ReviewOrdering, ReviewStatistic, ReviewSummary, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerAuth;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, parse_book_key, parse_new_review,
};

/// Page size used when the client does not send `size`.
pub const DEFAULT_REVIEW_PAGE_SIZE: i64 = 20;

/// Query parameters for listing reviews.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReviewListQuery {
    /// Maximum number of reviews to return (1 to 100, default 20).
    #[param(example = 20)]
    pub size: Option<i64>,
    /// `none` for newest first or `rating` for best rated first.
    #[param(example = "none")]
    pub order_by: Option<String>,
}

/// Review submission payload.
///
/// Fields are optional at the transport level so missing values are reported
/// per field instead of as an opaque deserialisation failure.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    #[schema(example = "Great introduction")]
    pub review_title: Option<String>,
    #[schema(example = "The chapters build on each other and the exercises are worth doing.")]
    pub review_content: Option<String>,
    #[schema(minimum = 1, maximum = 5, example = 5)]
    pub rating: Option<i32>,
}

fn parse_ordering(value: Option<&str>) -> ApiResult<ReviewOrdering> {
    value.map_or(Ok(ReviewOrdering::None), |raw| {
        ReviewOrdering::from_str(raw)
            .map_err(|message| invalid_field_error(FieldName::new("orderBy"), message))
    })
}

fn review_location(isbn: &str, review_id: i64) -> String {
    format!("/api/books/{isbn}/reviews/{review_id}")
}

/// List recent or top rated reviews across all books.
#[utoipa::path(
    get,
    path = "/api/books/reviews",
    params(ReviewListQuery),
    responses(
        (status = 200, description = "Reviews", body = [ReviewSummary]),
        (status = 400, description = "Invalid query parameters", body = ErrorSchema),
        (status = 406, description = "Accept header excludes JSON", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "getAllReviews",
    security([])
)]
#[get("/books/reviews")]
pub async fn get_all_reviews(
    state: web::Data<HttpState>,
    query: web::Query<ReviewListQuery>,
) -> ApiResult<HttpResponse> {
    let ReviewListQuery { size, order_by } = query.into_inner();
    let order_by = parse_ordering(order_by.as_deref())?;
    let reviews = state
        .reviews_query
        .get_all_reviews(size.unwrap_or(DEFAULT_REVIEW_PAGE_SIZE), order_by)
        .await?;
    Ok(HttpResponse::Ok().json(reviews))
}

/// Average rating and rating count per book.
#[utoipa::path(
    get,
    path = "/api/books/reviews/statistics",
    responses(
        (status = 200, description = "Per-book rating statistics", body = [ReviewStatistic]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "getReviewStatistics",
    security(("BearerAuth" = []))
)]
#[get("/books/reviews/statistics")]
pub async fn get_review_statistics(
    state: web::Data<HttpState>,
    _auth: BearerAuth,
) -> ApiResult<HttpResponse> {
    let statistics = state.reviews_query.get_review_statistics().await?;
    Ok(HttpResponse::Ok().json(statistics))
}

/// Fetch one review of a book.
#[utoipa::path(
    get,
    path = "/api/books/{isbn}/reviews/{reviewId}",
    params(
        ("isbn" = String, Path, description = "ISBN of the book"),
        ("reviewId" = i64, Path, description = "Review identifier")
    ),
    responses(
        (status = 200, description = "Review", body = ReviewSummary),
        (status = 404, description = "Review not found for this book", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "getReviewById",
    security([])
)]
#[get("/books/{isbn}/reviews/{reviewId}")]
pub async fn get_review_by_id(
    state: web::Data<HttpState>,
    path: web::Path<(String, i64)>,
) -> ApiResult<HttpResponse> {
    let (isbn, review_id) = path.into_inner();
    let isbn = parse_book_key(&isbn, FieldName::new("isbn"))?;
    let review = state.reviews_query.get_review_by_id(&isbn, review_id).await?;
    Ok(HttpResponse::Ok().json(review))
}

/// Submit a review for a book as the authenticated caller.
#[utoipa::path(
    post,
    path = "/api/books/{isbn}/reviews",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    request_body = CreateReviewRequest,
    responses(
        (
            status = 201,
            description = "Review created",
            headers(("Location" = String, description = "URL of the new review"))
        ),
        (status = 400, description = "Invalid payload or rejected review quality", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 404, description = "Unknown book", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "createBookReview",
    security(("BearerAuth" = []))
)]
#[post("/books/{isbn}/reviews")]
pub async fn create_book_review(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    path: web::Path<String>,
    payload: web::Json<CreateReviewRequest>,
) -> ApiResult<HttpResponse> {
    let isbn = parse_book_key(&path.into_inner(), FieldName::new("isbn"))?;
    let CreateReviewRequest {
        review_title,
        review_content,
        rating,
    } = payload.into_inner();
    let review = parse_new_review(review_title, review_content, rating)?;
    let user = auth.user();
    let review_id = state
        .reviews
        .create_book_review(&isbn, review, user.username(), user.email())
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, review_location(isbn.as_ref(), review_id)))
        .finish())
}

/// Remove a review; requires the moderator role.
#[utoipa::path(
    delete,
    path = "/api/books/{isbn}/reviews/{reviewId}",
    params(
        ("isbn" = String, Path, description = "ISBN of the book"),
        ("reviewId" = i64, Path, description = "Review identifier")
    ),
    responses(
        (status = 200, description = "Review deleted or already absent"),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 403, description = "Caller is not a moderator", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "deleteReview",
    security(("BearerAuth" = []))
)]
#[delete("/books/{isbn}/reviews/{reviewId}")]
pub async fn delete_review(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    path: web::Path<(String, i64)>,
) -> ApiResult<HttpResponse> {
    let moderator = auth.require_role(Role::Moderator)?;
    let (isbn, review_id) = path.into_inner();
    let isbn = parse_book_key(&isbn, FieldName::new("isbn"))?;
    state.reviews.delete_review(&isbn, review_id).await?;
    info!(%isbn, review_id, moderator = %moderator.username(), "review deleted");
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "reviews_tests.rs"]
mod tests;
