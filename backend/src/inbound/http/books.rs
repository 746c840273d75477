//! Book catalogue read endpoint.
//!
//! ```text
//! GET /api/books
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::Book;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// List every book in the catalogue ordered by id.
#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "Books in the catalogue", body = [Book]),
        (status = 406, description = "Accept header excludes JSON", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "getAllBooks",
    security([])
)]
#[get("/books")]
pub async fn get_all_books(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let books = state.books.get_all_books().await?;
    Ok(HttpResponse::Ok().json(books))
}
