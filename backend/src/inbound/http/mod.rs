//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod books;
pub mod error;
pub mod health;
pub mod reviews;
pub mod schemas;
pub mod state;
pub mod synchronization;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api` route on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use book_reviews::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(books::get_all_books)
        .service(reviews::get_all_reviews)
        .service(reviews::get_review_statistics)
        .service(reviews::get_review_by_id)
        .service(reviews::create_book_review)
        .service(reviews::delete_review)
        .service(synchronization::synchronize_book);
}
