//! Content negotiation guard for the JSON API.
//!
//! Every API response is `application/json`. Requests whose `Accept` header
//! rules that out are answered with `406 Not Acceptable` before routing.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{ACCEPT, HeaderMap};
use actix_web::{Error, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::Error as ApiError;

fn admits_json(range: &str) -> bool {
    let mut parts = range.split(';');
    let media = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
    let refused = parts.any(|param| {
        let param = param.trim();
        param
            .strip_prefix("q=")
            .and_then(|q| q.trim().parse::<f32>().ok())
            .is_some_and(|q| q <= 0.0)
    });
    !refused && matches!(media.as_str(), "*/*" | "application/*" | "application/json")
}

/// Whether the request's `Accept` headers allow a JSON response.
///
/// A missing header accepts anything.
pub fn accepts_json(headers: &HeaderMap) -> bool {
    let mut values = headers.get_all(ACCEPT).peekable();
    if values.peek().is_none() {
        return true;
    }
    values
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .any(admits_json)
}

/// Middleware rejecting requests that cannot accept JSON.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use book_reviews::middleware::JsonOnly;
///
/// let _app = App::new().service(web::scope("/api").wrap(JsonOnly));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOnly;

impl<S, B> Transform<S, ServiceRequest> for JsonOnly
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JsonOnlyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JsonOnlyMiddleware { service }))
    }
}

/// Service wrapper produced by [`JsonOnly`].
pub struct JsonOnlyMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JsonOnlyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if accepts_json(req.headers()) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }
        // Build the error inside the future so the trace id scope applies.
        Box::pin(async move {
            debug!(path = %req.path(), "request does not accept JSON");
            let error = ApiError::not_acceptable("only application/json responses are available");
            Ok(req
                .into_response(error.error_response())
                .map_into_right_body())
        })
    }
}
