//! Bearer token extraction for protected endpoints.
//!
//! The verifier is registered as `web::Data<dyn TokenVerifier>`; handlers
//! that take a [`BearerAuth`] argument answer `401` before running when the
//! `Authorization` header is missing or the token does not verify.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::{debug, warn};

use crate::domain::ports::TokenVerifier;
use crate::domain::{AuthenticatedUser, Error, Role};

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated caller resolved from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct BearerAuth(AuthenticatedUser);

impl BearerAuth {
    pub fn user(&self) -> &AuthenticatedUser {
        &self.0
    }

    pub fn into_user(self) -> AuthenticatedUser {
        self.0
    }

    /// Require `role` or return `403 Forbidden`.
    pub fn require_role(&self, role: Role) -> Result<&AuthenticatedUser, Error> {
        if self.0.has_role(role) {
            Ok(&self.0)
        } else {
            debug!(user = %self.0.username(), %role, "caller lacks required role");
            Err(Error::forbidden(format!("{role} role required")))
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("bearer token required"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("authorization header is not valid ASCII"))?;
    let token = value
        .split_at_checked(BEARER_PREFIX.len())
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case(BEARER_PREFIX))
        .map(|(_, token)| token.trim())
        .ok_or_else(|| Error::unauthorized("authorization scheme must be Bearer"))?;
    if token.is_empty() {
        return Err(Error::unauthorized("bearer token required"));
    }
    Ok(token)
}

fn authenticate(req: &HttpRequest) -> Result<BearerAuth, Error> {
    let token = bearer_token(req)?;
    let verifier = req
        .app_data::<web::Data<dyn TokenVerifier>>()
        .ok_or_else(|| Error::internal("token verifier is not configured"))?;
    verifier.verify(token).map(BearerAuth).map_err(|err| {
        warn!(error = %err, "rejected bearer token");
        Error::unauthorized("invalid bearer token")
    })
}

impl FromRequest for BearerAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
