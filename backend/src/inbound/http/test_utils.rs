//! Test helpers for inbound HTTP components.

use crate::domain::ports::{TokenVerificationError, TokenVerifier};
use crate::domain::{AuthenticatedUser, Email, Role, Username};

/// Token accepted by [`StaticTokenVerifier`] for a caller without roles.
pub const READER_TOKEN: &str = "reader-token";
/// Token accepted by [`StaticTokenVerifier`] for a moderator.
pub const MODERATOR_TOKEN: &str = "moderator-token";

/// Verifier that recognises two fixed tokens and rejects everything else.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticTokenVerifier;

impl TokenVerifier for StaticTokenVerifier {
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, TokenVerificationError> {
        let roles: &[Role] = match token {
            READER_TOKEN => &[],
            MODERATOR_TOKEN => &[Role::Moderator],
            _ => return Err(TokenVerificationError::invalid("unknown test token")),
        };
        let username = Username::new("duke").expect("fixture username");
        let email = Email::new("duke@spring.io").expect("fixture email");
        Ok(AuthenticatedUser::new(username, email, roles.iter().copied()))
    }
}

/// `Authorization` header value carrying `token`.
pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {token}"),
    )
}
