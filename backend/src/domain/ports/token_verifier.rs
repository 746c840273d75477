//! Driven port for verifying bearer tokens.

use crate::domain::AuthenticatedUser;

use super::define_port_error;

define_port_error! {
    /// Reasons a bearer token was not accepted.
    pub enum TokenVerificationError {
        /// Signature, expiry, or structure checks failed.
        Invalid { message: String } => "invalid bearer token: {message}",
        /// The token is valid but lacks identity claims.
        MissingClaim { claim: String } => "bearer token is missing claim {claim}",
    }
}

/// Verifies a raw bearer token and extracts the caller identity.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, TokenVerificationError>;
}
