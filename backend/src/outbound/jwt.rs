//! HS256 bearer token verifier backed by `jsonwebtoken`.
//!
//! Tokens carry the caller identity in `preferred_username` and `email`.
//! Roles are read from both `realm_access.roles` and a top-level `roles`
//! array so tokens from realm-based identity providers and plain issuers
//! are treated alike.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::domain::ports::{TokenVerificationError, TokenVerifier};
use crate::domain::{AuthenticatedUser, Email, Role, Username};

#[derive(Debug, Default, Deserialize)]
struct RealmAccess {
    #[serde(default)]
    roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Claims {
    preferred_username: Option<String>,
    email: Option<String>,
    #[serde(default)]
    realm_access: RealmAccess,
    #[serde(default)]
    roles: Vec<String>,
}

/// Verifies HS256-signed tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    /// Build a verifier; `issuer` and `audience` are checked when supplied.
    pub fn new(secret: &[u8], issuer: Option<&str>, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl std::fmt::Debug for JwtTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenVerifier").finish_non_exhaustive()
    }
}

fn required_claim(value: Option<String>, claim: &str) -> Result<String, TokenVerificationError> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| TokenVerificationError::missing_claim(claim))
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, TokenVerificationError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|err| TokenVerificationError::invalid(err.to_string()))?;
        let claims = data.claims;

        let username = Username::new(required_claim(
            claims.preferred_username,
            "preferred_username",
        )?)
        .map_err(|err| TokenVerificationError::invalid(err.to_string()))?;
        let email = Email::new(required_claim(claims.email, "email")?)
            .map_err(|err| TokenVerificationError::invalid(err.to_string()))?;
        let roles = claims
            .realm_access
            .roles
            .iter()
            .chain(claims.roles.iter())
            .filter_map(|role| Role::from_claim(role));

        Ok(AuthenticatedUser::new(username, email, roles))
    }
}
