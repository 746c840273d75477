//! Authenticated principal derived from a verified bearer token.
//!
//! The inbound layer verifies tokens through the
//! [`TokenVerifier`](crate::domain::ports::TokenVerifier) port and hands the
//! resulting [`AuthenticatedUser`] to handlers; the domain only cares about
//! identity and roles.

use std::collections::BTreeSet;
use std::fmt;

use super::{Email, Username};

/// Roles recognised by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// May delete reviews and trigger book synchronisation.
    Moderator,
}

impl Role {
    /// Role name as it appears in token claims.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Moderator => "moderator",
        }
    }

    /// Parse a claim value, ignoring roles the API does not know.
    pub fn from_claim(value: &str) -> Option<Self> {
        value
            .trim()
            .eq_ignore_ascii_case("moderator")
            .then_some(Self::Moderator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and roles of the caller.
///
/// # Examples
/// ```
/// use book_reviews::domain::{AuthenticatedUser, Email, Role, Username};
///
/// let user = AuthenticatedUser::new(
///     Username::new("duke").expect("valid username"),
///     Email::new("duke@spring.io").expect("valid email"),
///     [Role::Moderator],
/// );
/// assert!(user.has_role(Role::Moderator));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    username: Username,
    email: Email,
    roles: BTreeSet<Role>,
}

impl AuthenticatedUser {
    pub fn new(username: Username, email: Email, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            username,
            email,
            roles: roles.into_iter().collect(),
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
