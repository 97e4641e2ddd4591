//! Session token management
//!
//! A session is a single bearer token slot. The token is persisted through a
//! [`TokenStorage`], mirrored in memory by [`SessionManager`], and its claims
//! decide what the client offers: whether the user is logged in, whether they
//! are an administrator, and where they go after logging in or out.

mod claims;
mod manager;
mod storage;

use serde::{Deserialize, Serialize};

pub use claims::{Claims, decode_claims, is_expired, is_expired_at};
pub use manager::SessionManager;
pub use storage::{ConfigTokenStorage, TokenStorage};

#[cfg(test)]
pub use storage::MemoryTokenStorage;

#[cfg(test)]
pub(crate) use claims::tests::{make_token, token_with_payload};

/// Role claim value granting administrator access
pub const ADMIN_ROLE_CLAIM: &str = "ROLE_ADMIN";

/// Member role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Standard member
    #[serde(alias = "USER", alias = "ROLE_USER")]
    User,
    /// Administrator
    #[serde(alias = "ADMIN", alias = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// Derive a role from a token's `role` claim. Anything but the admin
    /// claim is a standard member.
    pub fn from_claim(claim: &str) -> Self {
        if claim == ADMIN_ROLE_CLAIM {
            Role::Admin
        } else {
            Role::User
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Where the user should be sent after a session change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Administrator landing point
    AdminDashboard,
    /// Standard member landing point
    Dashboard,
    /// Unauthenticated entry point
    Login,
}

impl Destination {
    /// Landing point after logging in with `role`
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Destination::AdminDashboard,
            Role::User => Destination::Dashboard,
        }
    }

    /// Command that opens this destination
    pub fn command(&self) -> &'static str {
        match self {
            Destination::AdminDashboard => "memberctl member list",
            Destination::Dashboard => "memberctl member me",
            Destination::Login => "memberctl login",
        }
    }
}

/// A live, unexpired session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    claims: Claims,
}

impl Session {
    fn new(token: String, claims: Claims) -> Self {
        Self { token, claims }
    }

    /// Raw bearer token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Decoded claims
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Role derived from the claims
    pub fn role(&self) -> Role {
        self.claims.role()
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }
}

/// Observable authentication state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Persisted storage has not been read yet
    Loading,
    /// No valid token
    Unauthenticated,
    /// A decoded, unexpired token
    Authenticated(Session),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn is_admin(&self) -> bool {
        match self {
            AuthState::Authenticated(session) => session.is_admin(),
            _ => false,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}
