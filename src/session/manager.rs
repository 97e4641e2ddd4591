//! Session state machine over one token slot

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use super::{AuthState, Destination, Session, TokenStorage, decode_claims, is_expired, is_expired_at};
use crate::error::{Error, Result, TokenError};

/// Owns the session token for the lifetime of a process.
///
/// Storage is read once by [`restore`](Self::restore); afterwards every read
/// is served from memory and every mutation is written through to storage.
/// An expired token is never observable: whenever the state is read, a token
/// whose expiry has passed is dropped and purged from storage.
pub struct SessionManager<S: TokenStorage> {
    storage: S,
    state: AuthState,
}

impl<S: TokenStorage> SessionManager<S> {
    /// Create a manager in the [`AuthState::Loading`] state
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: AuthState::Loading,
        }
    }

    /// Create a manager and restore the persisted session
    pub fn start(storage: S) -> Self {
        let mut manager = Self::new(storage);
        manager.restore();
        manager
    }

    /// Re-derive the session from persisted storage.
    ///
    /// Never fails: unreadable storage, or a stored token that is expired or
    /// cannot be decoded, leaves the session unauthenticated. Bad tokens are
    /// removed from storage.
    pub fn restore(&mut self) {
        self.restore_at(Utc::now())
    }

    fn restore_at(&mut self, now: DateTime<Utc>) {
        let token = match self.storage.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No stored session token");
                self.state = AuthState::Unauthenticated;
                return;
            }
            Err(e) => {
                warn!("Could not read stored session ({}); continuing logged out", e);
                self.state = AuthState::Unauthenticated;
                return;
            }
        };

        if is_expired_at(&token, now) {
            info!("Stored session token is expired or unreadable; clearing it");
            self.purge();
            return;
        }

        self.state = match decode_claims(&token) {
            Ok(claims) => {
                debug!("Restored session for {}", claims.sub);
                AuthState::Authenticated(Session::new(token, claims))
            }
            Err(_) => AuthState::Unauthenticated,
        };
    }

    /// Drop to unauthenticated and remove the stored token, logging (not
    /// propagating) storage failures
    fn purge(&mut self) {
        self.state = AuthState::Unauthenticated;
        if let Err(e) = self.storage.remove() {
            warn!("Failed to remove stored session token: {}", e);
        }
    }

    /// Current state, after purging an expired session
    pub fn state(&mut self) -> &AuthState {
        self.state_at(Utc::now())
    }

    fn state_at(&mut self, now: DateTime<Utc>) -> &AuthState {
        if let AuthState::Authenticated(session) = &self.state
            && is_expired_at(session.token(), now)
        {
            info!("Session token expired; clearing it");
            self.purge();
        }
        &self.state
    }

    pub fn is_authenticated(&mut self) -> bool {
        self.state().is_authenticated()
    }

    pub fn is_admin(&mut self) -> bool {
        self.state().is_admin()
    }

    /// The live session, if any
    pub fn session(&mut self) -> Option<&Session> {
        self.state().session()
    }

    /// The live session, or [`Error::NotLoggedIn`]
    pub fn require_session(&mut self) -> Result<&Session> {
        self.session().ok_or(Error::NotLoggedIn)
    }

    /// The live session if it belongs to an administrator.
    ///
    /// This gates what the client offers; the backend still authorizes every
    /// request on its own.
    pub fn require_admin(&mut self) -> Result<&Session> {
        if self.is_authenticated() && !self.is_admin() {
            return Err(Error::AdminRequired);
        }
        self.require_session()
    }

    /// Adopt a freshly issued token.
    ///
    /// The token is decoded (not verified), persisted, and the destination
    /// for its role is returned. A token whose claims cannot be decoded, or
    /// that has already expired, is rejected without being stored.
    pub fn login(&mut self, token: impl Into<String>) -> Result<Destination> {
        let token = token.into();
        let claims = decode_claims(&token).inspect_err(|e| {
            warn!("Rejecting session token with unreadable claims: {}", e);
        })?;
        if is_expired(&token) {
            warn!("Rejecting session token that expired at {}", claims.exp);
            return Err(TokenError::Expired.into());
        }

        self.storage.store(&token)?;

        let role = claims.role();
        info!("Logged in as {} ({})", claims.sub, role);
        self.state = AuthState::Authenticated(Session::new(token, claims));

        Ok(Destination::for_role(role))
    }

    /// Drop the session and remove the persisted token
    pub fn logout(&mut self) -> Result<Destination> {
        self.state = AuthState::Unauthenticated;
        self.storage.remove()?;
        info!("Logged out");
        Ok(Destination::Login)
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
