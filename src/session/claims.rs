//! Session token claim decoding
//!
//! Claims are read without verifying the token signature. The backend is the
//! authority on validity; the client only uses the claims to decide what to
//! offer the user and when the token is no longer worth sending.

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Role;
use crate::error::TokenError;

/// Claims embedded in the middle segment of a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (member identifier)
    pub sub: String,

    /// Role name as issued, e.g. `ROLE_ADMIN`
    pub role: String,

    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
}

impl Claims {
    /// Role derived from the `role` claim
    pub fn role(&self) -> Role {
        Role::from_claim(&self.role)
    }

    /// Expiry as a timestamp, if representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Whether the token has expired at `now`.
    ///
    /// Compared in milliseconds so a token expiring this very second is still
    /// valid until its instant passes.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.saturating_mul(1000) < now.timestamp_millis()
    }
}

/// Decode base64url (URL-safe base64, padding optional)
fn base64_decode_url(input: &str) -> Result<Vec<u8>, TokenError> {
    // Base64url uses - instead of + and _ instead of /
    let standard_b64 = input
        .trim_end_matches('=')
        .replace('-', "+")
        .replace('_', "/");

    let padding = match standard_b64.len() % 4 {
        0 => "",
        2 => "==",
        3 => "=",
        _ => return Err(TokenError::Encoding("Invalid base64url length".to_string())),
    };

    let padded = format!("{}{}", standard_b64, padding);

    general_purpose::STANDARD
        .decode(&padded)
        .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Decode the claims of a `header.payload.signature` token
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 || parts[1].is_empty() {
        return Err(TokenError::Malformed);
    }

    let payload = base64_decode_url(parts[1])?;
    serde_json::from_slice(&payload).map_err(|e| TokenError::Claims(e.to_string()))
}

/// Whether `token` is expired now. Undecodable tokens count as expired.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now())
}

/// Whether `token` is expired at `now`. Undecodable tokens count as expired.
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.is_expired_at(now),
        Err(e) => {
            log::debug!("Treating undecodable token as expired: {}", e);
            true
        }
    }
}
