//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::error::Result;

/// Authentication operations of the member registry
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Fetch the backend's current password-encryption key (base64 SPKI DER)
    async fn get_public_key(&self) -> Result<String>;

    /// Exchange an email and encrypted password for a session token
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse>;

    /// Create an account and receive a session token
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse>;
}
