//! Authentication models

use serde::{Deserialize, Serialize};

/// Response of `GET /keys/public`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyResponse {
    /// Base64-encoded SPKI DER public key
    pub public_key: String,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,

    /// Base64 RSA-OAEP ciphertext of the password, never the plaintext
    pub password: String,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,

    /// Base64 RSA-OAEP ciphertext of the password, never the plaintext
    pub password: String,

    pub name: String,

    pub phone_number: String,
}

/// Token issued on successful login or registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}
