//! Client-side password encryption
//!
//! Passwords leave the client only as RSA-OAEP (SHA-256) ciphertext under a
//! public key the backend hands out. The key arrives as base64-encoded
//! SubjectPublicKeyInfo DER and the ciphertext goes back as base64.

use base64::{Engine as _, engine::general_purpose};
use log::debug;
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPublicKey};
use sha2::Sha256;

use crate::error::CryptoError;

/// Import a base64-encoded SPKI public key
pub fn import_public_key(public_key_b64: &str) -> Result<RsaPublicKey, CryptoError> {
    let der = general_purpose::STANDARD
        .decode(public_key_b64.trim())
        .map_err(|e| CryptoError::KeyEncoding(e.to_string()))?;

    debug!("Public key DER length: {}", der.len());

    RsaPublicKey::from_public_key_der(&der).map_err(|e| CryptoError::KeyImport(e.to_string()))
}

/// Encrypt a password for transmission.
///
/// Returns base64 ciphertext whose decoded length equals the key's modulus
/// size in bytes.
pub fn encrypt_password(password: &str, public_key_b64: &str) -> Result<String, CryptoError> {
    if password.is_empty() {
        return Err(CryptoError::EmptyPassword);
    }

    let key = import_public_key(public_key_b64)?;

    let mut rng = rand::thread_rng();
    let ciphertext = key
        .encrypt(&mut rng, Oaep::new::<Sha256>(), password.as_bytes())
        .map_err(|e| CryptoError::Encrypt(e.to_string()))?;

    debug!(
        "Password encrypted ({} byte modulus, {} byte ciphertext)",
        key.size(),
        ciphertext.len()
    );

    Ok(general_purpose::STANDARD.encode(ciphertext))
}
