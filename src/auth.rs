//! Login and registration flows
//!
//! Both flows fetch a fresh public key, encrypt the password with it and only
//! then contact the credential endpoint. If the key cannot be fetched or the
//! encryption fails, the attempt is aborted before anything carrying the
//! password is sent.

use log::debug;

use crate::client::AuthApi;
use crate::client::models::{LoginRequest, MemberInput, RegisterRequest};
use crate::crypto::encrypt_password;
use crate::error::Result;
use crate::validation;

/// Fetch the backend's current key and encrypt `password` under it.
///
/// The key is fetched on every call and never cached.
pub async fn encrypt_with_fresh_key<A: AuthApi + ?Sized>(api: &A, password: &str) -> Result<String> {
    let public_key = api.get_public_key().await?;
    let ciphertext = encrypt_password(password, &public_key)?;
    Ok(ciphertext)
}

/// Log in and return the issued session token
pub async fn login<A: AuthApi + ?Sized>(api: &A, email: &str, password: &str) -> Result<String> {
    validation::validate_login(email, password)?;

    let encrypted = encrypt_with_fresh_key(api, password).await?;

    debug!("Submitting login for {}", email);
    let response = api
        .login(&LoginRequest {
            email: email.to_string(),
            password: encrypted,
        })
        .await?;

    Ok(response.token)
}

/// Register a new account and return the issued session token
pub async fn register<A: AuthApi + ?Sized>(
    api: &A,
    profile: &MemberInput,
    password: &str,
) -> Result<String> {
    validation::validate_registration(profile, password)?;

    let encrypted = encrypt_with_fresh_key(api, password).await?;

    debug!("Submitting registration for {}", profile.email);
    let response = api
        .register(&RegisterRequest {
            email: profile.email.clone(),
            password: encrypted,
            name: profile.name.clone(),
            phone_number: profile.phone_number.clone(),
        })
        .await?;

    Ok(response.token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockMemberClient;
    use crate::client::mock::CapturedRequest;
    use crate::crypto::tests::{test_private_key, test_public_key_b64};
    use crate::error::{ApiError, CryptoError, Error};
    use base64::{Engine as _, engine::general_purpose};
    use rsa::Oaep;
    use sha2::Sha256;

    fn profile() -> MemberInput {
        MemberInput {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "5551234567".to_string(),
        }
    }

    fn decrypt(ciphertext_b64: &str) -> String {
        let raw = general_purpose::STANDARD.decode(ciphertext_b64).unwrap();
        let plain = test_private_key()
            .decrypt(Oaep::new::<Sha256>(), &raw)
            .unwrap();
        String::from_utf8(plain).unwrap()
    }

    #[tokio::test]
    async fn test_login_sends_ciphertext() {
        let mock = MockMemberClient::new()
            .with_public_key(test_public_key_b64())
            .with_token("h.p.s");

        let token = login(&mock, "ada@example.com", "hunter22").await.unwrap();
        assert_eq!(token, "h.p.s");

        let captured = mock.captured_requests().await;
        let CapturedRequest::Login(request) = &captured[0] else {
            panic!("Expected a login request, got {:?}", captured);
        };
        assert_eq!(request.email, "ada@example.com");
        assert_ne!(request.password, "hunter22");
        assert_eq!(decrypt(&request.password), "hunter22");
    }

    #[tokio::test]
    async fn test_register_sends_ciphertext_and_profile() {
        let mock = MockMemberClient::new()
            .with_public_key(test_public_key_b64())
            .with_token("h.p.s");

        register(&mock, &profile(), "s3cret!").await.unwrap();

        let captured = mock.captured_requests().await;
        let CapturedRequest::Register(request) = &captured[0] else {
            panic!("Expected a register request, got {:?}", captured);
        };
        assert_eq!(request.name, "Ada Lovelace");
        assert_eq!(request.phone_number, "5551234567");
        assert_eq!(decrypt(&request.password), "s3cret!");
    }

    #[tokio::test]
    async fn test_each_attempt_fetches_a_fresh_key() {
        let mock = MockMemberClient::new()
            .with_public_key(test_public_key_b64())
            .with_token("h.p.s");

        login(&mock, "ada@example.com", "one").await.unwrap();
        login(&mock, "ada@example.com", "two").await.unwrap();
        register(&mock, &profile(), "three").await.unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.get_public_key, 3);
        assert_eq!(counts.login, 2);
        assert_eq!(counts.register, 1);
    }

    #[tokio::test]
    async fn test_key_fetch_failure_aborts_login() {
        let mock = MockMemberClient::new()
            .with_public_key(test_public_key_b64())
            .with_token("h.p.s")
            .with_error(ApiError::Network("Failed to connect to API".to_string()));

        let err = login(&mock, "ada@example.com", "hunter22").await.unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Network(_))));
        assert_eq!(mock.call_counts().await.login, 0);
        assert!(mock.captured_requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_bad_key_never_falls_back_to_plaintext() {
        let mock = MockMemberClient::new()
            .with_public_key("%%% not a key %%%")
            .with_token("h.p.s");

        let err = login(&mock, "ada@example.com", "hunter22").await.unwrap_err();

        assert!(matches!(err, Error::Crypto(CryptoError::KeyEncoding(_))));
        assert_eq!(mock.call_counts().await.login, 0);
    }

    #[tokio::test]
    async fn test_malformed_key_aborts_registration() {
        let bogus = general_purpose::STANDARD.encode(b"not der");
        let mock = MockMemberClient::new()
            .with_public_key(bogus)
            .with_token("h.p.s");

        let err = register(&mock, &profile(), "hunter22").await.unwrap_err();

        assert!(matches!(err, Error::Crypto(CryptoError::KeyImport(_))));
        assert_eq!(mock.call_counts().await.register, 0);
    }

    #[tokio::test]
    async fn test_invalid_input_makes_no_requests() {
        let mock = MockMemberClient::new().with_public_key(test_public_key_b64());

        let err = login(&mock, "ada@example.com", "").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let mut bad = profile();
        bad.phone_number = "12ab".to_string();
        let err = register(&mock, &bad, "hunter22").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        assert_eq!(mock.call_counts().await.get_public_key, 0);
    }

    #[tokio::test]
    async fn test_rejected_credentials_propagate() {
        let mock = MockMemberClient::new().with_public_key(test_public_key_b64());

        // No token configured: the mock backend rejects the login
        let err = login(&mock, "ada@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Unauthorized)));
    }
}
