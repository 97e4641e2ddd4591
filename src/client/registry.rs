//! Member registry HTTP client implementation

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::models::{
    AuthResponse, LoginRequest, Member, MemberInput, PublicKeyResponse, RegisterRequest,
    RoleUpdate,
};
use super::{AuthApi, MemberApi};
use crate::error::{ApiError, ConfigError, Result};
use crate::session::Role;

/// HTTP request timeout
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Member registry API client.
///
/// Sends `Authorization: Bearer <token>` on every request while a token is
/// set.
pub struct RegistryClient {
    http: HttpClient,
    base_url: Url,
    token: Option<String>,
}

impl RegistryClient {
    /// Create a client for the backend at `base_url` (e.g. `http://localhost:8080/api`)
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let raw = base_url.as_ref().trim_end_matches('/');
        let base_url = Url::parse(raw)
            .map_err(|e| ConfigError::Invalid(format!("API host '{}': {}", raw, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::Invalid(format!("API host '{}' is not an HTTP URL", raw)).into());
        }
        debug!("API base URL: {}", base_url);

        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Attach a bearer token to subsequent requests
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Append path segments to the base URL. Each segment is percent-encoded,
    /// so an ID can never escape its position in the path.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL always has a path
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        debug!("{} {}", method, url.path());

        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, credentials: bool) -> Result<Response> {
        let response = builder.send().await.map_err(ApiError::from)?;
        check_status(response, credentials).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        credentials: bool,
    ) -> Result<T> {
        let response = self.send(builder, credentials).await?;
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;
        Ok(data)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        self.send_json(self.request(Method::GET, segments), false).await
    }

    async fn with_body<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        self.send_json(self.request(method, segments).json(body), false)
            .await
    }
}

/// Map a non-success response to an [`ApiError`].
///
/// On the credential endpoints a 401/403 means the backend rejected the
/// email/password, so its message is surfaced instead of the generic
/// "session" error.
async fn check_status(response: Response, credentials: bool) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| status.to_string());
    debug!("Request failed with {}: {}", status, message);

    let err = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN if credentials => {
            ApiError::BadRequest(message)
        }
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::BadRequest(message)
        }
        StatusCode::CONFLICT => ApiError::Conflict(message),
        status if status.is_server_error() => ApiError::ServerError(message),
        _ => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
    };

    Err(err.into())
}

/// Extract a readable message from an error body.
///
/// Understands `{"message": ...}`, `{"error": ...}` and field maps such as
/// `{"email": "Email already exists"}`; falls back to the raw text.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body)
    else {
        return Some(body.to_string());
    };

    for key in ["message", "error"] {
        if let Some(serde_json::Value::String(msg)) = map.get(key)
            && !msg.is_empty()
        {
            return Some(msg.clone());
        }
    }

    let fields: Vec<String> = map
        .iter()
        .filter_map(|(field, value)| value.as_str().map(|msg| format!("{}: {}", field, msg)))
        .collect();

    if fields.is_empty() {
        Some(body.to_string())
    } else {
        Some(fields.join("; "))
    }
}

#[async_trait]
impl AuthApi for RegistryClient {
    async fn get_public_key(&self) -> Result<String> {
        let response: PublicKeyResponse = self.get(&["keys", "public"]).await?;
        debug!("Fetched public key ({} chars)", response.public_key.len());
        Ok(response.public_key)
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let builder = self.request(Method::POST, &["auth", "login"]).json(request);
        self.send_json(builder, true).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let builder = self.request(Method::POST, &["auth", "register"]).json(request);
        self.send_json(builder, true).await
    }
}

#[async_trait]
impl MemberApi for RegistryClient {
    async fn list_members(&self) -> Result<Vec<Member>> {
        self.get(&["members"]).await
    }

    async fn get_current_member(&self) -> Result<Member> {
        self.get(&["members", "me"]).await
    }

    async fn get_member(&self, id: &str) -> Result<Member> {
        self.get(&["members", id]).await
    }

    async fn create_member(&self, input: &MemberInput) -> Result<Member> {
        self.with_body(Method::POST, &["members"], input).await
    }

    async fn update_member(&self, id: &str, input: &MemberInput) -> Result<Member> {
        self.with_body(Method::PUT, &["members", id], input)
            .await
    }

    async fn update_member_role(&self, id: &str, role: Role) -> Result<Member> {
        self.with_body(
            Method::PATCH,
            &["members", id, "role"],
            &RoleUpdate { role },
        )
        .await
    }

    async fn delete_member(&self, id: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, &["members", id]), false)
            .await?;
        Ok(())
    }
}
