//! Mock member registry client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::{AuthApi, MemberApi};
use super::models::{AuthResponse, LoginRequest, Member, MemberInput, RegisterRequest};
use crate::error::{ApiError, Result};
use crate::session::Role;

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockMemberClient::new()
///     .with_public_key(key_b64)
///     .with_token("h.p.s");
///
/// let token = crate::auth::login(&mock, "ada@example.com", "secret").await?;
/// ```
#[derive(Default)]
pub struct MockMemberClient {
    /// Key to return from get_public_key
    public_key: Arc<Mutex<Option<String>>>,
    /// Token to return from login/register
    token: Arc<Mutex<Option<String>>>,
    /// Members known to the mock backend
    members: Arc<Mutex<Vec<Member>>>,
    /// ID returned by get_current_member
    current_member_id: Arc<Mutex<Option<String>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub get_public_key: usize,
    pub login: usize,
    pub register: usize,
    pub list_members: usize,
    pub get_current_member: usize,
    pub get_member: usize,
    pub create_member: usize,
    pub update_member: usize,
    pub update_member_role: usize,
    pub delete_member: usize,
}

/// Request bodies seen by the mock
#[derive(Debug, Clone)]
pub enum CapturedRequest {
    Login(LoginRequest),
    Register(RegisterRequest),
    CreateMember(MemberInput),
    UpdateMember { id: String, input: MemberInput },
    UpdateRole { id: String, role: Role },
    DeleteMember(String),
}

impl MockMemberClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the public key served by `get_public_key`
    pub fn with_public_key(self, key: impl Into<String>) -> Self {
        *self.public_key.try_lock().unwrap() = Some(key.into());
        self
    }

    /// Set the token issued by `login`/`register`
    pub fn with_token(self, token: impl Into<String>) -> Self {
        *self.token.try_lock().unwrap() = Some(token.into());
        self
    }

    /// Seed the member list
    pub fn with_members(self, members: Vec<Member>) -> Self {
        *self.members.try_lock().unwrap() = members;
        self
    }

    /// Choose which seeded member `get_current_member` returns
    pub fn with_current_member(self, id: impl Into<String>) -> Self {
        *self.current_member_id.try_lock().unwrap() = Some(id.into());
        self
    }

    /// Fail the next call with `error`
    pub fn with_error(self, error: ApiError) -> Self {
        *self.error.try_lock().unwrap() = Some(error);
        self
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    pub async fn members(&self) -> Vec<Member> {
        self.members.lock().await.clone()
    }

    async fn take_error(&self) -> Result<()> {
        match self.error.lock().await.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    async fn capture(&self, request: CapturedRequest) {
        self.captured_requests.lock().await.push(request);
    }

    async fn issued_token(&self) -> Result<AuthResponse> {
        let token = self.token.lock().await.clone();
        token
            .map(|token| AuthResponse { token })
            .ok_or_else(|| ApiError::Unauthorized.into())
    }

    async fn find_member(&self, id: &str) -> Result<Member> {
        self.members
            .lock()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Member {}", id)).into())
    }
}

#[async_trait]
impl AuthApi for MockMemberClient {
    async fn get_public_key(&self) -> Result<String> {
        self.call_count.lock().await.get_public_key += 1;
        self.take_error().await?;
        self.public_key
            .lock()
            .await
            .clone()
            .ok_or_else(|| ApiError::NotFound("public key".to_string()).into())
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.call_count.lock().await.login += 1;
        self.capture(CapturedRequest::Login(request.clone())).await;
        self.take_error().await?;
        self.issued_token().await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.call_count.lock().await.register += 1;
        self.capture(CapturedRequest::Register(request.clone())).await;
        self.take_error().await?;
        self.issued_token().await
    }
}

#[async_trait]
impl MemberApi for MockMemberClient {
    async fn list_members(&self) -> Result<Vec<Member>> {
        self.call_count.lock().await.list_members += 1;
        self.take_error().await?;
        Ok(self.members.lock().await.clone())
    }

    async fn get_current_member(&self) -> Result<Member> {
        self.call_count.lock().await.get_current_member += 1;
        self.take_error().await?;
        let id = self
            .current_member_id
            .lock()
            .await
            .clone()
            .ok_or(ApiError::Unauthorized)?;
        self.find_member(&id).await
    }

    async fn get_member(&self, id: &str) -> Result<Member> {
        self.call_count.lock().await.get_member += 1;
        self.take_error().await?;
        self.find_member(id).await
    }

    async fn create_member(&self, input: &MemberInput) -> Result<Member> {
        self.call_count.lock().await.create_member += 1;
        self.capture(CapturedRequest::CreateMember(input.clone()))
            .await;
        self.take_error().await?;

        let mut members = self.members.lock().await;
        let member = Member {
            id: format!("m{}", members.len() + 1),
            name: input.name.clone(),
            email: input.email.clone(),
            phone_number: input.phone_number.clone(),
            role: Some(Role::User),
        };
        members.push(member.clone());
        Ok(member)
    }

    async fn update_member(&self, id: &str, input: &MemberInput) -> Result<Member> {
        self.call_count.lock().await.update_member += 1;
        self.capture(CapturedRequest::UpdateMember {
            id: id.to_string(),
            input: input.clone(),
        })
        .await;
        self.take_error().await?;

        let mut members = self.members.lock().await;
        let member = members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Member {}", id)))?;
        member.name = input.name.clone();
        member.phone_number = input.phone_number.clone();
        Ok(member.clone())
    }

    async fn update_member_role(&self, id: &str, role: Role) -> Result<Member> {
        self.call_count.lock().await.update_member_role += 1;
        self.capture(CapturedRequest::UpdateRole {
            id: id.to_string(),
            role,
        })
        .await;
        self.take_error().await?;

        let mut members = self.members.lock().await;
        let member = members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Member {}", id)))?;
        member.role = Some(role);
        Ok(member.clone())
    }

    async fn delete_member(&self, id: &str) -> Result<()> {
        self.call_count.lock().await.delete_member += 1;
        self.capture(CapturedRequest::DeleteMember(id.to_string()))
            .await;
        self.take_error().await?;

        let mut members = self.members.lock().await;
        let before = members.len();
        members.retain(|m| m.id != id);
        if members.len() == before {
            return Err(ApiError::NotFound(format!("Member {}", id)).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, name: &str) -> Member {
        Member {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            phone_number: "5551234567".to_string(),
            role: Some(Role::User),
        }
    }

    #[tokio::test]
    async fn test_mock_error_is_consumed_once() {
        let mock = MockMemberClient::new()
            .with_members(vec![member("m1", "Ada")])
            .with_error(ApiError::ServerError("boom".to_string()));

        assert!(mock.list_members().await.is_err());
        assert_eq!(mock.list_members().await.unwrap().len(), 1);
        assert_eq!(mock.call_counts().await.list_members, 2);
    }

    #[tokio::test]
    async fn test_mock_current_member() {
        let mock = MockMemberClient::new()
            .with_members(vec![member("m1", "Ada"), member("m2", "Grace")])
            .with_current_member("m2");

        assert_eq!(mock.get_current_member().await.unwrap().name, "Grace");
    }

    #[tokio::test]
    async fn test_mock_crud_cycle() {
        let mock = MockMemberClient::new();
        let input = MemberInput {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "5551234567".to_string(),
        };

        let created = mock.create_member(&input).await.unwrap();
        let promoted = mock
            .update_member_role(&created.id, Role::Admin)
            .await
            .unwrap();
        assert_eq!(promoted.role, Some(Role::Admin));

        mock.delete_member(&created.id).await.unwrap();
        assert!(mock.get_member(&created.id).await.is_err());
        assert_eq!(mock.captured_requests().await.len(), 3);
    }
}
