//! Member CRUD API trait

use async_trait::async_trait;

use crate::client::models::{Member, MemberInput};
use crate::error::Result;
use crate::session::Role;

/// Member operations of the member registry
#[async_trait]
pub trait MemberApi: Send + Sync {
    /// List all members (administrators only)
    async fn list_members(&self) -> Result<Vec<Member>>;

    /// The member the current token belongs to
    async fn get_current_member(&self) -> Result<Member>;

    /// A single member by ID
    async fn get_member(&self, id: &str) -> Result<Member>;

    /// Create a member
    async fn create_member(&self, input: &MemberInput) -> Result<Member>;

    /// Replace a member's editable fields
    async fn update_member(&self, id: &str, input: &MemberInput) -> Result<Member>;

    /// Change a member's role
    async fn update_member_role(&self, id: &str, role: Role) -> Result<Member>;

    /// Delete a member
    async fn delete_member(&self, id: &str) -> Result<()>;
}
