//! Member models

use serde::{Deserialize, Serialize};

use crate::session::Role;

/// Member record as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Member ID
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address (immutable once created)
    pub email: String,

    /// Phone number, digits only
    pub phone_number: String,

    /// Role, when the endpoint includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Member {
    /// Editable fields of this member
    pub fn to_input(&self) -> MemberInput {
        MemberInput {
            name: self.name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

/// Body of `POST /members` and `PUT /members/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

/// Body of `PATCH /members/:id/role`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleUpdate {
    pub role: Role,
}
