//! Member display models

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Member;

/// Member display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MemberDisplay {
    /// Member ID
    #[tabled(rename = "MEMBER ID")]
    pub id: String,

    /// Member name
    #[tabled(rename = "NAME")]
    pub name: String,

    /// Email address
    #[tabled(rename = "EMAIL")]
    pub email: String,

    /// Phone number
    #[tabled(rename = "PHONE")]
    pub phone_number: String,

    /// Role (`--` when the backend omits it)
    #[tabled(rename = "ROLE")]
    pub role: String,
}

impl From<Member> for MemberDisplay {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            name: member.name,
            email: member.email,
            phone_number: member.phone_number,
            role: member
                .role
                .map(|r| r.to_string())
                .unwrap_or_else(|| "--".to_string()),
        }
    }
}

impl From<&Member> for MemberDisplay {
    fn from(member: &Member) -> Self {
        MemberDisplay::from(member.clone())
    }
}

/// Render a single member as labelled lines
pub fn format_member_pretty(member: &Member) -> String {
    let role = member
        .role
        .map(|r| r.to_string())
        .unwrap_or_else(|| "--".to_string());

    [
        format!("{}", member.name.bold()),
        format!("  {:<8}{}", "ID", member.id.dimmed()),
        format!("  {:<8}{}", "Email", member.email),
        format!("  {:<8}{}", "Phone", member.phone_number),
        format!("  {:<8}{}", "Role", role),
    ]
    .join("\n")
}
