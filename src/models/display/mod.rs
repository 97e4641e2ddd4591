//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod member;
mod session;

pub use member::{MemberDisplay, format_member_pretty};
pub use session::SessionStatus;
