//! Member registry API data models

mod auth;
mod member;

pub use auth::{AuthResponse, LoginRequest, PublicKeyResponse, RegisterRequest};
pub use member::{Member, MemberInput, RoleUpdate};
