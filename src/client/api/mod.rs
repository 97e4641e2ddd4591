//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - Public key retrieval, login and registration
//! - [`MemberApi`] - Member CRUD
//!
//! The [`RegistryApi`](super::RegistryApi) super-trait combines both.

mod auth;
mod members;

pub use auth::AuthApi;
pub use members::MemberApi;
