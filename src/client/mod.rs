//! Member registry API client

pub mod api;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod registry;

pub use api::{AuthApi, MemberApi};
#[cfg(test)]
pub use mock::MockMemberClient;
pub use registry::RegistryClient;
