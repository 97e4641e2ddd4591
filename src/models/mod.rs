//! Display models for CLI output
//!
//! Converts API response types and session state into CLI-friendly formats.

pub mod display;

pub use display::{MemberDisplay, SessionStatus, format_member_pretty};
