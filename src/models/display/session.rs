//! Session status display model

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::session::{AuthState, Role};

/// Session summary for `memberctl status`
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    /// Config file holding the token
    pub config_path: String,

    /// Backend base URL in effect
    pub api_host: String,

    pub authenticated: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionStatus {
    /// Summarize a resolved auth state
    pub fn new(config_path: String, api_host: String, state: &AuthState) -> Self {
        let session = state.session();
        Self {
            config_path,
            api_host,
            authenticated: state.is_authenticated(),
            subject: session.map(|s| s.claims().sub.clone()),
            role: session.map(|s| s.role()),
            expires_at: session.and_then(|s| s.claims().expires_at()),
        }
    }
}
