//! Command execution context
//!
//! Owns the per-process session and an API client carrying its token, so
//! command handlers never reach for global state.

use std::path::PathBuf;

use log::{debug, warn};

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::RegistryClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::{ConfigTokenStorage, Session, SessionManager};

/// Context for command execution containing session, client, and runtime options.
pub struct CommandContext {
    /// Session restored from the config file at start-up
    pub session: SessionManager<ConfigTokenStorage>,
    /// API client; carries the bearer token when a session is live
    pub client: RegistryClient,
    /// Output format preference
    pub format: OutputFormat,
    /// Backend base URL in effect
    pub api_host: String,
    /// Config file in effect
    pub config_path: PathBuf,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Restores the session from persisted storage (purging an expired
    /// token) and builds the API client. Nothing is sent over the network.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_or_default(opts.config_ref()).unwrap_or_else(|e| {
            warn!("Ignoring unreadable config {}: {}", config_path.display(), e);
            Config::default()
        });
        let api_host = config.api_host(opts.api_host_ref());

        let mut session = SessionManager::start(ConfigTokenStorage::new(opts.config_ref()));
        let token = session.session().map(|s| s.token().to_string());
        debug!(
            "Session restored ({})",
            if token.is_some() { "authenticated" } else { "anonymous" }
        );

        let client = RegistryClient::new(&api_host)?.with_token(token);
        debug!("Using API host {}", client.base_url());

        Ok(Self {
            session,
            client,
            format: opts.resolve_format(config.preferences.format.as_deref()),
            api_host,
            config_path,
        })
    }

    /// The live session, or an error telling the user to log in
    pub fn require_session(&mut self) -> Result<&Session> {
        self.session.require_session()
    }

    /// The live session if it is an administrator's
    pub fn require_admin(&mut self) -> Result<&Session> {
        self.session.require_admin()
    }
}
