//! Persisted token storage

use crate::config::Config;
use crate::error::Result;

/// Persistent slot holding the raw session token
pub trait TokenStorage {
    /// Read the stored token, if any
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored token
    fn store(&mut self, token: &str) -> Result<()>;

    /// Remove the stored token. Removing an absent token is not an error.
    fn remove(&mut self) -> Result<()>;
}

/// Token storage backed by the `token` key of the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigTokenStorage {
    path: Option<String>,
}

impl ConfigTokenStorage {
    /// Storage in the config file at `path` (default location when `None`)
    pub fn new(path: Option<&str>) -> Self {
        Self {
            path: path.map(str::to_string),
        }
    }
}

impl TokenStorage for ConfigTokenStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(Config::load_or_default(self.path.as_deref())?.token)
    }

    fn store(&mut self, token: &str) -> Result<()> {
        let mut config = Config::load_or_default(self.path.as_deref())?;
        config.token = Some(token.to_string());
        config.save_at(self.path.as_deref())
    }

    fn remove(&mut self) -> Result<()> {
        if !Config::resolve_path(self.path.as_deref())?.exists() {
            return Ok(());
        }

        // Rewrite even when the slot read as empty, so a malformed value is
        // dropped too
        let mut config = Config::load_at(self.path.as_deref())?;
        config.token = None;
        config.save_at(self.path.as_deref())
    }
}

/// In-memory token storage for tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStorage {
    pub token: Option<String>,
    pub loads: std::cell::Cell<usize>,
}

#[cfg(test)]
impl MemoryTokenStorage {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            loads: Default::default(),
        }
    }
}

#[cfg(test)]
impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<String>> {
        self.loads.set(self.loads.get() + 1);
        Ok(self.token.clone())
    }

    fn store(&mut self, token: &str) -> Result<()> {
        self.token = Some(token.to_string());
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        self.token = None;
        Ok(())
    }
}
