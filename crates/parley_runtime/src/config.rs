//! Shell configuration.
//!
//! Configuration is read from TOML. Every field is optional:
//!
//! ```toml
//! prompt = "shop> "
//! history_size = 500
//! banner = false
//! invoker = "Alice"
//! kind = "player"
//! permissions = ["shop.admin"]
//! players = ["Alice", "Bob"]
//! log_level = "debug"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use parley_foundation::{Identity, InvokerKind, WILDCARD_PERMISSION};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file that was read.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The file is not valid configuration.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for an interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Prompt shown before each line.
    pub prompt: String,
    /// Maximum number of history entries.
    pub history_size: usize,
    /// Whether to print the welcome banner.
    pub banner: bool,
    /// Name of the invoker running commands.
    pub invoker: String,
    /// Kind of the invoker running commands.
    pub kind: InvokerKind,
    /// Permissions granted to the invoker.
    pub permissions: Vec<String>,
    /// Names of the players considered online.
    pub players: Vec<String>,
    /// Default log filter, overridden by `RUST_LOG`.
    pub log_level: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            history_size: 1000,
            banner: true,
            invoker: "CONSOLE".to_string(),
            kind: InvokerKind::Console,
            permissions: Vec::new(),
            players: vec!["Alice".to_string(), "Bob".to_string(), "Carol".to_string()],
            log_level: "warn".to_string(),
        }
    }
}

impl ShellConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Sets the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Sets the history size.
    #[must_use]
    pub const fn with_history_size(mut self, history_size: usize) -> Self {
        self.history_size = history_size;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.banner = false;
        self
    }

    /// Runs commands as the named invoker.
    #[must_use]
    pub fn with_invoker(mut self, name: impl Into<String>, kind: InvokerKind) -> Self {
        self.invoker = name.into();
        self.kind = kind;
        self
    }

    /// Grants a permission to the invoker.
    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    /// Sets the online players.
    #[must_use]
    pub fn with_players<I, S>(mut self, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.players = players.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the default log filter.
    #[must_use]
    pub fn with_log_level(mut self, log_level: impl Into<String>) -> Self {
        self.log_level = log_level.into();
        self
    }

    /// Builds the invoker described by this configuration. The console holds
    /// every permission.
    #[must_use]
    pub fn identity(&self) -> Identity {
        let identity = Identity::new(self.invoker.clone(), self.kind)
            .with_permissions(self.permissions.iter().cloned());
        if self.kind == InvokerKind::Console {
            identity.with_permission(WILDCARD_PERMISSION)
        } else {
            identity
        }
    }
}
