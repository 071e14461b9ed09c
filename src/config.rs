//! Configuration: defaults, then `.auto-commit-msg.toml`, then environment.
//!
//! ```toml
//! trace = false
//!
//! [provider]
//! base_url = "https://generativelanguage.googleapis.com/v1beta/openai"
//! api_key = "GEMINI_API_KEY"
//!
//! [diff]
//! short_model = "gemini-2.5-flash-lite"
//! long_model = "gemini-2.5-flash"
//! threshold = 200
//! ```

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ConfigError;

/// File name looked up in the current directory, then in the home directory.
pub const CONFIG_FILE_NAME: &str = ".auto-commit-msg.toml";

/// Prefix of the environment variables that override file settings.
pub const ENV_PREFIX: &str = "AUTO_COMMIT_MSG_";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_SHORT_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_LONG_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_THRESHOLD: u64 = 200;

/// Effective configuration, built once at startup and then read-only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Append a latency/version trace block to the generated message.
    pub trace: bool,
    pub provider: ProviderConfig,
    pub diff: DiffConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API root; `/chat/completions` is appended.
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key: String,
    /// Value of that variable, resolved once by [`Config::load`].
    #[serde(skip)]
    pub secret: Secret,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY_VAR.to_string(),
            secret: Secret::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Model used when the change count is below `threshold`.
    pub short_model: String,
    pub long_model: String,
    /// Insertions plus deletions at which the long model takes over.
    pub threshold: u64,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            short_model: DEFAULT_SHORT_MODEL.to_string(),
            long_model: DEFAULT_LONG_MODEL.to_string(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// An API key that never shows up in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Secret(<empty>)")
        } else {
            f.write_str("Secret(<redacted>)")
        }
    }
}

impl Config {
    /// Load the effective configuration.
    ///
    /// `explicit` must exist when given. Otherwise the first of
    /// `./.auto-commit-msg.toml` and `~/.auto-commit-msg.toml` is used, and no
    /// file at all means defaults. Environment overrides are applied last and
    /// the API key is resolved from the variable the config names.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit.map(Path::to_path_buf).or_else(discover_config_file) {
            Some(path) => Self::from_file(&path)?,
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides()?;
        config.resolve_secret();
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Using config file {}", path.display());
        Self::parse(&content, path)
    }

    /// Parse TOML text; `origin` is only used in error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::ParseFailed {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Apply `AUTO_COMMIT_MSG_*` variables. Empty values are ignored.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = env_override("TRACE") {
            self.trace = parse_bool(&value).ok_or_else(|| invalid("TRACE", &value))?;
        }
        if let Some(value) = env_override("BASE_URL") {
            self.provider.base_url = value;
        }
        if let Some(value) = env_override("API_KEY") {
            self.provider.api_key = value;
        }
        if let Some(value) = env_override("SHORT_MODEL") {
            self.diff.short_model = value;
        }
        if let Some(value) = env_override("LONG_MODEL") {
            self.diff.long_model = value;
        }
        if let Some(value) = env_override("THRESHOLD") {
            self.diff.threshold = value
                .trim()
                .parse()
                .map_err(|_| invalid("THRESHOLD", &value))?;
        }
        Ok(())
    }

    /// Read the API key from the variable named by `provider.api_key`.
    ///
    /// A missing variable resolves to an empty secret; the workflow rejects
    /// it before any request is made.
    pub fn resolve_secret(&mut self) {
        let var = self.provider.api_key.as_str();
        self.provider.secret = match env::var(var) {
            Ok(value) => Secret::new(value),
            Err(_) if var.is_empty() => Secret::default(),
            Err(_) => {
                warn!("Environment variable {} is not set", var);
                Secret::default()
            }
        };
    }
}

fn discover_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    dirs::home_dir()
        .map(|home| home.join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

fn env_override(key: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}{key}"))
        .ok()
        .filter(|v| !v.is_empty())
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnvOverride {
        var: format!("{ENV_PREFIX}{key}"),
        value: value.to_string(),
    }
}

/// Parse a boolean-like string (`1`, `true`, `yes`, `on` and their negations).
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
