//! Error types for auto-commit-msg modules using thiserror.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading and validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value '{value}' for environment variable {var}")]
    InvalidEnvOverride { var: String, value: String },

    #[error("Required setting '{0}' is missing or empty")]
    MissingSetting(String),

    #[error("Model name for '{which}' is empty; set diff.{which} in the config file")]
    EmptyModel { which: &'static str },
}

/// Errors from invoking the git command line.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found in PATH")]
    NotInstalled,

    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git {args} exited with code {code}: {stderr}")]
    NonZeroExit {
        args: String,
        code: i32,
        stderr: String,
    },

    #[error("git {0} produced output that is not valid UTF-8")]
    InvalidUtf8(String),
}

/// Errors from parsing `git diff --shortstat` output.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Malformed {clause} count '{value}' in diff summary: {source}")]
    MalformedCount {
        clause: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Errors from the chat completion endpoint.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Request to chat completion endpoint failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Chat completion endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Chat completion response has an unexpected shape: {source}. Body: {body}")]
    MalformedBody {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

/// Coarse failure classes surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    EmptyInput,
    Transport,
    MalformedResponse,
    Parse,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration error",
            ErrorKind::EmptyInput => "empty input",
            ErrorKind::Transport => "transport error",
            ErrorKind::MalformedResponse => "malformed response",
            ErrorKind::Parse => "parse error",
            ErrorKind::Io => "I/O error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from the commit message workflow.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No staged changes found. Stage files with `git add` first.")]
    NothingStaged,

    #[error("Failed to read staged changes: {0}")]
    Git(#[from] GitError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error("Chat completion endpoint returned an unexpected empty response (no choices)")]
    EmptyResponse,

    #[error("Failed to serialize trace block: {0}")]
    TraceFailed(#[source] serde_json::Error),

    #[error("Failed to write commit message to {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write commit message to stdout: {0}")]
    StdoutFailed(#[source] std::io::Error),
}

impl WorkflowError {
    /// Classify the error for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkflowError::Config(_) => ErrorKind::Configuration,
            WorkflowError::NothingStaged => ErrorKind::EmptyInput,
            WorkflowError::Git(_) => ErrorKind::Io,
            WorkflowError::Stats(_) => ErrorKind::Parse,
            WorkflowError::Chat(ChatError::MalformedBody { .. }) => ErrorKind::MalformedResponse,
            WorkflowError::Chat(_) => ErrorKind::Transport,
            WorkflowError::EmptyResponse => ErrorKind::MalformedResponse,
            WorkflowError::TraceFailed(_) => ErrorKind::Io,
            WorkflowError::WriteFailed { .. } | WorkflowError::StdoutFailed(_) => ErrorKind::Io,
        }
    }
}
