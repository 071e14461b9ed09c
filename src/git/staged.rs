//! Staged change acquisition through the system `git` binary.
//!
//! Shelling out (rather than linking libgit2) inherits the user's git config,
//! including diff drivers and `core.quotePath`, so the model sees the same diff
//! the user would.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

/// Source of the staged diff and its summary.
///
/// This abstraction allows mocking git in tests.
#[cfg_attr(test, mockall::automock)]
pub trait StagedChanges {
    /// Full unified diff of the index against HEAD.
    fn diff(&self) -> Result<String, GitError>;

    /// The `--shortstat` summary of the same change set.
    fn shortstat(&self) -> Result<String, GitError>;
}

/// Runs `git diff --cached` in a working directory.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Use the process's current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git inside `workdir` instead of the current directory.
    pub fn in_dir(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(workdir.into()),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let git = which::which("git").map_err(|_| GitError::NotInstalled)?;

        let mut command = Command::new(git);
        command.args(args);
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        debug!("Running git {}", args.join(" "));
        let output = command.output().map_err(GitError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::NonZeroExit {
                args: args.join(" "),
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        String::from_utf8(output.stdout).map_err(|_| GitError::InvalidUtf8(args.join(" ")))
    }
}

impl StagedChanges for GitCli {
    fn diff(&self) -> Result<String, GitError> {
        self.run(&["diff", "--cached"])
    }

    fn shortstat(&self) -> Result<String, GitError> {
        self.run(&["diff", "--cached", "--shortstat"])
    }
}
