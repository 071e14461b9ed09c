//! Detection of the `prepare-commit-msg` hook context.
//!
//! The pre-commit framework passes git's commit source through
//! `PRE_COMMIT_COMMIT_MSG_SOURCE`; a direct git hook gets it as the second
//! positional argument. Git only provides a source when a message already
//! exists (`-m`, `-F`, a template, a merge, a squash or an amend), in which
//! case there is nothing to generate.

use std::env;

/// Git's commit source as forwarded by the hook runner.
pub const COMMIT_SOURCE_ENV_VAR: &str = "PRE_COMMIT_COMMIT_MSG_SOURCE";

/// How the process was invoked with respect to git hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookContext {
    pub commit_source: Option<String>,
}

impl HookContext {
    /// Read the commit source forwarded by the hook runner.
    pub fn from_env() -> Self {
        Self::new(env::var(COMMIT_SOURCE_ENV_VAR).ok())
    }

    pub fn new(commit_source: Option<String>) -> Self {
        Self {
            commit_source: commit_source.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Prefer a source given on the command line (direct hook install).
    pub fn with_cli_source(mut self, source: Option<String>) -> Self {
        if let Some(source) = source.filter(|s| !s.trim().is_empty()) {
            self.commit_source = Some(source);
        }
        self
    }

    /// A non-empty commit source means git already has a message.
    pub fn should_skip(&self) -> bool {
        self.commit_source.is_some()
    }
}
