//! auto-commit-msg - writes commit messages from the staged diff.
//!
//! # Overview
//!
//! auto-commit-msg reads `git diff --cached`, picks a model by the size of the
//! change, asks an OpenAI-compatible chat completion endpoint for a
//! conventional commit message and writes it to the commit message file (or
//! stdout). It is meant to run as a `prepare-commit-msg` hook.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod hook;
pub mod llm;

// Re-export commonly used types
pub use commit::{CommitMessageWorkflow, Destination, Outcome};
pub use config::Config;
pub use error::{ChatError, ConfigError, ErrorKind, GitError, StatsError, WorkflowError};
pub use git::{DiffStats, GitCli, StagedChanges};
pub use hook::HookContext;
pub use llm::{ChatClient, ChatCompletionResult, ChatCompletions, ChatMessage, Role};
