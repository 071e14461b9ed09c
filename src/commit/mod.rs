//! AI-generated commit messages from the staged diff.

pub mod output;
pub mod prompt;
pub mod trace;
pub mod workflow;

pub use output::Destination;
pub use prompt::{COMMIT_INSTRUCTION, build_commit_prompt};
pub use trace::{Stopwatch, TRACE_DELIMITER, TraceRecord};
pub use workflow::{CommitMessageWorkflow, GeneratedMessage, Outcome};
