//! Staged diff acquisition and shortstat parsing.

pub mod staged;
pub mod stats;

pub use staged::{GitCli, StagedChanges};
pub use stats::DiffStats;
