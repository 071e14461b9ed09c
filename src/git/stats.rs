//! Parsing of `git diff --shortstat` summaries.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::StatsError;

// Each clause is matched on its own: git omits the insertions clause when
// nothing was inserted, and likewise for deletions.
static FILES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S+)\s+files?\s+changed").expect("Invalid regex"));
static INSERTIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S+)\s+insertions?\(\+\)").expect("Invalid regex"));
static DELETIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S+)\s+deletions?\(-\)").expect("Invalid regex"));

/// Change counts of a staged change set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub files_changed: u64,
    pub insertions: u64,
    pub deletions: u64,
}

impl DiffStats {
    /// Parse a shortstat line such as
    /// `3 files changed, 12 insertions(+), 8 deletions(-)`.
    ///
    /// Missing clauses count as zero. A clause whose count is not a
    /// non-negative integer is an error.
    pub fn parse(summary: &str) -> Result<Self, StatsError> {
        Ok(Self {
            files_changed: extract_count(&FILES_RE, summary, "files changed")?,
            insertions: extract_count(&INSERTIONS_RE, summary, "insertions")?,
            deletions: extract_count(&DELETIONS_RE, summary, "deletions")?,
        })
    }

    /// Insertions plus deletions; the file count is informational only.
    pub fn total_changes(&self) -> u64 {
        self.insertions.saturating_add(self.deletions)
    }
}

fn extract_count(re: &Regex, summary: &str, clause: &'static str) -> Result<u64, StatsError> {
    let Some(caps) = re.captures(summary) else {
        return Ok(0);
    };
    let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    raw.parse::<u64>().map_err(|source| StatsError::MalformedCount {
        clause,
        value: raw.to_string(),
        source,
    })
}
