//! Final write of the generated message.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::WorkflowError;

/// Where the commit message goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Overwrite this file (git's `COMMIT_EDITMSG` when run as a hook).
    File(PathBuf),
    Stdout,
}

impl Destination {
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        path.map_or(Destination::Stdout, Destination::File)
    }

    /// Write `message`, replacing any previous file contents.
    pub fn write(&self, message: &str) -> Result<(), WorkflowError> {
        match self {
            Destination::File(path) => write_atomic(path, message),
            Destination::Stdout => print_to(&mut io::stdout().lock(), message),
        }
    }
}

/// Write through a temp file in the same directory, then rename over `path`,
/// so a failure never leaves a truncated message behind.
///
/// A symlinked destination is written through to its target, and an existing
/// file keeps its permissions.
fn write_atomic(path: &Path, message: &str) -> Result<(), WorkflowError> {
    let write_failed = |source: io::Error| WorkflowError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let existing = fs::metadata(&target).ok();

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(message.as_bytes()).map_err(write_failed)?;
    tmp.flush().map_err(write_failed)?;
    if let Some(meta) = existing {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(write_failed)?;
    }
    tmp.persist(&target).map_err(|e| write_failed(e.error))?;
    Ok(())
}

fn print_to(out: &mut impl Write, message: &str) -> Result<(), WorkflowError> {
    writeln!(out, "{message}").map_err(WorkflowError::StdoutFailed)?;
    out.flush().map_err(WorkflowError::StdoutFailed)
}
