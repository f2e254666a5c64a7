//! Candidate removal
//!
//! Deletion is irreversible and best-effort: one failed removal never
//! aborts the rest of the batch.

use crate::scanner::Candidate;
use std::fs;
use std::io;

/// Delete a single candidate.
///
/// Files are unlinked; directories are removed recursively. An entry that
/// is already gone (deleted externally between scan and remove) counts as
/// success, so removal is idempotent against races with other actors. Any
/// other failure is returned for the sweep report.
pub fn remove(candidate: &Candidate) -> Result<(), io::Error> {
    let result = if candidate.is_dir {
        fs::remove_dir_all(&candidate.path)
    } else {
        fs::remove_file(&candidate.path)
    };

    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
