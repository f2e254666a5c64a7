//! Watched-path scanner
//!
//! Enumerates the direct children of a watched path as removal candidates.
//! There is no recursive descent: a subdirectory is a single removable
//! unit, aged by its own modification time.

use crate::age;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::debug;

/// A filesystem entry discovered under a watched path during a scan.
///
/// Transient: candidates exist only for the duration of one removal pass.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Full path of the entry
    pub path: PathBuf,
    /// Whether the entry is a directory (removed recursively)
    pub is_dir: bool,
    /// Time since the entry was last modified
    pub age: Duration,
    /// Retention age of the watched path the entry was found under
    pub retention: Duration,
}

impl Candidate {
    /// Whether this candidate has outlived its retention.
    pub fn is_expired(&self) -> bool {
        age::is_expired(self.age, self.retention)
    }
}

/// Enumerate the direct children of `root` as candidates.
///
/// Entries that vanish or cannot be stat'ed mid-scan are skipped silently;
/// they will be picked up by a later pass if they still exist. An
/// unreadable `root` itself is the caller's problem: the error is returned
/// so the sweep can count the skip and move on to the next watched path.
pub fn scan_path(
    root: &Path,
    retention: Duration,
    now: SystemTime,
) -> Result<Vec<Candidate>, io::Error> {
    let entries = std::fs::read_dir(root)?;
    let mut candidates = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(root = %root.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        // Gone or unreadable between listing and stat: skip, not an error.
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!(path = %entry.path().display(), error = %e, "skipping entry without metadata");
                continue;
            }
        };
        let modified = match metadata.modified() {
            Ok(modified) => modified,
            Err(e) => {
                debug!(path = %entry.path().display(), error = %e, "skipping entry without mtime");
                continue;
            }
        };

        candidates.push(Candidate {
            path: entry.path(),
            is_dir: metadata.is_dir(),
            age: age::age_of(modified, now),
            retention,
        });
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::FileTime;
    use std::fs;
    use tempfile::TempDir;

    fn backdate(path: &Path, secs_ago: u64) {
        let then = SystemTime::now() - Duration::from_secs(secs_ago);
        filetime::set_file_mtime(path, FileTime::from_system_time(then)).unwrap();
    }

    #[test]
    fn test_scan_lists_direct_children_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("old.log"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/nested.log"), b"x").unwrap();

        let candidates =
            scan_path(dir.path(), Duration::from_secs(60), SystemTime::now()).unwrap();

        let mut names: Vec<_> = candidates
            .iter()
            .map(|c| c.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["old.log", "sub"]);

        let sub = candidates.iter().find(|c| c.is_dir).unwrap();
        assert!(sub.path.ends_with("sub"));
    }

    #[test]
    fn test_scan_computes_ages() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("stale.dat");
        fs::write(&file, b"x").unwrap();
        backdate(&file, 2 * 86_400);

        let candidates =
            scan_path(dir.path(), Duration::from_secs(86_400), SystemTime::now()).unwrap();

        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].age >= Duration::from_secs(2 * 86_400));
        assert!(candidates[0].is_expired());
    }

    #[test]
    fn test_scan_vanished_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("vanished");

        let result = scan_path(&gone, Duration::ZERO, SystemTime::now());

        assert!(result.is_err());
    }

    #[test]
    fn test_fresh_entry_not_expired() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("fresh.log"), b"x").unwrap();

        let candidates =
            scan_path(dir.path(), Duration::from_secs(86_400), SystemTime::now()).unwrap();

        assert_eq!(candidates.len(), 1);
        assert!(!candidates[0].is_expired());
    }
}
