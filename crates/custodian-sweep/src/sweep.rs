//! The removal pass
//!
//! One sweep walks every watched path in a registry snapshot, evaluates
//! each direct child against that path's own retention age, and removes
//! the expired ones. The snapshot is used for the whole pass, so a
//! configuration reload landing mid-sweep never mixes retention ages.

use crate::registry::RegistrySnapshot;
use crate::remover;
use crate::report::SweepReport;
use crate::scanner;
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Executes removal passes over registry snapshots.
///
/// # Examples
///
/// ```no_run
/// use custodian_sweep::{ConfigDocument, Sweeper};
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let snapshot = ConfigDocument::load(Path::new("custodian.json"))?.validate()?;
/// let sweeper = Sweeper::new(false);
///
/// let report = sweeper.sweep(&snapshot);
/// println!("removed {} entries", report.removed);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Sweeper {
    dry_run: bool,
}

impl Sweeper {
    /// Create a sweeper. With `dry_run` set, eligible entries are logged
    /// and counted but nothing is deleted.
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Run one removal pass over the given snapshot.
    ///
    /// Best-effort throughout: an unreadable watched path is skipped with
    /// a warning, a failed removal is recorded per candidate, and in both
    /// cases the pass continues with whatever remains.
    pub fn sweep(&self, snapshot: &RegistrySnapshot) -> SweepReport {
        let now = SystemTime::now();
        let mut report = SweepReport::default();

        for (root, retention) in snapshot.watched() {
            let candidates = match scanner::scan_path(root, retention, now) {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!(path = %root.display(), error = %e, "watched path unreadable, skipping");
                    report.skipped_paths += 1;
                    continue;
                }
            };

            for candidate in candidates {
                report.evaluated += 1;
                if !candidate.is_expired() {
                    debug!(
                        path = %candidate.path.display(),
                        age_secs = candidate.age.as_secs(),
                        "within retention"
                    );
                    continue;
                }

                if self.dry_run {
                    info!(
                        path = %candidate.path.display(),
                        age_secs = candidate.age.as_secs(),
                        "dry run: would remove"
                    );
                    report.would_remove += 1;
                    continue;
                }

                match remover::remove(&candidate) {
                    Ok(()) => {
                        info!(
                            path = %candidate.path.display(),
                            age_secs = candidate.age.as_secs(),
                            "removed expired entry"
                        );
                        report.removed += 1;
                    }
                    Err(e) => {
                        warn!(path = %candidate.path.display(), error = %e, "removal failed");
                        report.record_failure(candidate.path, e.to_string());
                    }
                }
            }
        }

        report
    }
}
