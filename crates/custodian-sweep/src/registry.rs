//! Watched-path registry with atomic snapshot replacement
//!
//! The registry is the only state shared between the scan tick and the
//! remove tick. Writers install a whole new snapshot; readers clone an
//! `Arc` and keep using it for the duration of their pass, so an in-flight
//! reload can never tear the view a sweep is working from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

const SECS_PER_DAY: u64 = 86_400;

/// Immutable, point-in-time view of the watched paths and schedule.
///
/// Raw values keep the units of the configuration file (days, seconds,
/// milliseconds); accessor methods convert to [`Duration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySnapshot {
    retention_days: HashMap<PathBuf, u64>,
    scan_interval_secs: u64,
    remove_interval_ms: u64,
}

impl RegistrySnapshot {
    /// Build a snapshot from already-validated values.
    pub fn new(
        retention_days: HashMap<PathBuf, u64>,
        scan_interval_secs: u64,
        remove_interval_ms: u64,
    ) -> Self {
        Self {
            retention_days,
            scan_interval_secs,
            remove_interval_ms,
        }
    }

    /// Retention age for a watched path, if it is registered.
    pub fn retention(&self, path: &Path) -> Option<Duration> {
        self.retention_days
            .get(path)
            .map(|days| Duration::from_secs(days.saturating_mul(SECS_PER_DAY)))
    }

    /// Iterate over the watched paths and their retention ages.
    pub fn watched(&self) -> impl Iterator<Item = (&Path, Duration)> {
        self.retention_days
            .iter()
            .map(|(path, days)| (path.as_path(), Duration::from_secs(days.saturating_mul(SECS_PER_DAY))))
    }

    /// Number of watched paths.
    pub fn len(&self) -> usize {
        self.retention_days.len()
    }

    /// Whether the snapshot watches no paths.
    pub fn is_empty(&self) -> bool {
        self.retention_days.is_empty()
    }

    /// Period of the configuration rescan.
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }

    /// Period of the removal pass.
    pub fn remove_interval(&self) -> Duration {
        Duration::from_millis(self.remove_interval_ms)
    }
}

/// Owner of the current [`RegistrySnapshot`].
///
/// A registry always holds a valid snapshot; there is no empty state a
/// reader can observe. [`install`](Self::install) swaps the whole snapshot
/// at once and is only ever reached with a snapshot that passed
/// validation, which makes reloads all-or-nothing.
#[derive(Debug)]
pub struct PathRegistry {
    current: RwLock<Arc<RegistrySnapshot>>,
}

impl PathRegistry {
    /// Create a registry from the initial (validated) snapshot.
    pub fn new(initial: RegistrySnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// Replace the current snapshot.
    pub fn install(&self, snapshot: RegistrySnapshot) {
        let mut current = self.current.write().expect("registry lock poisoned");
        *current = Arc::new(snapshot);
    }

    /// Cheap handle to the current snapshot.
    ///
    /// Safe to call concurrently with [`install`](Self::install); the
    /// returned view is unaffected by later reloads.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.current.read().expect("registry lock poisoned").clone()
    }
}
