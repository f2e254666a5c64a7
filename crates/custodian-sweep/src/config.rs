//! Configuration document loading and validation
//!
//! The supervisor consumes a JSON file of watched paths and schedule
//! intervals:
//!
//! ```json
//! {
//!     "paths": [
//!         { "path": "/var/data/exports", "interval": 30 },
//!         { "path": "/var/data/tmp", "interval": 0 }
//!     ],
//!     "remove_interval": 60000,
//!     "scan_interval": 300
//! }
//! ```
//!
//! Per-path `interval` is a retention age in days, `remove_interval` is in
//! milliseconds, `scan_interval` in seconds. Validation (not
//! deserialization) reports which field is missing or invalid, so a reload
//! rejection names the offending field.

use crate::error::ConfigError;
use crate::registry::RegistrySnapshot;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw serde image of the configuration file.
///
/// Every field is optional so that a missing key surfaces as a
/// [`ConfigError::MissingField`] during [`validate`](Self::validate) rather
/// than an opaque parse error. Intervals are signed so a negative value can
/// be rejected by name.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigDocument {
    /// Watched path entries
    pub paths: Option<Vec<PathEntry>>,

    /// Period of the removal pass, in milliseconds
    pub remove_interval: Option<i64>,

    /// Period of the configuration rescan, in seconds
    pub scan_interval: Option<i64>,
}

/// One entry of the `paths` array.
#[derive(Debug, Clone, Deserialize)]
pub struct PathEntry {
    /// Filesystem path to watch
    pub path: Option<PathBuf>,

    /// Retention age for direct children of this path, in days
    pub interval: Option<i64>,
}

impl ConfigDocument {
    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = serde_json::from_str(&contents)?;
        Ok(document)
    }

    /// Validate the document and build a registry snapshot from it.
    ///
    /// Enforces the full contract before anything is committed:
    /// all three top-level keys present, every entry carrying both `path`
    /// and `interval`, every referenced path existing on disk, and every
    /// interval non-negative. Duplicate paths resolve last-writer-wins.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`ConfigError`] naming the
    /// failing field or path.
    pub fn validate(&self) -> Result<RegistrySnapshot, ConfigError> {
        let entries = self
            .paths
            .as_ref()
            .ok_or(ConfigError::MissingField("paths"))?;
        let remove_interval = self
            .remove_interval
            .ok_or(ConfigError::MissingField("remove_interval"))?;
        let scan_interval = self
            .scan_interval
            .ok_or(ConfigError::MissingField("scan_interval"))?;

        let remove_interval_ms = non_negative(remove_interval, "remove_interval")?;
        let scan_interval_secs = non_negative(scan_interval, "scan_interval")?;

        let mut retention_days = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let path = entry
                .path
                .as_ref()
                .ok_or(ConfigError::MissingEntryField { index, field: "path" })?;
            let interval = entry
                .interval
                .ok_or(ConfigError::MissingEntryField { index, field: "interval" })?;

            if !path.exists() {
                return Err(ConfigError::PathNotFound(path.clone()));
            }
            let days = non_negative(interval, &format!("paths[{index}].interval"))?;

            retention_days.insert(path.clone(), days);
        }

        Ok(RegistrySnapshot::new(
            retention_days,
            scan_interval_secs,
            remove_interval_ms,
        ))
    }
}

fn non_negative(value: i64, field: &str) -> Result<u64, ConfigError> {
    u64::try_from(value).map_err(|_| ConfigError::NegativeInterval(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn parse(json: &str) -> ConfigDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_valid_document() {
        let dir = TempDir::new().unwrap();
        let json = format!(
            r#"{{
                "paths": [{{ "path": "{}", "interval": 7 }}],
                "remove_interval": 60000,
                "scan_interval": 300
            }}"#,
            dir.path().display()
        );

        let snapshot = parse(&json).validate().unwrap();

        assert_eq!(snapshot.retention(dir.path()), Some(Duration::from_secs(7 * 86_400)));
        assert_eq!(snapshot.scan_interval(), Duration::from_secs(300));
        assert_eq!(snapshot.remove_interval(), Duration::from_millis(60000));
    }

    #[test]
    fn test_missing_top_level_fields() {
        let err = parse(r#"{ "remove_interval": 1, "scan_interval": 1 }"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("paths")));

        let err = parse(r#"{ "paths": [], "scan_interval": 1 }"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("remove_interval")));

        let err = parse(r#"{ "paths": [], "remove_interval": 1 }"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("scan_interval")));
    }

    #[test]
    fn test_missing_entry_fields() {
        let dir = TempDir::new().unwrap();

        let json = format!(
            r#"{{
                "paths": [{{ "path": "{}", "interval": 1 }}, {{ "interval": 2 }}],
                "remove_interval": 1,
                "scan_interval": 1
            }}"#,
            dir.path().display()
        );
        let err = parse(&json).validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingEntryField { index: 1, field: "path" }
        ));

        let json = format!(
            r#"{{
                "paths": [{{ "path": "{}" }}],
                "remove_interval": 1,
                "scan_interval": 1
            }}"#,
            dir.path().display()
        );
        let err = parse(&json).validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingEntryField { index: 0, field: "interval" }
        ));
    }

    #[test]
    fn test_negative_intervals_rejected() {
        let dir = TempDir::new().unwrap();

        let err = parse(r#"{ "paths": [], "remove_interval": -1, "scan_interval": 1 }"#)
            .validate()
            .unwrap_err();
        match err {
            ConfigError::NegativeInterval(field) => assert_eq!(field, "remove_interval"),
            other => panic!("unexpected error: {other}"),
        }

        let json = format!(
            r#"{{
                "paths": [{{ "path": "{}", "interval": -3 }}],
                "remove_interval": 1,
                "scan_interval": 1
            }}"#,
            dir.path().display()
        );
        let err = parse(&json).validate().unwrap_err();
        match err {
            ConfigError::NegativeInterval(field) => assert_eq!(field, "paths[0].interval"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nonexistent_path_rejected() {
        let json = r#"{
            "paths": [{ "path": "/no/such/custodian/path", "interval": 1 }],
            "remove_interval": 1,
            "scan_interval": 1
        }"#;
        let err = parse(json).validate().unwrap_err();
        assert!(matches!(err, ConfigError::PathNotFound(_)));
    }

    #[test]
    fn test_duplicate_paths_last_writer_wins() {
        let dir = TempDir::new().unwrap();
        let json = format!(
            r#"{{
                "paths": [
                    {{ "path": "{0}", "interval": 5 }},
                    {{ "path": "{0}", "interval": 9 }}
                ],
                "remove_interval": 1,
                "scan_interval": 1
            }}"#,
            dir.path().display()
        );

        let snapshot = parse(&json).validate().unwrap();

        assert_eq!(snapshot.watched().count(), 1);
        assert_eq!(snapshot.retention(dir.path()), Some(Duration::from_secs(9 * 86_400)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigDocument::load(Path::new("/no/such/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.json");
        fs::write(&file, "{ not json").unwrap();

        let err = ConfigDocument::load(&file).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
