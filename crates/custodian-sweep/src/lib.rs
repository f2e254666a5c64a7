//! Custodian Sweep
//!
//! Core of the custodian file-retention supervisor: given a set of watched
//! filesystem paths, each with its own retention age, periodically scan
//! those paths and remove direct children whose modification age exceeds
//! the threshold, on an independent removal schedule.
//!
//! # Overview
//!
//! The supervisor is built from small pieces:
//! - **Configuration**: a JSON document of watched paths and schedule
//!   intervals, loaded and validated as a unit ([`ConfigDocument`])
//! - **Registry**: the current watched-path set behind an atomic snapshot
//!   swap, so reloads are all-or-nothing ([`PathRegistry`])
//! - **Sweep**: one removal pass over a snapshot, best-effort per path and
//!   per candidate ([`Sweeper`])
//! - **Worker**: two independent periodic schedules, scan (reload config)
//!   and remove (sweep), on one cooperative loop ([`SupervisorWorker`])
//!
//! Deletion is irreversible; there is no trash bin and no undo. Entries
//! are aged by their own modification time, and a directory is treated as
//! a single removable unit.
//!
//! # Usage
//!
//! ## One-shot sweep
//!
//! ```no_run
//! use custodian_sweep::{ConfigDocument, Sweeper};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let snapshot = ConfigDocument::load(Path::new("custodian.json"))?.validate()?;
//! let report = Sweeper::new(false).sweep(&snapshot);
//! println!("removed {} of {} evaluated", report.removed, report.evaluated);
//! # Ok(())
//! # }
//! ```
//!
//! ## Supervised schedules
//!
//! ```no_run
//! use custodian_sweep::SupervisorWorker;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut worker = SupervisorWorker::from_config_file("custodian.json", false)?;
//!
//!     // Scan and remove ticks run until Ctrl+C.
//!     worker.run().await;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
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
//! Per-path `interval` is the retention age in days (0 means every child
//! is eligible on the next pass), `remove_interval` is the removal period
//! in milliseconds, `scan_interval` the configuration rescan period in
//! seconds. A reload that fails validation is rejected wholesale and the
//! previous configuration keeps running.

#![warn(missing_docs)]

mod age;
mod config;
mod error;
mod registry;
mod remover;
mod report;
mod scanner;
mod sweep;
mod worker;

pub use config::{ConfigDocument, PathEntry};
pub use error::{ConfigError, SupervisorError};
pub use registry::{PathRegistry, RegistrySnapshot};
pub use report::{SweepMetrics, SweepReport};
pub use scanner::Candidate;
pub use sweep::Sweeper;
pub use worker::SupervisorWorker;
