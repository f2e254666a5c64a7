//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Custodian - file-retention supervisor.
///
/// Watches a set of filesystem paths and removes entries whose
/// modification age exceeds the per-path retention, on a periodic
/// schedule read from a JSON configuration file.
#[derive(Debug, Parser)]
#[command(name = "custodian")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "CUSTODIAN_CONFIG")]
    pub config: PathBuf,

    /// Run a single removal pass and exit instead of scheduling
    #[arg(long)]
    pub once: bool,

    /// Log eligible entries without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log filter when RUST_LOG is not set (e.g. "info", "custodian_sweep=debug")
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::parse_from(["custodian", "--config", "/etc/custodian.json"]);
        assert_eq!(cli.config, PathBuf::from("/etc/custodian.json"));
        assert!(!cli.once);
        assert!(!cli.dry_run);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "custodian",
            "--config",
            "c.json",
            "--once",
            "--dry-run",
            "--log-level",
            "debug",
        ]);
        assert!(cli.once);
        assert!(cli.dry_run);
        assert_eq!(cli.log_level, "debug");
    }
}
