//! Custodian - command-line entry point for the file-retention supervisor.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use custodian_sweep::{ConfigDocument, Sweeper, SupervisorWorker};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log to stderr so reports stay pipeable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    if cli.once {
        let snapshot = ConfigDocument::load(&cli.config)
            .context("loading configuration")?
            .validate()
            .context("validating configuration")?;

        let report = Sweeper::new(cli.dry_run).sweep(&snapshot);
        info!(
            evaluated = report.evaluated,
            removed = report.removed,
            would_remove = report.would_remove,
            failed = report.failed,
            skipped_paths = report.skipped_paths,
            "single pass completed"
        );
        return Ok(());
    }

    let mut worker = SupervisorWorker::from_config_file(&cli.config, cli.dry_run)
        .context("starting supervisor")?;
    worker.run().await;

    Ok(())
}
