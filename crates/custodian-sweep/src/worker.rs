//! Background worker driving the scan and remove schedules

use crate::config::ConfigDocument;
use crate::error::SupervisorError;
use crate::registry::PathRegistry;
use crate::report::SweepMetrics;
use crate::sweep::Sweeper;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::time::{interval, interval_at, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// tokio panics on a zero interval; a zero configured period means
/// "as fast as possible" and is clamped to this floor.
const MIN_TICK: Duration = Duration::from_millis(1);

/// Supervisor worker running two independent periodic tasks.
///
/// The scan tick re-reads the configuration file and refreshes the
/// registry; the remove tick sweeps the current registry snapshot. Both
/// fire immediately at start and then on their own cadence. A single
/// cooperative loop means ticks of one kind never overlap, and a remove
/// tick keeps one snapshot for its whole duration even if a scan tick
/// would reload mid-pass.
///
/// # Examples
///
/// ```no_run
/// use custodian_sweep::SupervisorWorker;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut worker = SupervisorWorker::from_config_file("custodian.json", false)?;
///
///     // Run until Ctrl+C.
///     worker.run().await;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct SupervisorWorker {
    config_path: PathBuf,
    registry: PathRegistry,
    sweeper: Sweeper,
    metrics: SweepMetrics,
}

impl SupervisorWorker {
    /// Create a worker from the configuration file at `config_path`.
    ///
    /// The initial configuration must be valid: without one there is no
    /// registry to sweep and the scheduling loops must not start.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError::Startup`] when the file cannot be
    /// loaded or fails validation.
    pub fn from_config_file(
        config_path: impl Into<PathBuf>,
        dry_run: bool,
    ) -> Result<Self, SupervisorError> {
        let config_path = config_path.into();
        let snapshot = ConfigDocument::load(&config_path)?.validate()?;

        info!(
            config = %config_path.display(),
            paths = snapshot.len(),
            scan_interval = ?snapshot.scan_interval(),
            remove_interval = ?snapshot.remove_interval(),
            "supervisor configured"
        );

        Ok(Self {
            config_path,
            registry: PathRegistry::new(snapshot),
            sweeper: Sweeper::new(dry_run),
            metrics: SweepMetrics::new(),
        })
    }

    /// Get a reference to the cumulative metrics
    pub fn metrics(&self) -> &SweepMetrics {
        &self.metrics
    }

    /// Run both schedules until a shutdown signal (Ctrl+C) is received.
    ///
    /// The in-flight tick always runs to completion before the worker
    /// stops; the final metrics summary is logged on the way out.
    pub async fn run(&mut self) {
        let snapshot = self.registry.snapshot();
        let mut scan_period = snapshot.scan_interval();
        let mut remove_period = snapshot.remove_interval();
        let mut scan_tick = immediate_ticker(scan_period);
        let mut remove_tick = immediate_ticker(remove_period);

        info!("supervisor worker started");

        loop {
            tokio::select! {
                _ = scan_tick.tick() => {
                    self.reload();
                    self.retune(&mut scan_tick, &mut scan_period,
                                &mut remove_tick, &mut remove_period);
                }
                _ = remove_tick.tick() => {
                    self.run_sweep();
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received, stopping supervisor");
                    break;
                }
            }
        }

        info!("supervisor stopped. {}", self.metrics.summary());
    }

    /// Run both schedules until `cycles` removal passes have completed.
    ///
    /// Scan ticks still fire on their own cadence in between. Useful for
    /// tests and for bounded maintenance runs.
    pub async fn run_cycles(&mut self, cycles: usize) {
        let snapshot = self.registry.snapshot();
        let mut scan_period = snapshot.scan_interval();
        let mut remove_period = snapshot.remove_interval();
        let mut scan_tick = immediate_ticker(scan_period);
        let mut remove_tick = immediate_ticker(remove_period);

        let mut completed = 0;
        while completed < cycles {
            tokio::select! {
                _ = scan_tick.tick() => {
                    self.reload();
                    self.retune(&mut scan_tick, &mut scan_period,
                                &mut remove_tick, &mut remove_period);
                }
                _ = remove_tick.tick() => {
                    self.run_sweep();
                    completed += 1;
                }
            }
        }

        info!(cycles, "supervisor finished bounded run. {}", self.metrics.summary());
    }

    /// Scan tick body: re-read and revalidate the configuration file.
    ///
    /// A rejected reload keeps the previous registry; the supervisor
    /// never stops because of a bad configuration at runtime.
    fn reload(&mut self) {
        let result = ConfigDocument::load(&self.config_path).and_then(|doc| doc.validate());
        match result {
            Ok(snapshot) => {
                info!(paths = snapshot.len(), "configuration reloaded");
                self.registry.install(snapshot);
                self.metrics.record_reload(true);
            }
            Err(e) => {
                warn!(error = %e, "configuration reload rejected, keeping previous registry");
                self.metrics.record_reload(false);
            }
        }
    }

    /// Remove tick body: sweep one consistent snapshot of the registry.
    fn run_sweep(&mut self) {
        let snapshot = self.registry.snapshot();
        let start = Instant::now();
        let report = self.sweeper.sweep(&snapshot);
        let elapsed = start.elapsed();

        info!(
            evaluated = report.evaluated,
            removed = report.removed,
            would_remove = report.would_remove,
            failed = report.failed,
            skipped_paths = report.skipped_paths,
            elapsed_ms = elapsed.as_millis() as u64,
            "sweep completed"
        );
        self.metrics.record_sweep(&report, elapsed);
    }

    /// Rebuild tickers whose period changed with the last reload.
    ///
    /// Rebuilt tickers resume after a full period rather than firing
    /// immediately, preserving the cadence across a reload.
    fn retune(
        &self,
        scan_tick: &mut Interval,
        scan_period: &mut Duration,
        remove_tick: &mut Interval,
        remove_period: &mut Duration,
    ) {
        let current = self.registry.snapshot();

        if current.scan_interval() != *scan_period {
            debug!(
                from = ?*scan_period,
                to = ?current.scan_interval(),
                "scan interval changed, rescheduling"
            );
            *scan_period = current.scan_interval();
            *scan_tick = resumed_ticker(*scan_period);
        }
        if current.remove_interval() != *remove_period {
            debug!(
                from = ?*remove_period,
                to = ?current.remove_interval(),
                "remove interval changed, rescheduling"
            );
            *remove_period = current.remove_interval();
            *remove_tick = resumed_ticker(*remove_period);
        }
    }
}

/// Ticker whose first tick fires immediately.
fn immediate_ticker(period: Duration) -> Interval {
    let mut ticker = interval(period.max(MIN_TICK));
    // A long tick must not be followed by a burst of catch-up ticks.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Ticker whose first tick fires one full period from now.
fn resumed_ticker(period: Duration) -> Interval {
    let period = period.max(MIN_TICK);
    let mut ticker = interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
