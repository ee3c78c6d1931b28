//! Background janitor for the confirmation engine.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::engine::{ConfirmationEngine, SweepReport};

/// Periodically removes expired codes and stale send history
pub struct ConfirmationSweeper {
    engine: Arc<ConfirmationEngine>,
    interval: Duration,
}

impl ConfirmationSweeper {
    pub fn new(engine: Arc<ConfirmationEngine>, interval: Duration) -> Self {
        Self { engine, interval }
    }

    pub fn from_minutes(engine: Arc<ConfirmationEngine>, minutes: u64) -> Self {
        Self::new(engine, Duration::from_secs(minutes * 60))
    }

    /// Run a single sweep
    pub fn run_once(&self) -> SweepReport {
        let report = self.engine.sweep();
        if report.total_removed() > 0 {
            info!(
                expired_registrations = report.expired_registrations,
                expired_resets = report.expired_resets,
                limiter_keys_pruned = report.registration_keys_pruned + report.reset_keys_pruned,
                "Removed stale confirmation data"
            );
        }
        report
    }

    /// Start the sweeper as a background task
    ///
    /// The first sweep runs one full interval after start. The task runs
    /// until the returned handle is aborted or the runtime shuts down.
    pub fn start_background_task(self: Arc<Self>) -> JoinHandle<()> {
        let interval = if self.interval.is_zero() {
            warn!("Sweep interval of zero requested, using one minute");
            Duration::from_secs(60)
        } else {
            self.interval
        };

        tokio::spawn(async move {
            info!(
                "Confirmation sweeper started - will run every {} seconds",
                interval.as_secs()
            );

            let mut timer = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
            timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                timer.tick().await;
                self.run_once();
            }
        })
    }
}
