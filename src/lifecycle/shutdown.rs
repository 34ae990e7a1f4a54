//! Shutdown coordination for the gate.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tokio::time::Instant;

use crate::config::ShutdownConfig;
use crate::gate::AdmissionGate;
use crate::observability::metrics;

/// Delay between drain completion and process teardown.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Timing knobs for the shutdown sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownPolicy {
    /// Fixed wait after draining, before control returns to the host.
    pub grace_period: Duration,
    /// Upper bound on the drain wait. `None` waits forever.
    pub drain_timeout: Option<Duration>,
}

impl Default for ShutdownPolicy {
    fn default() -> Self {
        Self {
            grace_period: DEFAULT_GRACE_PERIOD,
            drain_timeout: None,
        }
    }
}

impl From<&ShutdownConfig> for ShutdownPolicy {
    fn from(config: &ShutdownConfig) -> Self {
        Self {
            grace_period: Duration::from_secs(config.grace_period_secs),
            drain_timeout: config.drain_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// How the drain phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Nothing was in flight when the gate was sealed.
    Immediate,
    /// Waited for in-flight requests and they all completed.
    Drained,
    /// `drain_timeout` elapsed with requests still in flight.
    TimedOut { remaining: usize },
}

/// Summary of a completed shutdown sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownReport {
    pub in_flight_at_seal: usize,
    pub outcome: DrainOutcome,
    pub drain_time: Duration,
}

/// Runs the one-time shutdown transition against an [`AdmissionGate`].
pub struct ShutdownCoordinator {
    gate: Arc<AdmissionGate>,
    policy: ShutdownPolicy,
    report: OnceCell<ShutdownReport>,
}

impl ShutdownCoordinator {
    pub fn new(gate: Arc<AdmissionGate>, policy: ShutdownPolicy) -> Self {
        Self {
            gate,
            policy,
            report: OnceCell::new(),
        }
    }

    pub fn gate(&self) -> &Arc<AdmissionGate> {
        &self.gate
    }

    /// Report of the finished sequence, if it already ran.
    pub fn report(&self) -> Option<ShutdownReport> {
        self.report.get().copied()
    }

    /// Stop admitting, wait for in-flight requests, then wait out the grace
    /// period.
    ///
    /// Resolves only when the host may tear the process down. The sequence
    /// runs once: concurrent or repeated callers wait on the same run and
    /// get the same report.
    pub async fn begin_shutdown(&self) -> ShutdownReport {
        *self.report.get_or_init(|| self.run()).await
    }

    async fn run(&self) -> ShutdownReport {
        tracing::info!("Setting shutdown lock");
        let started = Instant::now();
        let in_flight_at_seal = self.gate.seal();

        let outcome = if in_flight_at_seal == 0 {
            DrainOutcome::Immediate
        } else {
            tracing::info!(
                in_flight = in_flight_at_seal,
                "Waiting for in-flight requests to complete"
            );
            self.wait_for_drain().await
        };

        let drain_time = started.elapsed();
        metrics::record_drain(drain_time);

        match outcome {
            DrainOutcome::TimedOut { remaining } => tracing::warn!(
                remaining,
                drain_ms = drain_time.as_millis() as u64,
                "Drain timeout elapsed, proceeding with requests still in flight"
            ),
            _ => tracing::info!(
                drain_ms = drain_time.as_millis() as u64,
                grace_secs = self.policy.grace_period.as_secs_f64(),
                "In-flight requests drained, shutting down after grace period"
            ),
        }

        tokio::time::sleep(self.policy.grace_period).await;
        tracing::info!("Grace period elapsed");

        ShutdownReport {
            in_flight_at_seal,
            outcome,
            drain_time,
        }
    }

    async fn wait_for_drain(&self) -> DrainOutcome {
        match self.policy.drain_timeout {
            None => {
                self.gate.wait_drained().await;
                DrainOutcome::Drained
            }
            Some(limit) => match tokio::time::timeout(limit, self.gate.wait_drained()).await {
                Ok(()) => DrainOutcome::Drained,
                Err(_) => DrainOutcome::TimedOut {
                    remaining: self.gate.in_flight(),
                },
            },
        }
    }
}
