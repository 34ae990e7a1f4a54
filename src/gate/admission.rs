//! Admission gate: the shutdown flag, the in-flight counter and the drain
//! signal, mutated only through lock-free atomics.

use std::hint;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::gate::drain::DrainSignal;
use crate::gate::state::{AtomicShutdownState, ShutdownState};
use crate::gate::GateError;
use crate::observability::metrics;

/// Outcome of [`AdmissionGate::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The request may run. The caller owes exactly one `complete()`.
    Admitted,
    /// Shutdown has begun. The handler must not run.
    Rejected,
}

impl Decision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Decision::Admitted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Admitted => "admitted",
            Decision::Rejected => "rejected",
        }
    }
}

/// Gate in front of the request pipeline.
///
/// One instance per serving process, owned by the composition root and
/// shared by reference (usually `Arc`) with the request dispatch path and
/// the [`ShutdownCoordinator`](crate::lifecycle::ShutdownCoordinator).
#[derive(Debug, Default)]
pub struct AdmissionGate {
    state: AtomicShutdownState,
    in_flight: AtomicUsize,
    drained: DrainSignal,
}

impl AdmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a new request may proceed.
    ///
    /// Spins on `Unlocked -> TransientLock` until it wins the flag or sees
    /// `Set`. The counter is bumped while the flag is still held, so a
    /// concurrent `seal` either runs entirely before this admission (and we
    /// reject) or observes the incremented count.
    pub fn admit(&self) -> Decision {
        loop {
            match self
                .state
                .compare_exchange(ShutdownState::Unlocked, ShutdownState::TransientLock)
            {
                Ok(_) => break,
                Err(ShutdownState::Set) => {
                    metrics::record_admission(Decision::Rejected);
                    return Decision::Rejected;
                }
                Err(_) => hint::spin_loop(),
            }
        }

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.state.store(ShutdownState::Unlocked);

        metrics::record_admission(Decision::Admitted);
        metrics::in_flight_started();
        Decision::Admitted
    }

    /// Record completion of an admitted request.
    ///
    /// Must run once per `Admitted` decision, whatever the handler outcome.
    /// Raises the drain signal when this was the last request of an active
    /// shutdown.
    pub fn complete(&self) {
        let previous = match self
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        {
            Ok(previous) => previous,
            Err(_) => {
                tracing::error!("complete() called with no request in flight; ignoring");
                return;
            }
        };

        let remaining = previous - 1;
        metrics::in_flight_finished();

        if remaining == 0 && self.state.load() == ShutdownState::Set {
            tracing::debug!("Last in-flight request completed during shutdown");
            self.drained.set();
        }
    }

    /// Admit and return a guard that completes the request on drop.
    ///
    /// The guard runs `complete()` on normal return, error, panic unwind and
    /// future cancellation alike.
    pub fn enter(&self) -> Result<InFlightGuard<'_>, GateError> {
        match self.admit() {
            Decision::Admitted => Ok(InFlightGuard { gate: self }),
            Decision::Rejected => Err(GateError::ShuttingDown),
        }
    }

    /// Move the flag to `Set`, waiting out any admission holding the lock.
    ///
    /// Returns the in-flight count observed right after the transition. If
    /// that count is zero the drain signal is raised here.
    pub(crate) fn seal(&self) -> usize {
        loop {
            match self
                .state
                .compare_exchange(ShutdownState::Unlocked, ShutdownState::Set)
            {
                Err(ShutdownState::TransientLock) => hint::spin_loop(),
                // Transitioned, or a previous seal already did.
                _ => break,
            }
        }

        let in_flight = self.in_flight.load(Ordering::SeqCst);
        if in_flight == 0 {
            self.drained.set();
        }
        in_flight
    }

    /// Resolve once the gate is sealed and every admitted request completed.
    pub async fn wait_drained(&self) {
        self.drained.wait().await;
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> ShutdownState {
        self.state.load()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.state() == ShutdownState::Set
    }

    pub fn is_drained(&self) -> bool {
        self.drained.is_set()
    }
}

/// RAII handle for one admitted request.
#[derive(Debug)]
#[must_use = "dropping the guard immediately completes the request"]
pub struct InFlightGuard<'a> {
    gate: &'a AdmissionGate,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.gate.complete();
    }
}
