//! Admission gate subsystem.
//!
//! # Data Flow
//! ```text
//! Request arrives
//!     → admission.rs (CAS on the shutdown flag, bump in-flight count)
//!     → Admitted: downstream handler runs, guard drop calls complete()
//!     → Rejected: caller answers 500, handler never runs
//!
//! Shutdown trigger
//!     → seal(): flag Unlocked → Set (state.rs)
//!     → drain.rs signal raised by whoever sees Set with zero in flight
//! ```
//!
//! # Design Decisions
//! - Spin-CAS instead of a mutex; the critical section is one atomic op
//! - `Set` is terminal
//! - No lock is held across request handling

pub mod admission;
pub mod drain;
pub mod state;

pub use admission::{AdmissionGate, Decision, InFlightGuard};
pub use drain::DrainSignal;
pub use state::ShutdownState;

/// Errors surfaced by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// The request arrived after shutdown began.
    #[error("service is shutting down")]
    ShuttingDown,
}
