//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → shutdown future resolves
//!
//! Shutdown (shutdown.rs):
//!     Seal gate → Wait for in-flight drain → Grace period → Return to host
//! ```
//!
//! # Design Decisions
//! - The shutdown sequence runs once per coordinator
//! - In-flight requests are never interrupted
//! - Drain wait is unbounded unless `drain_timeout_secs` is configured

pub mod shutdown;
pub mod signals;

pub use shutdown::{DrainOutcome, ShutdownCoordinator, ShutdownPolicy, ShutdownReport};
