//! Graceful-shutdown gate for request-serving processes.
//!
//! An [`AdmissionGate`] sits in front of every inbound request, counts the
//! ones in flight and, once a [`ShutdownCoordinator`] seals it, rejects new
//! requests while the admitted ones drain.

pub mod admin;
pub mod config;
pub mod gate;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use gate::{AdmissionGate, Decision, GateError, InFlightGuard, ShutdownState};
pub use http::HttpServer;
pub use lifecycle::{DrainOutcome, ShutdownCoordinator, ShutdownPolicy, ShutdownReport};
