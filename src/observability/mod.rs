//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gate and HTTP layer produce:
//!     → logging.rs (structured tracing events, request id attached)
//!     → metrics.rs (admission counters, in-flight gauge, drain histogram)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
