//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (axum::serve)
//!     → request.rs (assign x-request-id)
//!     → middleware/graceful_shutdown.rs (gate admission)
//!         → Rejected: response.rs (500, handler skipped)
//!         → Admitted: handlers.rs, completion on guard drop
//!     → x-request-id echoed on the response
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
