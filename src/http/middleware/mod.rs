//! Axum middleware.

pub mod graceful_shutdown;

pub use graceful_shutdown::graceful_shutdown_middleware;
