//! Admin endpoints.
//!
//! Mounted outside the gate so the drain can be observed while new
//! application requests are rejected.

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::gate::AdmissionGate;

pub fn router(gate: Arc<AdmissionGate>) -> Router {
    Router::new()
        .route("/admin/status", get(handlers::get_status))
        .with_state(gate)
}
