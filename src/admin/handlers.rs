use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::gate::AdmissionGate;

#[derive(Debug, Serialize)]
pub struct GateStatus {
    pub version: &'static str,
    pub state: &'static str,
    pub in_flight: usize,
    pub shutting_down: bool,
    pub drained: bool,
}

pub async fn get_status(State(gate): State<Arc<AdmissionGate>>) -> Json<GateStatus> {
    Json(GateStatus {
        version: env!("CARGO_PKG_VERSION"),
        state: gate.state().as_str(),
        in_flight: gate.in_flight(),
        shutting_down: gate.is_shutting_down(),
        drained: gate.is_drained(),
    })
}
