//! Graceful shutdown middleware.
//!
//! Runs the admission check before any handler work. Rejected requests get
//! a 500 and never reach the handler; admitted ones hold an
//! [`InFlightGuard`](crate::gate::InFlightGuard) until the handler returns,
//! fails, panics or is cancelled by a timeout.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::gate::AdmissionGate;
use crate::http::request::request_id;
use crate::http::response;

pub async fn graceful_shutdown_middleware(
    State(gate): State<Arc<AdmissionGate>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let request_id = request_id(&request);

    let _guard = match gate.enter() {
        Ok(guard) => guard,
        Err(e) => {
            tracing::info!(request_id = %request_id, reason = %e, "Rejecting request on shutdown");
            return response::shutting_down();
        }
    };

    tracing::info!(
        request_id = %request_id,
        in_flight = gate.in_flight(),
        "Starting request"
    );
    let response = next.run(request).await;
    tracing::info!(
        request_id = %request_id,
        status = %response.status(),
        "Finished request"
    );

    response
}
