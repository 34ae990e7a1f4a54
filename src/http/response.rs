//! Responses produced by the gate itself.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Status returned for requests rejected during shutdown.
pub const REJECTED_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// Response for a request that arrived after shutdown began.
///
/// Asks the client to drop the connection so it reconnects elsewhere.
pub fn shutting_down() -> Response {
    let mut response = (REJECTED_STATUS, "Service is shutting down").into_response();
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    response
}
