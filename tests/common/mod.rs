//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, response::Response, Router};
use drain_gate::{AdmissionGate, AppConfig, HttpServer};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// Config with a short grace period and the admin endpoint on.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.shutdown.grace_period_secs = 0;
    config
}

/// Send one GET through `router` without a socket.
#[allow(dead_code)]
pub async fn get(router: &Router, uri: &str) -> Response {
    router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Start a server on an ephemeral port, stopping when `shutdown` resolves.
#[allow(dead_code)]
pub async fn spawn_server<F>(
    gate: Arc<AdmissionGate>,
    shutdown: F,
) -> (SocketAddr, JoinHandle<Result<(), std::io::Error>>)
where
    F: Future<Output = ()> + Send + 'static,
{
    let config = test_config();
    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(&config, gate);
    let handle = tokio::spawn(server.run(listener, shutdown));
    (addr, handle)
}

/// Poll `condition` until it holds, panicking after five seconds.
#[allow(dead_code)]
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached in time"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
