//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the gated application routes
//! - Mount the ungated admin routes
//! - Wire up middleware (request id, tracing, timeout)
//! - Serve until the host's shutdown future resolves

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin;
use crate::config::AppConfig;
use crate::gate::AdmissionGate;
use crate::http::handlers;
use crate::http::middleware::graceful_shutdown_middleware;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};

/// HTTP server with every application route behind an [`AdmissionGate`].
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server hosting the built-in handlers.
    pub fn new(config: &AppConfig, gate: Arc<AdmissionGate>) -> Self {
        Self::with_routes(config, gate, Self::default_routes())
    }

    /// Create a server hosting `app`. Every route in `app` is gated.
    pub fn with_routes(config: &AppConfig, gate: Arc<AdmissionGate>, app: Router) -> Self {
        Self {
            router: Self::build_router(config, gate, app),
        }
    }

    fn default_routes() -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/work/{ms}", get(handlers::work))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, gate: Arc<AdmissionGate>, app: Router) -> Router {
        let mut router = app.layer(middleware::from_fn_with_state(
            gate.clone(),
            graceful_shutdown_middleware,
        ));

        if config.admin.enabled {
            router = router.merge(admin::router(gate));
        }

        router.layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.timeouts.request_secs,
                ))),
        )
    }

    /// The fully layered router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` resolves.
    ///
    /// `shutdown` should itself await the shutdown coordinator, so the
    /// listener stays open (and rejecting) while in-flight requests drain.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
