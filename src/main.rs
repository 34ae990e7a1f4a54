//! drain-gate server.
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ graceful_shutdown ─▶ handler
//!                                     │      ▲
//!                                admit│      │complete
//!                                     ▼      │
//!                                ┌──────────────┐   seal / wait drain
//!                                │AdmissionGate │◀──────────────────┐
//!                                └──────────────┘                   │
//!                                                    ┌──────────────────────┐
//!     SIGTERM / SIGINT ─────────────────────────────▶│ ShutdownCoordinator  │
//!                                                    └──────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use drain_gate::config::{load_config, validate_config, AppConfig, ConfigError};
use drain_gate::lifecycle::signals::shutdown_signal;
use drain_gate::observability::{logging, metrics};
use drain_gate::{AdmissionGate, HttpServer, ShutdownCoordinator, ShutdownPolicy};

#[derive(Parser)]
#[command(name = "drain-gate")]
#[command(about = "HTTP server that drains in-flight requests before exiting", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "drain-gate starting");

    let policy = ShutdownPolicy::from(&config.shutdown);
    tracing::info!(
        bind_address = %config.listener.bind_address,
        grace_period_secs = config.shutdown.grace_period_secs,
        drain_timeout_secs = ?config.shutdown.drain_timeout_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let gate = Arc::new(AdmissionGate::new());
    let coordinator = ShutdownCoordinator::new(gate.clone(), policy);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(&config, gate);

    server
        .run(listener, async move {
            shutdown_signal().await;
            let report = coordinator.begin_shutdown().await;
            tracing::info!(
                in_flight_at_seal = report.in_flight_at_seal,
                outcome = ?report.outcome,
                "Gate drained, stopping server"
            );
        })
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
