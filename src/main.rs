//! Civil-Registry Statistics Aggregation Proxy
//!
//! One inbound `GET /api/hotich/thongke` fans out to every registered
//! upstream endpoint of the MOJ civil-registry portal, classifies each
//! outcome, and returns a single consolidated totals map.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │              AGGREGATION PROXY                 │
//!                      │                                                │
//!   Client Request     │  ┌─────────┐    ┌───────────┐                 │
//!   ──────────────────▶│  │  http   │───▶│ aggregate │── fan-out ──────┼──▶ MOJ upstream
//!                      │  │ server  │    │ join_all  │── one task ─────┼──▶ endpoints
//!                      │  └─────────┘    └─────┬─────┘    per label    │    (POST search)
//!                      │                       │                        │
//!   Client Response    │  ┌─────────┐    ┌─────▼─────┐                 │
//!   ◀──────────────────┼──│ totals  │◀───│ upstream  │  classify:      │
//!                      │  │  merge  │    │  client   │  401/5xx/599/502│
//!                      │  └─────────┘    └───────────┘                 │
//!                      │                                                │
//!                      │  config · registry · lifecycle · observability │
//!                      └───────────────────────────────────────────────┘
//! ```

use std::path::Path;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hotich_stats_proxy::config::{load_config, ProxyConfig};
use hotich_stats_proxy::observability::metrics;
use hotich_stats_proxy::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotich_stats_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("hotich-stats-proxy v0.1.0 starting");

    // Optional config file path as the first argument; defaults otherwise.
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => ProxyConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        endpoints = config.endpoints.len(),
        call_timeout_ms = config.upstream.call_timeout_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.listen_for_ctrl_c();

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
