//! HTTP server setup and the aggregation handler.
//!
//! # Responsibilities
//! - Create the Axum router with the stats and health routes
//! - Wire up middleware (CORS, inbound timeout, request ID, tracing)
//! - Reject requests without a credential before any upstream call
//! - Dispatch one fan-out aggregation per inbound stats request
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Client;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::aggregate::{AggregateResult, Aggregator};
use crate::config::ProxyConfig;
use crate::http::error::ProxyError;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::observability::metrics;
use crate::registry::EndpointRegistry;

/// Path of the aggregation endpoint.
pub const STATS_PATH: &str = "/api/hotich/thongke";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Aggregator,
}

/// HTTP server for the aggregation proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let registry = Arc::new(EndpointRegistry::from_config(config.endpoints.clone()));

        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.upstream.connect_timeout_ms))
            .build()
            .expect("failed to build upstream HTTP client");

        let aggregator = Aggregator::new(registry, client, &config.upstream);
        let state = AppState { aggregator };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        // Permissive CORS on every response, preflights included.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        Router::new()
            .route(STATS_PATH, get(stats_handler).options(preflight_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// The aggregation endpoint.
///
/// Forwards the caller's credential verbatim to every registered upstream
/// endpoint and returns the merged totals. Individual upstream failures
/// are folded into the result; only an internal orchestration fault fails
/// the request.
async fn stats_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AggregateResult>, ProxyError> {
    let start = Instant::now();
    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    let Some(authorization) = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
    else {
        tracing::warn!(request_id, "Rejected aggregation request without credential");
        metrics::record_request(StatusCode::UNAUTHORIZED.as_u16(), start);
        return Err(ProxyError::MissingCredential);
    };

    tracing::debug!(request_id, "Aggregating upstream totals");

    match state.aggregator.aggregate(authorization).await {
        Ok(result) => {
            metrics::record_request(StatusCode::OK.as_u16(), start);
            tracing::debug!(
                request_id,
                unauthorized = result.unauthorized,
                labels = result.totals.len(),
                "Aggregation complete"
            );
            Ok(Json(result))
        }
        Err(e) => {
            metrics::record_request(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), start);
            Err(e)
        }
    }
}

/// CORS preflight; answered 200 with no body.
async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Liveness probe.
async fn health_handler() -> &'static str {
    "OK"
}
