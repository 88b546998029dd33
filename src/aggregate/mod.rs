//! Fan-out/fan-in aggregation.
//!
//! # Data Flow
//! ```text
//! inbound credential
//!     → one task per registered descriptor (no ordering dependency)
//!     → join_all barrier (completion gated on every call finishing)
//!     → merge keyed by label
//!     → AggregateResult
//! ```
//!
//! # Design Decisions
//! - Per-call failures never abort the batch; they arrive as classified
//!   outcomes with total 0
//! - A panicked call task is the one request-level failure (internal
//!   fault) and aborts the whole aggregation; no partial totals
//! - Merge keys strictly by label, so call-completion order is irrelevant

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::UpstreamConfig;
use crate::http::error::ProxyError;
use crate::observability::metrics;
use crate::registry::EndpointRegistry;
use crate::upstream::{fetch_total, CallOutcome};

/// The proxy's consolidated output for one aggregation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResult {
    /// True iff any individual call came back 401.
    pub unauthorized: bool,

    /// One entry per registered label; failed calls are present with 0.
    pub totals: BTreeMap<String, u64>,
}

/// Executes the full descriptor set against the upstream service.
///
/// Holds only read-only shared state, so one instance serves all
/// concurrent aggregation requests.
#[derive(Clone)]
pub struct Aggregator {
    registry: Arc<EndpointRegistry>,
    client: Client,
    call_timeout: Duration,
}

impl Aggregator {
    pub fn new(registry: Arc<EndpointRegistry>, client: Client, upstream: &UpstreamConfig) -> Self {
        Self {
            registry,
            client,
            call_timeout: Duration::from_millis(upstream.call_timeout_ms),
        }
    }

    /// Fan out to every registered endpoint with the caller's credential
    /// and merge the outcomes into one result.
    pub async fn aggregate(&self, authorization: &str) -> Result<AggregateResult, ProxyError> {
        let handles: Vec<_> = self
            .registry
            .descriptors()
            .iter()
            .cloned()
            .map(|descriptor| {
                let client = self.client.clone();
                let authorization = authorization.to_string();
                let call_timeout = self.call_timeout;
                tokio::spawn(async move {
                    let call_start = Instant::now();
                    let outcome =
                        fetch_total(&client, &descriptor, &authorization, call_timeout).await;
                    metrics::record_upstream_call(&outcome.label, outcome.status, call_start);
                    outcome
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for joined in join_all(handles).await {
            let outcome = joined.map_err(|e| ProxyError::Internal(e.to_string()))?;
            outcomes.push(outcome);
        }

        Ok(merge(outcomes))
    }
}

fn merge(outcomes: Vec<CallOutcome>) -> AggregateResult {
    let mut unauthorized = false;
    let mut totals = BTreeMap::new();

    for outcome in outcomes {
        unauthorized |= outcome.is_unauthorized();
        let total = if outcome.ok { outcome.total } else { 0 };
        totals.insert(outcome.label, total);
    }

    AggregateResult {
        unauthorized,
        totals,
    }
}
