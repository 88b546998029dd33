//! Per-call request execution and classification.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tokio::time;

use crate::registry::{EndpointDescriptor, UpstreamRequest};
use crate::upstream::extract::extract_total;
use crate::upstream::outcome::{CallOutcome, MALFORMED_BODY_STATUS, NETWORK_FAILURE_STATUS};

/// Execute one upstream call under the per-call timeout and classify the
/// result. This never fails: every error mode becomes a `CallOutcome`.
///
/// The caller's Authorization header is forwarded verbatim; it is never
/// re-derived or cached between calls.
pub async fn fetch_total(
    client: &Client,
    descriptor: &EndpointDescriptor,
    authorization: &str,
    call_timeout: Duration,
) -> CallOutcome {
    let label = descriptor.label.as_str();
    let response_future = execute(client, descriptor, authorization);

    match time::timeout(call_timeout, response_future).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            tracing::warn!(label, error = %e, "Upstream call failed: transport error");
            CallOutcome::failure(label, NETWORK_FAILURE_STATUS)
        }
        Err(_) => {
            tracing::warn!(
                label,
                timeout_ms = call_timeout.as_millis() as u64,
                "Upstream call failed: timeout"
            );
            CallOutcome::failure(label, NETWORK_FAILURE_STATUS)
        }
    }
}

/// Send the request and classify the response. Transport-level errors
/// bubble up as `reqwest::Error` and are folded into the network sentinel
/// by the caller.
async fn execute(
    client: &Client,
    descriptor: &EndpointDescriptor,
    authorization: &str,
) -> Result<CallOutcome, reqwest::Error> {
    let label = descriptor.label.as_str();

    let builder = match &descriptor.request {
        UpstreamRequest::Get => client.get(&descriptor.url),
        // .json() also sets Content-Type: application/json
        UpstreamRequest::Post { body } => client.post(&descriptor.url).json(body),
    };

    let response = builder.header(AUTHORIZATION, authorization).send().await?;
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!(label, "Upstream rejected the forwarded credential");
        return Ok(CallOutcome::failure(label, 401));
    }

    if !status.is_success() {
        tracing::warn!(label, status = status.as_u16(), "Upstream returned an error status");
        return Ok(CallOutcome::failure(label, status.as_u16()));
    }

    let raw = response.text().await?;
    match serde_json::from_str::<Value>(&raw) {
        Ok(body) => {
            let total = extract_total(label, &body);
            tracing::debug!(label, total, "Upstream call succeeded");
            Ok(CallOutcome::success(label, total))
        }
        Err(e) => {
            tracing::warn!(label, error = %e, "Upstream body is not valid JSON");
            Ok(CallOutcome::failure(label, MALFORMED_BODY_STATUS))
        }
    }
}
