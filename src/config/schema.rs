//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files,
//! and every section has defaults so a minimal (or absent) config file
//! still yields a runnable service.

use serde::{Deserialize, Serialize};

use crate::registry::{default_descriptors, EndpointDescriptor};

/// Root configuration for the aggregation proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream call settings (per-call timeout).
    pub upstream: UpstreamConfig,

    /// Inbound request timeout.
    pub timeouts: TimeoutConfig,

    /// The endpoint registry table. Fixed for the process lifetime.
    pub endpoints: Vec<EndpointDescriptor>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            upstream: UpstreamConfig::default(),
            timeouts: TimeoutConfig::default(),
            endpoints: default_descriptors(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream call configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Per-call budget in milliseconds, covering connect, send and body
    /// read. A call that exceeds it is classified as a network failure.
    pub call_timeout_ms: u64,

    /// Connection establishment timeout in milliseconds.
    pub connect_timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            call_timeout_ms: 9_000,
            connect_timeout_ms: 5_000,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for one inbound request/response in seconds.
    /// Must exceed the upstream call budget or every aggregation would be
    /// cut short.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_include_moj_registry() {
        let config = ProxyConfig::default();
        assert_eq!(config.endpoints.len(), 8);
        assert_eq!(config.upstream.call_timeout_ms, 9_000);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config: ProxyConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(!config.endpoints.is_empty());
    }

    #[test]
    fn endpoints_can_be_overridden() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [[endpoints]]
            label = "Đăng ký khai sinh"
            url = "https://hotichdientu.moj.gov.vn/v1/birth/search-approve-publish"
            method = "POST"
            body = { searchKey = "" }
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoints.len(), 1);
    }
}
