//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce registry invariants (non-empty, unique labels, absolute URLs)
//! - Validate value ranges (timeouts > 0, addresses parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("endpoint registry is empty")]
    EmptyRegistry,

    #[error("endpoint at index {index} has an empty label")]
    EmptyLabel { index: usize },

    #[error("duplicate endpoint label \"{label}\"")]
    DuplicateLabel { label: String },

    #[error("endpoint \"{label}\" has an invalid URL \"{url}\": {reason}")]
    InvalidUrl {
        label: String,
        url: String,
        reason: String,
    },

    #[error("upstream.call_timeout_ms must be greater than zero")]
    ZeroCallTimeout,

    #[error("invalid {field} address \"{value}\"")]
    InvalidAddress { field: &'static str, value: String },
}

/// Check a parsed configuration for semantic problems.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.endpoints.is_empty() {
        errors.push(ValidationError::EmptyRegistry);
    }

    let mut seen = HashSet::new();
    for (index, endpoint) in config.endpoints.iter().enumerate() {
        if endpoint.label.trim().is_empty() {
            errors.push(ValidationError::EmptyLabel { index });
        } else if !seen.insert(endpoint.label.as_str()) {
            errors.push(ValidationError::DuplicateLabel {
                label: endpoint.label.clone(),
            });
        }

        match Url::parse(&endpoint.url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::InvalidUrl {
                label: endpoint.label.clone(),
                url: endpoint.url.clone(),
                reason: format!("unsupported scheme \"{}\"", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidUrl {
                label: endpoint.label.clone(),
                url: endpoint.url.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if config.upstream.call_timeout_ms == 0 {
        errors.push(ValidationError::ZeroCallTimeout);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{EndpointDescriptor, UpstreamRequest};

    fn endpoint(label: &str, url: &str) -> EndpointDescriptor {
        EndpointDescriptor {
            label: label.to_string(),
            url: url.to_string(),
            request: UpstreamRequest::Get,
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn empty_registry_is_rejected() {
        let mut config = ProxyConfig::default();
        config.endpoints.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::EmptyRegistry));
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let mut config = ProxyConfig::default();
        config.endpoints = vec![
            endpoint("a", "https://example.com/1"),
            endpoint("a", "https://example.com/2"),
        ];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::DuplicateLabel { label } if label == "a")));
    }

    #[test]
    fn relative_and_non_http_urls_are_rejected() {
        let mut config = ProxyConfig::default();
        config.endpoints = vec![
            endpoint("relative", "/v1/birth/search"),
            endpoint("ftp", "ftp://example.com/stats"),
        ];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| matches!(e, ValidationError::InvalidUrl { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn all_errors_are_reported_together() {
        let mut config = ProxyConfig::default();
        config.endpoints = vec![endpoint("", "not a url")];
        config.upstream.call_timeout_ms = 0;
        config.listener.bind_address = "nope".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 4, "got: {errors:?}");
    }
}
