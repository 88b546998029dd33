//! Endpoint registry subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or built-in defaults
//!     → config::validation (labels unique, URLs absolute)
//!     → EndpointRegistry (immutable)
//!     → shared via Arc into the aggregator
//! ```
//!
//! # Design Decisions
//! - The descriptor set is fixed at process start; there is no dynamic
//!   registration and no reload path
//! - Enumeration order is stable for the process lifetime
//! - Adding or removing an endpoint is a registry edit (config file or
//!   default table), never aggregator logic

pub mod descriptor;

pub use descriptor::{default_descriptors, EndpointDescriptor, UpstreamRequest};

/// Immutable set of upstream endpoints that defines what "all stats" means.
///
/// Built once from validated configuration and shared read-only across all
/// concurrent aggregation requests.
#[derive(Debug)]
pub struct EndpointRegistry {
    descriptors: Vec<EndpointDescriptor>,
}

impl EndpointRegistry {
    /// Build the registry from validated configuration.
    pub fn from_config(descriptors: Vec<EndpointDescriptor>) -> Self {
        Self { descriptors }
    }

    /// Ordered enumeration of all registered descriptors.
    pub fn descriptors(&self) -> &[EndpointDescriptor] {
        &self.descriptors
    }

    /// Iterate over the registered labels.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.label.as_str())
    }

    /// Number of registered endpoints.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_table_has_unique_labels() {
        let registry = EndpointRegistry::from_config(default_descriptors());
        assert_eq!(registry.len(), 8);

        let labels: HashSet<&str> = registry.labels().collect();
        assert_eq!(labels.len(), registry.len(), "labels must be unique");
    }

    #[test]
    fn enumeration_is_stable() {
        let registry = EndpointRegistry::from_config(default_descriptors());
        let first: Vec<&str> = registry.labels().collect();
        let second: Vec<&str> = registry.labels().collect();
        assert_eq!(first, second);
    }
}
