//! Civil-Registry Statistics Aggregation Proxy Library

pub mod aggregate;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;
pub mod upstream;

pub use aggregate::{AggregateResult, Aggregator};
pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
