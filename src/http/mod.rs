//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → stats handler (credential check, fan-out via aggregate)
//!     → error.rs (boundary error bodies)
//!     → Send to client
//! ```

pub mod error;
pub mod request;
pub mod server;

pub use error::ProxyError;
pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer, STATS_PATH};
