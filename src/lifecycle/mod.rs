//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init metrics → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or test trigger → broadcast → server drains and exits
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
