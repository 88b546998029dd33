//! Upstream call execution subsystem.
//!
//! # Data Flow
//! ```text
//! EndpointDescriptor + forwarded Authorization header
//!     → client.rs (build request, send under per-call timeout)
//!     → classification (401 / HTTP error / network / malformed body)
//!     → extract.rs (probe response shapes for the total count)
//!     → CallOutcome (ephemeral, merged by the aggregator)
//! ```
//!
//! # Design Decisions
//! - Every failure mode folds into a CallOutcome; nothing here returns an
//!   error to the caller, so one bad endpoint can never abort the batch
//! - The per-call timeout is the only cancellation mechanism and cancels
//!   just that call
//! - Status sentinels (599 network, 502 malformed) are distinct from any
//!   status the upstream actually sends for these conditions

pub mod client;
pub mod extract;
pub mod outcome;

pub use client::fetch_total;
pub use outcome::{CallOutcome, MALFORMED_BODY_STATUS, NETWORK_FAILURE_STATUS};
