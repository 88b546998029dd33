//! Per-call outcome classification.

/// Sentinel status for timeouts and transport-level failures (DNS,
/// connection refused, TLS). Distinct from every real HTTP status.
pub const NETWORK_FAILURE_STATUS: u16 = 599;

/// Sentinel status for a success response whose body did not parse as JSON.
pub const MALFORMED_BODY_STATUS: u16 = 502;

/// Result of one upstream attempt for one descriptor.
///
/// Created fresh per aggregation call and discarded after the merge;
/// outcomes never outlive the request/response cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    /// Echoes the descriptor's label.
    pub label: String,

    /// True only if the call succeeded and the body parsed.
    pub ok: bool,

    /// 200 on success, 401 for unauthorized, the upstream status for other
    /// HTTP errors, or one of the sentinels above.
    pub status: u16,

    /// Extracted count; 0 whenever `ok` is false.
    pub total: u64,
}

impl CallOutcome {
    /// A successful call with an extracted total.
    pub fn success(label: impl Into<String>, total: u64) -> Self {
        Self {
            label: label.into(),
            ok: true,
            status: 200,
            total,
        }
    }

    /// A failed call classified by status; the total is forced to 0.
    pub fn failure(label: impl Into<String>, status: u16) -> Self {
        Self {
            label: label.into(),
            ok: false,
            status,
            total: 0,
        }
    }

    /// Whether this outcome escalates the aggregate `unauthorized` flag.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}
