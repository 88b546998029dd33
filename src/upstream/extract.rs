//! Tolerant total extraction.
//!
//! The upstream service's response shape varies by endpoint version, so
//! the total count is probed through an ordered list of candidate field
//! paths rather than one hard-coded access. Adding a new shape is a
//! one-line edit to `TOTAL_FIELD_PATHS`.

use serde_json::Value;

/// Candidate paths to the total count, tried in order. The first path that
/// resolves to a present, non-null value wins.
const TOTAL_FIELD_PATHS: &[&[&str]] = &[
    &["result", "totalElements"],
    &["totalElements"],
    &["result", "total"],
    &["total"],
];

/// Extract the total count from a parsed upstream body.
///
/// Shapes outside the probe list default to 0, loudly: a schema drift
/// upstream would otherwise misreport counts in silence.
pub fn extract_total(label: &str, body: &Value) -> u64 {
    for path in TOTAL_FIELD_PATHS {
        let Some(candidate) = lookup(body, path) else {
            continue;
        };
        if candidate.is_null() {
            continue;
        }
        return coerce_count(label, candidate);
    }

    tracing::warn!(
        label,
        "upstream response matched no known total field, defaulting to 0"
    );
    0
}

fn lookup<'a>(body: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(body, |value, key| value.get(key))
}

fn coerce_count(label: &str, candidate: &Value) -> u64 {
    let number = match candidate {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n >= 0.0 => n as u64,
        _ => {
            tracing::warn!(
                label,
                candidate = %candidate,
                "total candidate did not coerce to a count, using 0"
            );
            0
        }
    }
}
