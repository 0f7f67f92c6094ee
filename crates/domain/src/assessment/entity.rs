use serde::{Deserialize, Serialize};

/// Finding status value indicating a vulnerability requiring remediation.
/// Matched exactly, no normalization.
pub const STATUS_UNHEALTHY: &str = "Unhealthy";

// ── Raw findings endpoint records ───────────────────────────────────

/// A single security finding as returned by the findings endpoint.
///
/// `id` is a grouping key shared across duplicate findings of the same
/// class, NOT unique per instance: the same assessment reported against
/// ten resources arrives as ten findings with one `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFinding {
    pub id: String,
    pub resource_name: String,
    /// Enumerated status code. Only `"Unhealthy"` is relevant downstream.
    pub status: String,
    pub display_name: String,
}

impl RawFinding {
    pub fn is_unhealthy(&self) -> bool {
        self.status == STATUS_UNHEALTHY
    }
}

/// Descriptive metadata for a finding class, from the metadata endpoint.
/// Shares the `id` key space with `RawFinding`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetadata {
    pub id: String,
    pub description: String,
    pub remediation: String,
    pub severity: String,
}
