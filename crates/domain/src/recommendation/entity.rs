use serde::{Deserialize, Serialize};

use crate::assessment::entity::RawFinding;

/// Default placeholder for fields not yet filled by metadata or enrichment.
pub const UNKNOWN: &str = "Unknown";

/// Deduplicated aggregate of all findings sharing an `id`, enriched with
/// human-readable guidance.
///
/// Lifecycle: created during the grouping pass over Unhealthy findings,
/// mutated once by the metadata overlay, mutated again by enrichment
/// (description, remediation, context), then read-only for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub severity: String,
    /// Resource names in encounter order; duplicates permitted. Length
    /// equals the count of Unhealthy findings sharing this `id`.
    pub affected_resources: Vec<String>,
    pub remediation: String,
    pub context: String,
}

impl Recommendation {
    /// Create a new recommendation from the first finding seen for an `id`.
    /// Everything except `id`/`display_name` starts as `"Unknown"`; the
    /// first affected resource is recorded here.
    pub fn from_finding(finding: &RawFinding) -> Self {
        Self {
            id: finding.id.clone(),
            display_name: finding.display_name.clone(),
            description: UNKNOWN.to_string(),
            severity: UNKNOWN.to_string(),
            affected_resources: vec![finding.resource_name.clone()],
            remediation: UNKNOWN.to_string(),
            context: UNKNOWN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_finding_sets_defaults() {
        let finding = RawFinding {
            id: "CVE1".to_string(),
            resource_name: "vm1".to_string(),
            status: "Unhealthy".to_string(),
            display_name: "Outdated TLS version".to_string(),
        };
        let rec = Recommendation::from_finding(&finding);

        assert_eq!(rec.id, "CVE1");
        assert_eq!(rec.display_name, "Outdated TLS version");
        assert_eq!(rec.description, UNKNOWN);
        assert_eq!(rec.severity, UNKNOWN);
        assert_eq!(rec.remediation, UNKNOWN);
        assert_eq!(rec.context, UNKNOWN);
        assert_eq!(rec.affected_resources, vec!["vm1".to_string()]);
    }
}
