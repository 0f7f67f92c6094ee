use std::collections::BTreeMap;

use crate::assessment::entity::{RawFinding, RawMetadata};
use crate::recommendation::entity::Recommendation;

/// Merge findings and metadata into deduplicated recommendations.
///
/// Two passes, pure function of the inputs:
///
/// 1. **Group** — iterate findings in fetch order, keeping only those with
///    status `"Unhealthy"`. The first finding for an `id` creates the
///    recommendation (display name from that finding, everything else
///    `"Unknown"`); every finding for the `id` appends its resource name,
///    unconditionally, so duplicates are preserved.
/// 2. **Overlay** — metadata whose `id` matches an existing recommendation
///    overwrites `description`, `severity` and `remediation`. Metadata
///    with no match never creates an entry.
///
/// Output is sorted by `id` so downstream export is reproducible; the
/// `BTreeMap` is the ordered index, not an incidental storage choice.
/// Both inputs may be empty (a failed fetch upstream yields an empty set).
pub fn build_recommendations(
    findings: &[RawFinding],
    metadata: &[RawMetadata],
) -> Vec<Recommendation> {
    let mut by_id: BTreeMap<String, Recommendation> = BTreeMap::new();

    for finding in findings {
        if !finding.is_unhealthy() {
            continue;
        }
        match by_id.get_mut(&finding.id) {
            Some(rec) => rec
                .affected_resources
                .push(finding.resource_name.clone()),
            None => {
                by_id.insert(finding.id.clone(), Recommendation::from_finding(finding));
            }
        }
    }

    for meta in metadata {
        if let Some(rec) = by_id.get_mut(&meta.id) {
            rec.description = meta.description.clone();
            rec.severity = meta.severity.clone();
            rec.remediation = meta.remediation.clone();
        }
    }

    by_id.into_values().collect()
}
