use crate::enrichment::parser::{CONTEXT_MARKER, EXPLANATION_MARKER, REMEDIATION_MARKER};
use crate::recommendation::entity::Recommendation;

/// Build the enrichment prompt for a recommendation.
///
/// Deterministic: the same recommendation always produces the same prompt,
/// which together with the fixed request seed keeps completions
/// reproducible. The section names embedded here are the literal markers
/// the response parser searches for.
pub fn build_prompt(recommendation: &Recommendation) -> String {
    format!(
        "The following is a cloud security vulnerability report. You are an expert in \
cloud security and need to provide additional info to your team, so try and enrich it \
with additional details:\n\
The sections should be named {EXPLANATION_MARKER}, {REMEDIATION_MARKER}, {CONTEXT_MARKER}\n\
- Provide an expanded explanation of the vulnerability.\n\
- Suggest remediation steps, but keep it kinda short because it needs to be done on a \
lot of vulnerabilities.\n\
- Provide context about the impact of the vulnerability.\n\
- If you are given \"Unknown\", create the three sections regardless with your own \
information. Do not leave anything blank.\n\
\n\
Vulnerability Name: {name}\n\
Description: {description}\n\
Remediation: {remediation}\n\
\n\
Response:\n",
        name = recommendation.display_name,
        description = recommendation.description,
        remediation = recommendation.remediation,
    )
}
