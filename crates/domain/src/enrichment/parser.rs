//! Fixed-marker parser for completion responses.
//!
//! The completion prompt instructs the model to emit three named sections.
//! The markers are literal substrings and part of the wire contract with
//! the prompt in [`crate::enrichment::prompt`]; changing either breaks
//! responses produced against the other.

/// Section markers in canonical order.
pub const EXPLANATION_MARKER: &str = "**Explanation of the Vulnerability:**";
pub const REMEDIATION_MARKER: &str = "**Remediation Steps:**";
pub const CONTEXT_MARKER: &str = "**Context about the Impact of the Vulnerability:**";

/// Sections extracted from a completion response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedSections {
    pub explanation: String,
    pub remediation: String,
    pub context: String,
}

/// Extract the three marker-delimited sections from free-form text.
///
/// Each marker is located independently by first-occurrence substring
/// search; a marker that is absent yields an empty string for its section
/// and does not abort parsing of the others. A found marker's content runs
/// from just after the marker to the start of the next canonical-order
/// marker found after it (absent or earlier-positioned successors are
/// skipped, falling through to end-of-string), trimmed of surrounding
/// whitespace. Repeated or out-of-order markers are not detected; the
/// substring rule above fully defines behavior in that case.
pub fn parse_completion(response: &str) -> ParsedSections {
    let explanation_start = response.find(EXPLANATION_MARKER);
    let remediation_start = response.find(REMEDIATION_MARKER);
    let context_start = response.find(CONTEXT_MARKER);

    let explanation = extract_section(
        response,
        explanation_start,
        EXPLANATION_MARKER.len(),
        &[remediation_start, context_start],
    );
    let remediation = extract_section(
        response,
        remediation_start,
        REMEDIATION_MARKER.len(),
        &[context_start],
    );
    let context = extract_section(response, context_start, CONTEXT_MARKER.len(), &[]);

    ParsedSections {
        explanation,
        remediation,
        context,
    }
}

/// Slice one section out of `response`.
///
/// `successors` holds the located positions of the canonical-order marker
/// types that follow this one; the first that lies at or beyond the
/// content start ends the section, otherwise it runs to end-of-string.
fn extract_section(
    response: &str,
    start: Option<usize>,
    marker_len: usize,
    successors: &[Option<usize>],
) -> String {
    let Some(start) = start else {
        return String::new();
    };

    let content_start = start + marker_len;
    let content_end = successors
        .iter()
        .filter_map(|s| *s)
        .find(|&pos| pos >= content_start)
        .unwrap_or(response.len());

    response[content_start..content_end].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_three_sections_extracted_and_trimmed() {
        let response = "**Explanation of the Vulnerability:** A \
                        **Remediation Steps:** B \
                        **Context about the Impact of the Vulnerability:** C";

        let parsed = parse_completion(response);

        assert_eq!(parsed.explanation, "A");
        assert_eq!(parsed.remediation, "B");
        assert_eq!(parsed.context, "C");
    }

    #[test]
    fn multiline_sections_extracted() {
        let response = "Some preamble the model added.\n\
            **Explanation of the Vulnerability:**\n\
            Improper input validation can lead to SQL injection attacks.\n\n\
            **Remediation Steps:**\n\
            Use parameterized queries and validate all inputs.\n\n\
            **Context about the Impact of the Vulnerability:**\n\
            This vulnerability can lead to data breaches.\n";

        let parsed = parse_completion(response);

        assert_eq!(
            parsed.explanation,
            "Improper input validation can lead to SQL injection attacks."
        );
        assert_eq!(
            parsed.remediation,
            "Use parameterized queries and validate all inputs."
        );
        assert_eq!(
            parsed.context,
            "This vulnerability can lead to data breaches."
        );
    }

    #[test]
    fn missing_explanation_marker_yields_empty_explanation() {
        let response = "**Remediation Steps:** patch it \
                        **Context about the Impact of the Vulnerability:** bad";

        let parsed = parse_completion(response);

        assert_eq!(parsed.explanation, "");
        assert_eq!(parsed.remediation, "patch it");
        assert_eq!(parsed.context, "bad");
    }

    #[test]
    fn missing_middle_marker_falls_through_to_next() {
        let response = "**Explanation of the Vulnerability:** weak cipher \
                        **Context about the Impact of the Vulnerability:** exposure";

        let parsed = parse_completion(response);

        assert_eq!(parsed.explanation, "weak cipher");
        assert_eq!(parsed.remediation, "");
        assert_eq!(parsed.context, "exposure");
    }

    #[test]
    fn single_marker_runs_to_end_of_string() {
        let parsed = parse_completion("**Explanation of the Vulnerability:** everything after");
        assert_eq!(parsed.explanation, "everything after");
        assert_eq!(parsed.remediation, "");
        assert_eq!(parsed.context, "");

        let parsed = parse_completion("noise **Context about the Impact of the Vulnerability:** tail");
        assert_eq!(parsed.explanation, "");
        assert_eq!(parsed.remediation, "");
        assert_eq!(parsed.context, "tail");
    }

    #[test]
    fn no_markers_yield_all_empty() {
        let parsed = parse_completion("the model ignored the instructions entirely");
        assert_eq!(parsed, ParsedSections::default());
    }

    #[test]
    fn empty_input_yields_all_empty() {
        assert_eq!(parse_completion(""), ParsedSections::default());
    }

    #[test]
    fn out_of_canonical_order_markers_do_not_panic() {
        // The contract makes no promise about section content here, only
        // that the substring rule is applied as documented.
        let response = "**Remediation Steps:** r \
                        **Explanation of the Vulnerability:** e";

        let parsed = parse_completion(response);

        assert_eq!(parsed.explanation, "e");
        assert_eq!(parsed.remediation, "r **Explanation of the Vulnerability:** e");
        assert_eq!(parsed.context, "");
    }
}
