//! Isolates the JSON object inside command output that may carry log noise
//!
//! This is a brace scan, not a parser: it assumes no braces appear in the
//! noise before the payload or after its closing brace.

/// Returns the span from the first `{` to the last `}` inclusive.
///
/// The input is returned unchanged when either brace is missing or they are
/// out of order, leaving the failure to the JSON parser.
pub fn extract_payload(text: &str) -> &str {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return text;
    };
    if end <= start {
        return text;
    }
    &text[start..=end]
}
