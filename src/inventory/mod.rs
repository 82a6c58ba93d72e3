//! Outdated-package inventory handling
//!
//! This module provides:
//! - Payload selection between stdout and stderr
//! - Brace-scan extraction of the JSON object from noisy output
//! - Normalization into one deduplicated candidate per package id

mod extract;
mod normalize;

pub use extract::extract_payload;
pub use normalize::{normalize, normalize_document, UNKNOWN};

use crate::domain::UpgradeCandidate;
use crate::error::PayloadError;

/// Picks the stream that carries the JSON listing.
///
/// Some SDK versions write the listing to stderr alongside their
/// diagnostics, so stderr is used whenever stdout is blank.
pub fn select_payload<'a>(stdout: &'a str, stderr: &'a str) -> Result<&'a str, PayloadError> {
    if !stdout.trim().is_empty() {
        Ok(stdout)
    } else if !stderr.trim().is_empty() {
        Ok(stderr)
    } else {
        Err(PayloadError::Empty)
    }
}

/// Parses raw command output into sorted candidates.
///
/// The raw text is tried as-is first; only if that fails is the brace-scanned
/// span parsed, and its error is the one reported.
pub fn parse_payload(raw: &str) -> Result<Vec<UpgradeCandidate>, PayloadError> {
    if let Ok(candidates) = normalize(raw) {
        return Ok(candidates);
    }
    normalize(extract_payload(raw)).map_err(PayloadError::parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_payload_prefers_stdout() {
        assert_eq!(select_payload("{\"a\":1}", "warning").unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_select_payload_falls_back_to_stderr() {
        assert_eq!(select_payload("  \n", "{\"a\":1}").unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_select_payload_both_blank() {
        let err = select_payload("", " \t\n").unwrap_err();
        assert!(matches!(err, PayloadError::Empty));
    }

    #[test]
    fn test_parse_payload_clean() {
        let raw = r#"{"projects":[{"name":"App","frameworks":[{"name":"net8.0","topLevelPackages":[{"id":"Serilog","resolvedVersion":"3.0.0","latestVersion":"3.1.1"}]}]}]}"#;
        let candidates = parse_payload(raw).unwrap();
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_parse_payload_with_noise() {
        let raw = "  Determining projects to restore...\n{\"projects\":[{\"name\":\"App\",\"frameworks\":[{\"name\":\"net8.0\",\"topLevelPackages\":[{\"id\":\"Serilog\"}]}]}]}\nDone.\n";
        let candidates = parse_payload(raw).unwrap();
        assert_eq!(candidates[0].id, "Serilog");
    }

    #[test]
    fn test_parse_payload_error_carries_reason() {
        let err = parse_payload("error: MSB1003: Specify a project or solution file.").unwrap_err();
        match &err {
            PayloadError::Parse { source } => {
                assert!(err.to_string().contains(&source.to_string()));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
