//! JSON output formatter for machine processing

use crate::domain::{RunOutcome, UpgradeCandidate};
use crate::output::OutputFormatter;
use crate::present::to_selection_item;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the outdated package list
#[derive(Serialize)]
struct JsonCandidates<'a> {
    /// Number of candidates
    total: usize,
    /// Candidates in list order
    packages: Vec<JsonCandidate<'a>>,
}

/// JSON representation of one candidate
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonCandidate<'a> {
    id: &'a str,
    resolved_versions: Vec<&'a str>,
    latest_versions: Vec<&'a str>,
    contexts: Vec<&'a str>,
    /// Same text the selection prompt shows
    description: String,
}

impl<'a> From<&'a UpgradeCandidate> for JsonCandidate<'a> {
    fn from(candidate: &'a UpgradeCandidate) -> Self {
        let strs = |set: &'a std::collections::BTreeSet<String>| {
            set.iter().map(String::as_str).collect::<Vec<_>>()
        };
        Self {
            id: &candidate.id,
            resolved_versions: strs(&candidate.resolved_versions),
            latest_versions: strs(&candidate.latest_versions),
            contexts: strs(&candidate.contexts),
            description: to_selection_item(candidate).description,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_candidates(
        &self,
        candidates: &[UpgradeCandidate],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonCandidates {
            total: candidates.len(),
            packages: candidates.iter().map(JsonCandidate::from).collect(),
        };
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }

    fn format_outcome(&self, outcome: &RunOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, outcome)?;
        writeln!(writer)
    }
}
