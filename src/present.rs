//! Turns candidates into selection items and resolves the user's choice

use crate::domain::{SelectionItem, UpgradeCandidate, CONTEXT_SEPARATOR, MULTIPLE_VERSIONS};
use std::collections::HashSet;

/// Builds the selection item for a candidate.
///
/// Ambiguous candidates never get a representative version picked for them.
pub fn to_selection_item(candidate: &UpgradeCandidate) -> SelectionItem {
    let description = match candidate.version_delta() {
        Some((resolved, latest)) => format!("{} -> {}", resolved, latest),
        None => MULTIPLE_VERSIONS.to_string(),
    };
    let detail = candidate
        .contexts
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR);

    SelectionItem {
        label: candidate.id.clone(),
        description,
        detail,
    }
}

/// Builds selection items for all candidates, keeping their order
pub fn to_selection_items(candidates: &[UpgradeCandidate]) -> Vec<SelectionItem> {
    candidates.iter().map(to_selection_item).collect()
}

/// Keeps the chosen labels that name a candidate, in the order they were chosen
pub fn filter_selected(candidates: &[UpgradeCandidate], labels: &[String]) -> Vec<String> {
    let known: HashSet<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
    let mut seen = HashSet::new();
    labels
        .iter()
        .filter(|label| known.contains(label.as_str()))
        .filter(|label| seen.insert(label.as_str()))
        .cloned()
        .collect()
}

/// Drops candidates whose id appears in `exclude`
pub fn exclude_candidates(
    candidates: Vec<UpgradeCandidate>,
    exclude: &[String],
) -> Vec<UpgradeCandidate> {
    if exclude.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|c| !exclude.iter().any(|e| e == &c.id))
        .collect()
}
