//! Aggregates `dotnet list package --outdated --format json` output into candidates
//!
//! The document is walked as an untyped [`Value`] so that missing or
//! mistyped fields degrade to defaults instead of failing the whole listing.

use crate::domain::{compare_ids, UpgradeCandidate};
use serde_json::Value;
use std::collections::HashMap;

/// Placeholder for projects and frameworks without a usable name
pub const UNKNOWN: &str = "unknown";

/// Parses the payload and merges every top-level package into one candidate per id.
///
/// The result is sorted by id. Malformed JSON fails the whole operation.
pub fn normalize(payload: &str) -> Result<Vec<UpgradeCandidate>, serde_json::Error> {
    let document: Value = serde_json::from_str(payload)?;
    Ok(normalize_document(&document))
}

/// Merges packages from an already parsed document
pub fn normalize_document(document: &Value) -> Vec<UpgradeCandidate> {
    let mut by_id: HashMap<String, UpgradeCandidate> = HashMap::new();

    for project in array(document, "projects") {
        let project_name = name(project, "name")
            .or_else(|| name(project, "path"))
            .unwrap_or(UNKNOWN);

        for framework in array(project, "frameworks") {
            let framework_name = name(framework, "name").unwrap_or(UNKNOWN);
            let context = format!("{} ({})", project_name, framework_name);

            for package in array(framework, "topLevelPackages") {
                let Some(id) = package_id(package) else {
                    continue;
                };

                let candidate = by_id
                    .entry(id.to_string())
                    .or_insert_with(|| UpgradeCandidate::new(id));
                if let Some(resolved) = string(package, "resolvedVersion") {
                    candidate.add_resolved(resolved);
                }
                if let Some(latest) = string(package, "latestVersion") {
                    candidate.add_latest(latest);
                }
                candidate.add_context(context.as_str());
            }
        }
    }

    let mut candidates: Vec<UpgradeCandidate> = by_id.into_values().collect();
    candidates.sort_by(|a, b| compare_ids(&a.id, &b.id));
    candidates
}

/// `id`, falling back to `name`; a present but non-string `id` disqualifies the entry
fn package_id(package: &Value) -> Option<&str> {
    match package.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Some(id.as_str()),
        Some(Value::Null) | None => name(package, "name"),
        Some(_) => None,
    }
}

fn array<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter())
        .into_iter()
        .flatten()
}

fn string<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// Like [`string`], but an empty name counts as missing
fn name<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    string(value, key).filter(|s| !s.is_empty())
}
