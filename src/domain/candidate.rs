//! Upgrade candidate aggregated across projects and target frameworks

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// A package that has at least one newer version available somewhere in the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeCandidate {
    /// Package identifier (case-sensitive)
    pub id: String,
    /// Versions currently resolved across all contexts
    pub resolved_versions: BTreeSet<String>,
    /// Versions available as upgrades across all contexts
    pub latest_versions: BTreeSet<String>,
    /// `"<project> (<framework>)"` strings this package was observed in
    pub contexts: BTreeSet<String>,
}

impl UpgradeCandidate {
    /// Creates an empty candidate for the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resolved_versions: BTreeSet::new(),
            latest_versions: BTreeSet::new(),
            contexts: BTreeSet::new(),
        }
    }

    /// Records a resolved version
    pub fn add_resolved(&mut self, version: impl Into<String>) {
        self.resolved_versions.insert(version.into());
    }

    /// Records a latest version
    pub fn add_latest(&mut self, version: impl Into<String>) {
        self.latest_versions.insert(version.into());
    }

    /// Records a project/framework context
    pub fn add_context(&mut self, context: impl Into<String>) {
        self.contexts.insert(context.into());
    }

    /// Returns the single resolved and latest version pair, if both are unambiguous
    pub fn version_delta(&self) -> Option<(&str, &str)> {
        match (single(&self.resolved_versions), single(&self.latest_versions)) {
            (Some(resolved), Some(latest)) => Some((resolved, latest)),
            _ => None,
        }
    }
}

fn single(set: &BTreeSet<String>) -> Option<&str> {
    if set.len() == 1 {
        set.iter().next().map(String::as_str)
    } else {
        None
    }
}

/// Orders package ids the way a user-facing list expects.
///
/// Case is ignored first so `Microsoft.*` and `microsoft.*` sit together.
/// Ids differing only in case put lowercase first, as culture collation does.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
