//! Read-only view of a candidate shown in the selection prompt

use serde::{Deserialize, Serialize};

/// Description used when the candidate's versions disagree across contexts
pub const MULTIPLE_VERSIONS: &str = "multiple versions";

/// Separator between contexts in [`SelectionItem::detail`]
pub const CONTEXT_SEPARATOR: &str = "; ";

/// One entry of the selection list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionItem {
    /// Package id; this is the value handed back by the selector
    pub label: String,
    /// `"<resolved> -> <latest>"` or [`MULTIPLE_VERSIONS`]
    pub description: String,
    /// Joined contexts
    pub detail: String,
}

impl SelectionItem {
    /// Renders the item as a single prompt line
    pub fn prompt_line(&self) -> String {
        format!("{}  {}  [{}]", self.label, self.description, self.detail)
    }
}
