//! Terminal states of a run

use serde::Serialize;
use std::fmt;

/// Result of ensuring the upgrade tool is available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    /// The version probe succeeded
    AlreadyPresent,
    /// The tool was installed during this run
    Installed,
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolStatus::AlreadyPresent => write!(f, "already present"),
            ToolStatus::Installed => write!(f, "installed"),
        }
    }
}

/// Successful end of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The outdated check reported no packages
    NothingOutdated,
    /// The user selected nothing or cancelled the prompt
    NothingSelected,
    /// Dry-run stopped before touching the tool; carries the command that would run
    DryRun { ids: Vec<String>, command: String },
    /// The upgrade tool ran successfully for the selected ids
    Upgraded { ids: Vec<String>, tool: ToolStatus },
}
