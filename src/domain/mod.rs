//! Core domain models for nupick
//!
//! This module contains the fundamental types used throughout the application:
//! - Upgrade candidates aggregated from the outdated-package listing
//! - Selection items shown to the user
//! - Terminal run outcomes

mod candidate;
mod outcome;
mod selection;

pub use candidate::{compare_ids, UpgradeCandidate};
pub use outcome::{RunOutcome, ToolStatus};
pub use selection::{SelectionItem, CONTEXT_SEPARATOR, MULTIPLE_VERSIONS};
