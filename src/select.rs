//! Selection of the candidates to upgrade
//!
//! Interactive selection uses dialoguer's multi-select prompt. Preset
//! selection covers `--all` and `--only` for non-interactive use.

use crate::cli::CliArgs;
use crate::domain::SelectionItem;
use crate::error::SelectionError;
use crate::log::DiagnosticLog;
use dialoguer::{theme::ColorfulTheme, MultiSelect};

/// Trait for choosing which items to act on
pub trait Selector {
    /// Returns the labels of the chosen items; empty means "do nothing"
    fn select(
        &self,
        items: &[SelectionItem],
        log: &DiagnosticLog,
    ) -> Result<Vec<String>, SelectionError>;
}

/// Terminal multi-select prompt
pub struct InteractiveSelector {
    theme: ColorfulTheme,
}

impl InteractiveSelector {
    /// Create a new interactive selector
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for InteractiveSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector for InteractiveSelector {
    fn select(
        &self,
        items: &[SelectionItem],
        _log: &DiagnosticLog,
    ) -> Result<Vec<String>, SelectionError> {
        let lines: Vec<String> = items.iter().map(SelectionItem::prompt_line).collect();

        // Esc or q cancels, which is the same as choosing nothing
        let chosen = MultiSelect::with_theme(&self.theme)
            .with_prompt("Packages to upgrade (space to toggle, enter to confirm)")
            .items(&lines)
            .interact_opt()
            .map_err(|e| SelectionError::prompt(e.to_string()))?
            .unwrap_or_default();

        Ok(chosen.into_iter().map(|i| items[i].label.clone()).collect())
    }
}

/// Non-interactive selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetSelector {
    /// Every item, in list order
    All,
    /// The named ids, in the order given
    Only(Vec<String>),
}

impl PresetSelector {
    /// The preset named by `--all` or `--only`, if either was given
    pub fn from_cli(args: &CliArgs) -> Option<Self> {
        if !args.is_preset_selection() {
            None
        } else if args.all {
            Some(PresetSelector::All)
        } else {
            Some(PresetSelector::Only(args.only.clone()))
        }
    }
}

impl Selector for PresetSelector {
    fn select(
        &self,
        items: &[SelectionItem],
        log: &DiagnosticLog,
    ) -> Result<Vec<String>, SelectionError> {
        match self {
            PresetSelector::All => Ok(items.iter().map(|i| i.label.clone()).collect()),
            PresetSelector::Only(ids) => {
                let mut chosen = Vec::new();
                for id in ids {
                    if items.iter().any(|i| &i.label == id) {
                        chosen.push(id.clone());
                    } else {
                        log.info(&format!("{} is not outdated, ignoring", id));
                    }
                }
                Ok(chosen)
            }
        }
    }
}
