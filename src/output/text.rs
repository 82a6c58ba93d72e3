//! Text output formatter for human-readable display
//!
//! This module provides:
//! - The outdated package table with version deltas and ambiguity markers
//! - Project/framework contexts in verbose mode
//! - A one-line notification for every run outcome

use crate::domain::{RunOutcome, SelectionItem, ToolStatus, UpgradeCandidate, MULTIPLE_VERSIONS};
use crate::output::{OutputFormatter, Verbosity};
use crate::present::to_selection_item;
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Format a single package line
    fn format_item(
        &self,
        item: &SelectionItem,
        max_label_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return writeln!(writer, "{}", item.label);
        }

        if self.color {
            let label = format!("{:width$}", item.label, width = max_label_len);
            let description = if item.description == MULTIPLE_VERSIONS {
                item.description.yellow().to_string()
            } else {
                item.description.bright_white().to_string()
            };
            writeln!(writer, "  {} {}", label.bold(), description)?;
        } else {
            writeln!(
                writer,
                "  {:width$} {}",
                item.label,
                item.description,
                width = max_label_len
            )?;
        }

        if self.verbosity == Verbosity::Verbose && !item.detail.is_empty() {
            let indent = " ".repeat(max_label_len + 3);
            if self.color {
                writeln!(writer, "{}{}", indent, item.detail.dimmed())?;
            } else {
                writeln!(writer, "{}{}", indent, item.detail)?;
            }
        }
        Ok(())
    }

    fn paint(&self, text: &str, style: fn(&str) -> colored::ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_candidates(
        &self,
        candidates: &[UpgradeCandidate],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if candidates.is_empty() {
            if self.verbosity != Verbosity::Quiet {
                writeln!(writer, "{}", self.paint("No outdated packages.", |s| s.green()))?;
            }
            return Ok(());
        }

        let items: Vec<SelectionItem> = candidates.iter().map(to_selection_item).collect();
        let max_label_len = items.iter().map(|i| i.label.len()).max().unwrap_or(0).max(20);

        if self.verbosity != Verbosity::Quiet {
            let count = candidates.len();
            let header = format!(
                "{} outdated {}",
                count,
                if count == 1 { "package" } else { "packages" }
            );
            writeln!(writer, "{}", self.paint(&header, |s| s.bold()))?;
        }

        for item in &items {
            self.format_item(item, max_label_len, writer)?;
        }
        Ok(())
    }

    fn format_outcome(&self, outcome: &RunOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        match outcome {
            RunOutcome::NothingOutdated => {
                writeln!(writer, "{}", self.paint("No outdated packages.", |s| s.green()))
            }
            RunOutcome::NothingSelected => {
                writeln!(
                    writer,
                    "{}",
                    self.paint("Nothing selected, no changes made.", |s| s.dimmed())
                )
            }
            RunOutcome::DryRun { ids, command } => {
                let prefix = self.paint("(dry-run)", |s| s.cyan());
                writeln!(
                    writer,
                    "{} Would upgrade {}: {}",
                    prefix,
                    plural(ids.len()),
                    ids.join(", ")
                )?;
                if self.verbosity != Verbosity::Quiet {
                    writeln!(writer, "  {}", command)?;
                }
                Ok(())
            }
            RunOutcome::Upgraded { ids, tool } => {
                let done = self.paint("Upgraded", |s| s.green().bold());
                writeln!(writer, "{} {}: {}", done, plural(ids.len()), ids.join(", "))?;
                if *tool == ToolStatus::Installed && self.verbosity != Verbosity::Quiet {
                    writeln!(
                        writer,
                        "  {}",
                        self.paint("(installed dotnet outdated first)", |s| s.dimmed())
                    )?;
                }
                Ok(())
            }
        }
    }
}

fn plural(count: usize) -> String {
    if count == 1 {
        "1 package".to_string()
    } else {
        format!("{} packages", count)
    }
}
