//! Upgrade orchestrator for coordinating the entire run
//!
//! This module provides:
//! - Workflow coordination: inventory → outdated check → normalize → select → ensure tool → upgrade
//! - Short-circuit on the first failing step
//! - Dry-run mode support
//! - Candidate exclusion before selection

use crate::cli::CliArgs;
use crate::domain::{RunOutcome, UpgradeCandidate};
use crate::error::{AppError, PreconditionError, ProcessError};
use crate::inventory::{parse_payload, select_payload};
use crate::log::DiagnosticLog;
use crate::present::{exclude_candidates, filter_selected, to_selection_items};
use crate::process::{CommandRunner, Echo, Invocation, ProcessOutput, SystemRunner};
use crate::progress::Progress;
use crate::select::Selector;
use crate::toolchain::{ensure_upgrade_tool, Toolchain};
use std::path::{Path, PathBuf};

/// Configuration for the orchestrator
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// Stop after selection and report the upgrade command instead of running it
    pub dry_run: bool,
    /// Package ids removed before selection
    pub exclude: Vec<String>,
    /// Show a spinner during the silent outdated check
    pub show_progress: bool,
}

impl OrchestratorConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Self {
        Self {
            dry_run: args.dry_run,
            exclude: args.exclude.clone(),
            show_progress: !args.quiet && !args.json,
        }
    }
}

/// Orchestrator for coordinating one run
pub struct Orchestrator<R: CommandRunner> {
    /// Commands issued against the workspace
    toolchain: Toolchain,
    /// Run options
    config: OrchestratorConfig,
    /// Executes the external calls
    runner: R,
}

/// Checks that the workspace root exists before any call is made
pub fn resolve_workspace(path: &Path) -> Result<PathBuf, PreconditionError> {
    if path.is_dir() {
        Ok(path.to_path_buf())
    } else {
        Err(PreconditionError::no_workspace(path))
    }
}

impl Orchestrator<SystemRunner> {
    /// Create an orchestrator for the workspace named on the command line
    pub fn new(args: &CliArgs) -> Result<Self, PreconditionError> {
        let workspace = resolve_workspace(&args.path)?;
        let toolchain = Toolchain::new(workspace)
            .with_dotnet(args.dotnet.as_str())
            .with_tool_package(args.tool_package.as_str());
        Ok(Self::with_runner(
            toolchain,
            OrchestratorConfig::from_cli(args),
            SystemRunner::new(),
        ))
    }
}

impl<R: CommandRunner> Orchestrator<R> {
    /// Create an orchestrator with a custom runner (for testing)
    pub fn with_runner(toolchain: Toolchain, config: OrchestratorConfig, runner: R) -> Self {
        Self {
            toolchain,
            config,
            runner,
        }
    }

    /// The commands this orchestrator issues
    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Run the whole workflow
    pub async fn run(
        &self,
        selector: &dyn Selector,
        log: &DiagnosticLog,
    ) -> Result<RunOutcome, AppError> {
        let candidates = self.collect_candidates(log).await?;
        if candidates.is_empty() {
            log.info("no outdated packages");
            return Ok(RunOutcome::NothingOutdated);
        }

        let items = to_selection_items(&candidates);
        let labels = selector.select(&items, log).map_err(|e| {
            log.error("selection aborted, nothing will be upgraded");
            e
        })?;
        let ids = filter_selected(&candidates, &labels);
        if ids.is_empty() {
            log.info("nothing selected");
            return Ok(RunOutcome::NothingSelected);
        }

        let upgrade = self.toolchain.upgrade(&ids);
        if self.config.dry_run {
            log.info(&format!("dry run, would execute: {}", upgrade.display()));
            return Ok(RunOutcome::DryRun {
                ids,
                command: upgrade.display(),
            });
        }

        let tool = ensure_upgrade_tool(&self.runner, &self.toolchain, log).await?;
        log.info(&format!("dotnet outdated {}", tool));
        self.step(&upgrade, "upgrade", Echo::Live, log).await?;

        Ok(RunOutcome::Upgraded { ids, tool })
    }

    /// Runs the inventory and outdated check and returns the sorted candidates
    pub async fn collect_candidates(
        &self,
        log: &DiagnosticLog,
    ) -> Result<Vec<UpgradeCandidate>, AppError> {
        self.step(&self.toolchain.inventory(), "package inventory", Echo::Live, log)
            .await?;

        let mut progress = Progress::new(self.config.show_progress);
        progress.spinner("Checking for outdated packages...");
        let checked = self
            .step(&self.toolchain.outdated_check(), "outdated check", Echo::Silent, log)
            .await;
        progress.finish_and_clear();
        let output = checked?;

        let raw = select_payload(&output.stdout, &output.stderr).map_err(|e| {
            log.error("outdated check wrote nothing to stdout or stderr");
            e
        })?;

        let candidates = parse_payload(raw).map_err(|e| {
            log.error("outdated check returned output that is not a package listing:");
            log.raw(raw);
            e
        })?;

        Ok(exclude_candidates(candidates, &self.config.exclude))
    }

    /// Runs one call and turns a non-zero exit into a step failure
    async fn step(
        &self,
        invocation: &Invocation,
        name: &str,
        echo: Echo,
        log: &DiagnosticLog,
    ) -> Result<ProcessOutput, ProcessError> {
        let output = self.runner.run(invocation, echo, log).await;
        if output.success() {
            return Ok(output);
        }

        // Silent output is still the only clue to why the step failed
        if echo == Echo::Silent {
            log.raw(&output.stdout);
            log.raw(&output.stderr);
        }
        log.exit_status(&invocation.program, &invocation.args, output.code);
        Err(ProcessError::failed(name, output.code))
    }
}
