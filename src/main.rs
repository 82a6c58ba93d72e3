//! nupick - Pick which outdated NuGet packages to upgrade
//!
//! Lists outdated packages across every project and target framework of a
//! .NET workspace, lets the user choose, and upgrades only those.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use nupick::cli::CliArgs;
use nupick::log::DiagnosticLog;
use nupick::orchestrator::Orchestrator;
use nupick::output::{create_formatter, OutputConfig};
use nupick::select::{InteractiveSelector, PresetSelector, Selector};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let mut log = DiagnosticLog::new(args.log_to_terminal());
    if let Some(path) = &args.log_file {
        log = log
            .with_file(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
    }

    if args.verbose {
        log.info(&format!("nupick v{}", env!("CARGO_PKG_VERSION")));
        log.info(&format!("Workspace: {}", args.path.display()));
        if args.dry_run {
            log.info("Mode: dry-run");
        }
    }

    let orchestrator = Orchestrator::new(&args).map_err(|e| {
        log.error(&format!("{} is not a directory, no commands run", args.path.display()));
        e
    })?;

    let formatter = create_formatter(OutputConfig::from_cli(args.json, args.verbose, args.quiet));

    if args.list {
        let candidates = orchestrator.collect_candidates(&log).await?;
        let mut stdout = io::stdout().lock();
        formatter.format_candidates(&candidates, &mut stdout)?;
        stdout.flush()?;
        return Ok(ExitCode::SUCCESS);
    }

    let selector: Box<dyn Selector> = match PresetSelector::from_cli(&args) {
        Some(preset) => Box::new(preset),
        None => Box::new(InteractiveSelector::new()),
    };

    let outcome = orchestrator.run(selector.as_ref(), &log).await?;

    let mut stdout = io::stdout().lock();
    formatter.format_outcome(&outcome, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
