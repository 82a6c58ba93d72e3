//! CLI argument parsing module for nupick

use crate::toolchain::{DEFAULT_DOTNET, DEFAULT_TOOL_PACKAGE};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Pick which outdated NuGet packages to upgrade
#[derive(Parser, Debug, Clone)]
#[command(
    name = "nupick",
    version,
    about = "Pick which outdated NuGet packages to upgrade"
)]
pub struct CliArgs {
    /// Workspace root containing the solution or project (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // General options
    /// Dry run mode - show the upgrade command without running it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// List outdated packages and exit
    #[arg(long)]
    pub list: bool,

    /// Print the package list as JSON (with --list)
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Enable verbose output
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - hide the diagnostic log
    #[arg(short, long)]
    pub quiet: bool,

    /// Also append the diagnostic log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // Selection
    /// Upgrade every outdated package without prompting
    #[arg(long, conflicts_with = "only")]
    pub all: bool,

    /// Upgrade only these packages without prompting (can be specified multiple times)
    #[arg(long, value_name = "ID", action = ArgAction::Append)]
    pub only: Vec<String>,

    /// Never offer these packages (can be specified multiple times)
    #[arg(long, value_name = "ID", action = ArgAction::Append)]
    pub exclude: Vec<String>,

    // Toolchain
    /// dotnet executable to run
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_DOTNET)]
    pub dotnet: String,

    /// Global tool package installed when `dotnet outdated` is missing
    #[arg(long, value_name = "ID", default_value = DEFAULT_TOOL_PACKAGE)]
    pub tool_package: String,
}

impl CliArgs {
    /// Check if selection happens without a prompt
    pub fn is_preset_selection(&self) -> bool {
        self.all || !self.only.is_empty()
    }

    /// Check if the diagnostic log goes to the terminal
    pub fn log_to_terminal(&self) -> bool {
        !self.quiet && !self.json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["nupick"]);
        assert_eq!(args.path, PathBuf::from("."));
        assert!(!args.dry_run);
        assert!(!args.list);
        assert!(!args.json);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(args.log_file.is_none());
        assert!(!args.all);
        assert!(args.only.is_empty());
        assert!(args.exclude.is_empty());
        assert_eq!(args.dotnet, "dotnet");
        assert_eq!(args.tool_package, "dotnet-outdated-tool");
    }

    #[test]
    fn test_path_argument() {
        let args = CliArgs::parse_from(["nupick", "/src/MySolution"]);
        assert_eq!(args.path, PathBuf::from("/src/MySolution"));
    }

    #[test]
    fn test_dry_run_flags() {
        assert!(CliArgs::parse_from(["nupick", "-n"]).dry_run);
        assert!(CliArgs::parse_from(["nupick", "--dry-run"]).dry_run);
    }

    #[test]
    fn test_quiet_flags() {
        assert!(CliArgs::parse_from(["nupick", "-q"]).quiet);
        assert!(CliArgs::parse_from(["nupick", "--quiet"]).quiet);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(CliArgs::try_parse_from(["nupick", "--quiet", "--verbose"]).is_err());
    }

    #[test]
    fn test_json_requires_list() {
        assert!(CliArgs::try_parse_from(["nupick", "--json"]).is_err());
        let args = CliArgs::parse_from(["nupick", "--list", "--json"]);
        assert!(args.list && args.json);
        assert!(!args.log_to_terminal());
    }

    #[test]
    fn test_only_multiple() {
        let args = CliArgs::parse_from(["nupick", "--only", "Serilog", "--only", "Polly"]);
        assert_eq!(args.only, vec!["Serilog", "Polly"]);
        assert!(args.is_preset_selection());
    }

    #[test]
    fn test_all_conflicts_with_only() {
        assert!(CliArgs::try_parse_from(["nupick", "--all", "--only", "Serilog"]).is_err());
        assert!(CliArgs::parse_from(["nupick", "--all"]).is_preset_selection());
    }

    #[test]
    fn test_exclude_multiple() {
        let args = CliArgs::parse_from(["nupick", "--exclude", "xunit", "--exclude", "Moq"]);
        assert_eq!(args.exclude, vec!["xunit", "Moq"]);
        assert!(!args.is_preset_selection());
    }

    #[test]
    fn test_toolchain_overrides() {
        let args = CliArgs::parse_from([
            "nupick",
            "--dotnet",
            "/usr/local/share/dotnet/dotnet",
            "--tool-package",
            "dotnet-outdated-tool::4.6.0",
        ]);
        assert_eq!(args.dotnet, "/usr/local/share/dotnet/dotnet");
        assert_eq!(args.tool_package, "dotnet-outdated-tool::4.6.0");
    }

    #[test]
    fn test_log_file() {
        let args = CliArgs::parse_from(["nupick", "--log-file", "nupick.log"]);
        assert_eq!(args.log_file, Some(PathBuf::from("nupick.log")));
        assert!(args.log_to_terminal());
    }

    #[test]
    fn test_combined_flags() {
        let args = CliArgs::parse_from([
            "nupick",
            "/src/App",
            "-n",
            "--verbose",
            "--exclude",
            "xunit",
            "--all",
        ]);
        assert_eq!(args.path, PathBuf::from("/src/App"));
        assert!(args.dry_run);
        assert!(args.verbose);
        assert!(args.all);
        assert_eq!(args.exclude, vec!["xunit"]);
    }
}
