//! The dotnet commands issued during a run, and the upgrade-tool ensure step

use crate::domain::ToolStatus;
use crate::error::ToolError;
use crate::log::DiagnosticLog;
use crate::process::{CommandRunner, Echo, Invocation};
use std::path::{Path, PathBuf};

/// Default program used for every call
pub const DEFAULT_DOTNET: &str = "dotnet";

/// Default global tool package providing `dotnet outdated`
pub const DEFAULT_TOOL_PACKAGE: &str = "dotnet-outdated-tool";

/// Builds the invocations for one workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Program to run (`dotnet`)
    pub dotnet: String,
    /// Global tool package installed when `dotnet outdated` is missing
    pub tool_package: String,
    /// Working directory for every call
    pub working_dir: PathBuf,
}

impl Toolchain {
    /// Create a toolchain with default program names
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            dotnet: DEFAULT_DOTNET.to_string(),
            tool_package: DEFAULT_TOOL_PACKAGE.to_string(),
            working_dir: working_dir.as_ref().to_path_buf(),
        }
    }

    /// Override the dotnet program (builder pattern)
    pub fn with_dotnet(mut self, dotnet: impl Into<String>) -> Self {
        self.dotnet = dotnet.into();
        self
    }

    /// Override the upgrade tool package (builder pattern)
    pub fn with_tool_package(mut self, package: impl Into<String>) -> Self {
        self.tool_package = package.into();
        self
    }

    fn invocation<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(self.dotnet.as_str(), args, &self.working_dir)
    }

    /// Baseline package listing
    pub fn inventory(&self) -> Invocation {
        self.invocation(["list", "package"])
    }

    /// Outdated package listing as JSON
    pub fn outdated_check(&self) -> Invocation {
        self.invocation(["list", "package", "--outdated", "--format", "json"])
    }

    /// Version query used to detect the upgrade tool
    pub fn tool_probe(&self) -> Invocation {
        self.invocation(["outdated", "--version"])
    }

    /// Global install of the upgrade tool
    pub fn tool_install(&self) -> Invocation {
        self.invocation([
            "tool",
            "install",
            "--global",
            self.tool_package.as_str(),
        ])
    }

    /// Upgrade restricted to the given ids, one `--include` per id in order
    pub fn upgrade(&self, ids: &[String]) -> Invocation {
        let mut args = vec!["outdated".to_string(), "--upgrade".to_string()];
        for id in ids {
            args.push("--include".to_string());
            args.push(id.clone());
        }
        self.invocation(args)
    }
}

/// Makes sure `dotnet outdated` is available, installing it if the probe fails.
///
/// Safe to call repeatedly: once installed, the probe succeeds and nothing
/// else runs.
pub async fn ensure_upgrade_tool<R: CommandRunner + ?Sized>(
    runner: &R,
    toolchain: &Toolchain,
    log: &DiagnosticLog,
) -> Result<ToolStatus, ToolError> {
    let probe = runner.run(&toolchain.tool_probe(), Echo::Live, log).await;
    if probe.success() {
        return Ok(ToolStatus::AlreadyPresent);
    }

    log.info(&format!(
        "dotnet outdated not found, installing {}",
        toolchain.tool_package
    ));
    let invocation = toolchain.tool_install();
    let install = runner.run(&invocation, Echo::Live, log).await;
    if install.success() {
        Ok(ToolStatus::Installed)
    } else {
        log.exit_status(&invocation.program, &invocation.args, install.code);
        Err(ToolError::install_failed(&toolchain.tool_package, install.code))
    }
}
