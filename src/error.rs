//! Application error types using thiserror
//!
//! Error hierarchy:
//! - PreconditionError: The run cannot start (no workspace)
//! - ProcessError: An external command could not start or exited non-zero
//! - PayloadError: The outdated listing was empty or not valid JSON
//! - ToolError: The upgrade tool could not be installed
//! - SelectionError: The selection prompt failed

use std::path::PathBuf;
use thiserror::Error;

/// Hint appended to failures whose details only live in the diagnostic log
const SEE_LOG: &str = "see the diagnostic log above for details";

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Precondition failures
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// External process failures
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Structured payload failures
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// Upgrade tool failures
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Selection prompt failures
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Errors raised before any external call is made
#[derive(Error, Debug)]
pub enum PreconditionError {
    /// The workspace root does not exist or is not a directory
    #[error("no workspace found at {path}")]
    NoWorkspace { path: PathBuf },
}

/// Errors related to external command execution
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The command ran (or failed to start) and did not exit with status zero
    #[error("{step} failed with exit code {code}; {hint}", hint = SEE_LOG)]
    Failed { step: String, code: i32 },
}

/// Errors related to the outdated-package payload
#[derive(Error, Debug)]
pub enum PayloadError {
    /// Neither stdout nor stderr carried anything
    #[error("no payload received from the outdated check")]
    Empty,

    /// The payload was present but not valid JSON
    #[error("failed to parse outdated package listing: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

/// Errors related to ensuring the upgrade tool is installed
#[derive(Error, Debug)]
pub enum ToolError {
    /// The install command exited non-zero
    #[error("failed to install {package} (exit code {code}); {hint}", hint = SEE_LOG)]
    InstallFailed { package: String, code: i32 },
}

/// Errors related to the interactive selection prompt
#[derive(Error, Debug)]
pub enum SelectionError {
    /// The terminal prompt could not be shown
    #[error("selection prompt failed: {message}")]
    Prompt { message: String },
}

impl PreconditionError {
    /// Creates a new NoWorkspace error
    pub fn no_workspace(path: impl Into<PathBuf>) -> Self {
        PreconditionError::NoWorkspace { path: path.into() }
    }
}

impl ProcessError {
    /// Creates a new Failed error
    pub fn failed(step: impl Into<String>, code: i32) -> Self {
        ProcessError::Failed {
            step: step.into(),
            code,
        }
    }
}

impl PayloadError {
    /// Creates a new Parse error
    pub fn parse(source: serde_json::Error) -> Self {
        PayloadError::Parse { source }
    }
}

impl ToolError {
    /// Creates a new InstallFailed error
    pub fn install_failed(package: impl Into<String>, code: i32) -> Self {
        ToolError::InstallFailed {
            package: package.into(),
            code,
        }
    }
}

impl SelectionError {
    /// Creates a new Prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        SelectionError::Prompt {
            message: message.into(),
        }
    }
}
