//! External command execution
//!
//! This module provides:
//! - The `CommandRunner` seam the orchestrator issues calls through
//! - A tokio-backed runner that forwards output live to the diagnostic log
//! - Start failures folded into exit status 1

use crate::log::{DiagnosticLog, Stream};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Exit status reported when a program could not be started
pub const START_FAILURE_CODE: i32 = 1;

/// A program, its arguments and the directory to run it in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl Invocation {
    /// Creates a new invocation
    pub fn new<I, S>(program: impl Into<String>, args: I, working_dir: impl AsRef<Path>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: working_dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the command line as a single string
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Whether a call's output is forwarded to the diagnostic log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    /// Forward each line as it arrives
    Live,
    /// Capture only; the output is data, not a log
    Silent,
}

/// What a finished call produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Returns true if the process exited with status zero
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Trait for issuing external calls
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the invocation to completion.
    ///
    /// Never fails: a program that cannot be started is reported through the
    /// log and yields [`START_FAILURE_CODE`].
    async fn run(&self, invocation: &Invocation, echo: Echo, log: &DiagnosticLog)
        -> ProcessOutput;
}

/// Runner that spawns real processes
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        echo: Echo,
        log: &DiagnosticLog,
    ) -> ProcessOutput {
        log.command(&invocation.program, &invocation.args);

        let spawned = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                let message = format!("failed to start {}: {}", invocation.program, e);
                log.error(&message);
                return ProcessOutput {
                    code: START_FAILURE_CODE,
                    stdout: String::new(),
                    stderr: message,
                };
            }
        };

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (stdout, stderr) = tokio::join!(
            drain(stdout, Stream::Stdout, echo, log),
            drain(stderr, Stream::Stderr, echo, log),
        );

        let code = match child.wait().await {
            Ok(status) => status.code().unwrap_or(START_FAILURE_CODE),
            Err(e) => {
                log.error(&format!("failed to wait for {}: {}", invocation.program, e));
                START_FAILURE_CODE
            }
        };

        ProcessOutput {
            code,
            stdout,
            stderr,
        }
    }
}

/// Reads a pipe to the end, forwarding lines as they arrive when echo is live.
///
/// Bytes that are not valid UTF-8 are replaced rather than ending the read,
/// so the child never sees its pipe closed early.
async fn drain<R>(pipe: Option<R>, stream: Stream, echo: Echo, log: &DiagnosticLog) -> String
where
    R: AsyncRead + Unpin,
{
    let mut captured = String::new();
    let Some(pipe) = pipe else {
        return captured;
    };

    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(trim_line_end(&buf));
                if echo == Echo::Live {
                    log.output(stream, &line);
                }
                captured.push_str(&line);
                captured.push('\n');
            }
            Err(e) => {
                log.error(&format!("failed to read process output: {}", e));
                break;
            }
        }
    }
    captured
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
