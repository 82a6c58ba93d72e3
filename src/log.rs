//! Append-only diagnostic log
//!
//! Every external call is echoed here along with its live output so the user
//! can see what the toolchain did when a step fails. Nothing written here is
//! ever read back by the program.

use colored::Colorize;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// Which stream a forwarded line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

#[derive(Default)]
struct Sinks {
    /// Echo to the terminal's stderr
    terminal: bool,
    /// Optional append-only log file
    file: Option<File>,
    /// Set once a write to `file` has failed and been reported
    file_failed: bool,
    /// In-memory copy, used by tests and by callers that want to inspect the log
    memory: Option<Vec<String>>,
}

/// Diagnostic log shared by all steps of one run
pub struct DiagnosticLog {
    sinks: Mutex<Sinks>,
}

impl DiagnosticLog {
    /// Creates a log that writes to stderr when `terminal` is true
    pub fn new(terminal: bool) -> Self {
        Self {
            sinks: Mutex::new(Sinks {
                terminal,
                ..Sinks::default()
            }),
        }
    }

    /// Creates a log that only keeps lines in memory
    pub fn in_memory() -> Self {
        Self {
            sinks: Mutex::new(Sinks {
                memory: Some(Vec::new()),
                ..Sinks::default()
            }),
        }
    }

    /// Also append every line to the given file
    pub fn with_file(self, path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        if let Ok(mut sinks) = self.sinks.lock() {
            sinks.file = Some(file);
        }
        Ok(self)
    }

    /// Echoes an issued command
    pub fn command(&self, program: &str, args: &[String]) {
        let line = if args.is_empty() {
            format!("> {}", program)
        } else {
            format!("> {} {}", program, args.join(" "))
        };
        self.write(&line, |l| l.cyan().bold().to_string());
    }

    /// Records the exit status of a call that did not succeed
    pub fn exit_status(&self, program: &str, args: &[String], code: i32) {
        let line = if args.is_empty() {
            format!("< {} exited with code {}", program, code)
        } else {
            format!("< {} {} exited with code {}", program, args.join(" "), code)
        };
        self.write(&line, |l| l.red().to_string());
    }

    /// Forwards one line of process output
    pub fn output(&self, stream: Stream, line: &str) {
        match stream {
            Stream::Stdout => self.write(line, |l| l.dimmed().to_string()),
            Stream::Stderr => self.write(line, |l| l.yellow().dimmed().to_string()),
        }
    }

    /// Writes a plain informational line
    pub fn info(&self, line: &str) {
        self.write(line, str::to_string);
    }

    /// Writes an error line
    pub fn error(&self, line: &str) {
        self.write(line, |l| l.red().to_string());
    }

    /// Writes a block of text verbatim, line by line
    pub fn raw(&self, text: &str) {
        for line in text.lines() {
            self.write(line, str::to_string);
        }
    }

    /// Returns the lines kept in memory, if this log keeps any
    pub fn lines(&self) -> Vec<String> {
        self.sinks
            .lock()
            .ok()
            .and_then(|sinks| sinks.memory.clone())
            .unwrap_or_default()
    }

    fn write(&self, line: &str, style: impl Fn(&str) -> String) {
        // A poisoned lock only means another writer panicked mid-line
        let mut guard = match self.sinks.lock() {
            Ok(sinks) => sinks,
            Err(poisoned) => poisoned.into_inner(),
        };
        let sinks = &mut *guard;
        if sinks.terminal {
            eprintln!("{}", style(line));
        }
        if let Some(file) = sinks.file.as_mut() {
            if let Err(e) = writeln!(file, "{}", line) {
                if !sinks.file_failed {
                    sinks.file_failed = true;
                    eprintln!("{} failed to write log file: {}", "Warning:".yellow().bold(), e);
                }
            }
        }
        if let Some(memory) = sinks.memory.as_mut() {
            memory.push(line.to_string());
        }
    }
}
