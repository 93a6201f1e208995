//! External command execution.
//!
//! Probing shells out to platform tools (`tasklist`, `pgrep`) and to the
//! `keybase` binary itself. That goes through [`ProcessRunner`] so the
//! probe can be driven by scripted outputs in tests.
//!
//! Commands run synchronously with no timeout: a hung command hangs the
//! caller.

use kbl_common::{Error, Result};
use serde::Serialize;
use std::process::Command;
use tracing::{debug, trace};

/// Output from a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    /// Command that was executed.
    pub command: String,

    /// Arguments passed to the command.
    pub args: Vec<String>,

    /// Standard output.
    pub stdout: Vec<u8>,

    /// Standard error.
    pub stderr: Vec<u8>,

    /// Exit code (if the process exited normally).
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    /// Get stdout as string (lossy UTF-8 conversion).
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Get stderr as string (lossy UTF-8 conversion).
    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Check if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Capability to run an external command to completion.
pub trait ProcessRunner {
    /// Run `program` with `args`, blocking until it exits.
    ///
    /// A non-zero exit is not an error; only failing to start the command is.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        (**self).run(program, args)
    }
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for Box<R> {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        (**self).run(program, args)
    }
}

/// Runs commands on the host via `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!(program, ?args, "running command");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| Error::CommandFailed {
                command: program.to_string(),
                message: e.to_string(),
            })?;

        let out = CommandOutput {
            command: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.status.code(),
        };
        trace!(
            program,
            exit_code = ?out.exit_code,
            stdout_bytes = out.stdout.len(),
            "command finished"
        );
        // Not an error: pgrep exits 1 when nothing matches.
        if !out.success() {
            debug!(
                program,
                exit_code = ?out.exit_code,
                stderr = %out.stderr_str().trim(),
                "command exited unsuccessfully"
            );
        }

        Ok(out)
    }
}
