//! Scripted process runner for testing.
//!
//! [`MockRunner`] answers commands from a table of canned stdout strings and
//! records every invocation, so probe behaviour can be checked without
//! touching the real process table or a real keybase install.
//!
//! # Example
//!
//! ```ignore
//! use kbl_core::mock_runner::MockRunner;
//! use kbl_core::probe::{ProbeStrategy, ProcessProbe};
//!
//! let runner = MockRunner::new()
//!     .on("pgrep keybase", "812\n")
//!     .on("keybase --version", "keybase version 6.2.4\n");
//! let probe = ProcessProbe::new(ProbeStrategy::Darwin, runner);
//! assert!(probe.is_running()?);
//! ```

use crate::probe::{CommandOutput, ProcessRunner};
use kbl_common::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// Runner that replays canned outputs keyed by command line.
///
/// The key is the program and its arguments joined by single spaces, e.g.
/// `"keybase --version"`. Commands with no script fail as if the program
/// were missing.
#[derive(Debug, Default)]
pub struct MockRunner {
    scripts: HashMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the stdout for a command line.
    pub fn on(mut self, command_line: &str, stdout: &str) -> Self {
        self.scripts
            .insert(command_line.to_string(), stdout.to_string());
        self
    }

    /// Command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.borrow_mut().push(line.clone());

        match self.scripts.get(&line) {
            Some(stdout) => Ok(CommandOutput {
                command: program.to_string(),
                args: args.iter().map(|s| s.to_string()).collect(),
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
                exit_code: Some(0),
            }),
            None => Err(Error::CommandFailed {
                command: program.to_string(),
                message: "no such file or directory (unscripted)".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_and_records() {
        let runner = MockRunner::new().on("tasklist", "keybase.exe");
        let out = runner.run("tasklist", &[]).unwrap();
        assert_eq!(out.stdout_str(), "keybase.exe");
        assert!(runner.run("pgrep", &["keybase"]).is_err());
        assert_eq!(runner.calls(), vec!["tasklist", "pgrep keybase"]);
    }
}
