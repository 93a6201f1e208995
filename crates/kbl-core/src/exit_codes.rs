//! Exit codes for the kbl CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0-1: Operational outcomes
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors

use kbl_common::Error;

/// Exit codes for kbl operations.
///
/// These codes are a stable contract for scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Operational Outcomes (0-1)
    // ========================================================================
    /// Success
    Clean = 0,

    /// Keybase is not running (the query itself worked)
    NotRunning = 1,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments
    ArgsError = 10,

    /// No Keybase config file at the resolved location
    NotInstalled = 11,

    /// Config file exists but could not be parsed
    ConfigError = 12,

    /// A platform command (tasklist, pgrep, keybase) could not be run
    CommandError = 13,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK",
            ExitCode::NotRunning => "OK_NOT_RUNNING",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::NotInstalled => "ERR_NOT_INSTALLED",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::CommandError => "ERR_COMMAND",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::NotInstalled { .. } => ExitCode::NotInstalled,
            Error::NotRunning => ExitCode::NotRunning,
            Error::Json(_) => ExitCode::ConfigError,
            Error::CommandFailed { .. } => ExitCode::CommandError,
            Error::ProcRead { .. } | Error::Io(_) => ExitCode::IoError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
