//! Keybase process detection and version query.
//!
//! Every call re-queries the OS; nothing is cached. Results are best effort:
//! the process may start or stop right after a check.

mod procfs;
mod runner;
mod strategy;

pub use procfs::{any_process_named, PROC_ROOT};
pub use runner::{CommandOutput, ProcessRunner, SystemRunner};
pub use strategy::ProbeStrategy;

use kbl_common::{Error, Result, KEYBASE_PROCESS_NAME};
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// Image name `tasklist` reports for the Windows client.
pub const WINDOWS_IMAGE_NAME: &str = "keybase.exe";

/// Flag that makes the client print its version.
pub const VERSION_FLAG: &str = "--version";

/// Point-in-time view of the keybase process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessStatus {
    /// Whether the process was detected.
    pub running: bool,

    /// Reported version; only queried when running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Queries whether keybase is running and which version it is.
#[derive(Debug, Clone)]
pub struct ProcessProbe<R> {
    strategy: ProbeStrategy,
    runner: R,
}

impl ProcessProbe<SystemRunner> {
    /// Probe for the current platform using real commands.
    pub fn system() -> Self {
        Self::new(ProbeStrategy::current(), SystemRunner::new())
    }
}

impl<R: ProcessRunner> ProcessProbe<R> {
    pub fn new(strategy: ProbeStrategy, runner: R) -> Self {
        Self { strategy, runner }
    }

    pub fn strategy(&self) -> &ProbeStrategy {
        &self.strategy
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Whether the keybase process is currently running.
    ///
    /// # Errors
    /// Fails if the platform query itself cannot run (e.g. `tasklist` is
    /// missing). A process exiting mid-scan is not an error.
    #[instrument(skip(self), fields(family = %self.strategy.family()))]
    pub fn is_running(&self) -> Result<bool> {
        let running = match &self.strategy {
            ProbeStrategy::Windows => {
                let out = self.runner.run("tasklist", &[])?;
                out.stdout_str().contains(WINDOWS_IMAGE_NAME)
            }
            ProbeStrategy::Darwin => {
                let out = self.runner.run("pgrep", &[KEYBASE_PROCESS_NAME])?;
                !out.stdout_str().trim().is_empty()
            }
            ProbeStrategy::OtherUnix { proc_root } => {
                any_process_named(proc_root, KEYBASE_PROCESS_NAME)?
            }
        };
        debug!(running, "keybase process check");
        Ok(running)
    }

    /// The version reported by `keybase --version`.
    ///
    /// Returns `Ok(None)` if the output has no version token.
    ///
    /// # Errors
    /// [`Error::NotRunning`] if keybase is not running; the binary is not
    /// invoked in that case.
    pub fn running_version(&self) -> Result<Option<String>> {
        if !self.is_running()? {
            return Err(Error::NotRunning);
        }
        self.query_version()
    }

    /// Running state plus version, with a single process check.
    ///
    /// If keybase is running but `keybase --version` cannot be started, the
    /// status still reports `running` with no version.
    pub fn status(&self) -> Result<ProcessStatus> {
        let running = self.is_running()?;
        let version = if running {
            match self.query_version() {
                Ok(version) => version,
                Err(Error::CommandFailed { command, message }) => {
                    warn!(%command, %message, "version query failed");
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };
        Ok(ProcessStatus { running, version })
    }

    fn query_version(&self) -> Result<Option<String>> {
        let out = self.runner.run(KEYBASE_PROCESS_NAME, &[VERSION_FLAG])?;
        let version = extract_version(&out.stdout_str());
        debug!(?version, "keybase version");
        Ok(version)
    }
}

/// Pull the version out of `keybase --version` output.
///
/// The client prints `keybase version <version>`; the version is the third
/// whitespace-separated field of the first line. No other validation.
pub fn extract_version(output: &str) -> Option<String> {
    output
        .lines()
        .next()?
        .split_whitespace()
        .nth(2)
        .map(str::to_string)
}
