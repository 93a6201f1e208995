//! kbl core library.
//!
//! This library provides the runtime side of local Keybase discovery:
//! - Process probing (is keybase running, which version)
//! - The [`LocalContext`] facade tying configuration and probing together
//! - Logging setup and CLI exit codes
//!
//! Configuration discovery and loading live in `kbl-config`. The binary
//! entry point is in `main.rs`.

pub mod context;
pub mod exit_codes;
pub mod logging;
pub mod probe;

pub use context::LocalContext;
pub use probe::{ProbeStrategy, ProcessProbe, ProcessRunner, ProcessStatus, SystemRunner};

// Re-export test utilities for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mock_runner;
