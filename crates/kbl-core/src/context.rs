//! The local Keybase installation as a single injectable value.
//!
//! [`LocalContext`] is built once by the caller (normally at startup) and
//! passed to whatever needs it. Construction is the only fallible step for
//! the configuration side: if the config file is missing the context is
//! never created.

use kbl_common::{PlatformFamily, Result};
use kbl_config::{resolve_paths, ConfigPaths, ConfigStore, PathInputs};
use tracing::debug;

use crate::probe::{ProbeStrategy, ProcessProbe, ProcessRunner, SystemRunner};

/// Loaded configuration plus a process probe.
#[derive(Debug)]
pub struct LocalContext<R = SystemRunner> {
    store: ConfigStore,
    probe: ProcessProbe<R>,
}

impl LocalContext<SystemRunner> {
    /// Discover and load the installation for the current platform.
    ///
    /// # Errors
    /// [`kbl_common::Error::NotInstalled`] if no config file exists at the
    /// platform location; parse failures propagate unchanged.
    pub fn init() -> Result<Self> {
        let family = PlatformFamily::detect();
        let paths = resolve_paths(family, &PathInputs::from_env());
        Self::init_with_paths(&paths, family)
    }

    /// Load the installation from explicit paths.
    pub fn init_with_paths(paths: &ConfigPaths, family: PlatformFamily) -> Result<Self> {
        debug!(%family, file = %paths.file.display(), "initializing local context");
        let store = ConfigStore::load(paths)?;
        let probe = ProcessProbe::new(ProbeStrategy::for_family(family), SystemRunner::new());
        Ok(Self::from_parts(store, probe))
    }
}

impl<R: ProcessRunner> LocalContext<R> {
    /// Assemble a context from already-built parts.
    pub fn from_parts(store: ConfigStore, probe: ProcessProbe<R>) -> Self {
        Self { store, probe }
    }

    pub fn config(&self) -> &ConfigStore {
        &self.store
    }

    pub fn probe(&self) -> &ProcessProbe<R> {
        &self.probe
    }
}
