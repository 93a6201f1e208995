//! The Keybase installation configuration file.

use kbl_common::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// The parts of Keybase's `config.json` this crate relies on.
///
/// Every other field is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstallationConfig {
    /// Username of the currently logged-in user.
    pub current_user: String,

    /// Raw per-user records keyed by username.
    #[serde(default)]
    pub users: BTreeMap<String, Value>,
}

impl InstallationConfig {
    /// Load the configuration from a file.
    ///
    /// # Errors
    /// - [`Error::NotInstalled`] if `path` is not an existing regular file
    /// - [`Error::Io`] if the file cannot be read for any other reason
    /// - [`Error::Json`] if the contents are not a valid configuration
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::NotInstalled {
                path: path.to_path_buf(),
            });
        }

        let bytes = read_config_bytes(path)?;
        let config = Self::from_slice(&bytes)?;
        debug!(
            path = %path.display(),
            users = config.users.len(),
            "loaded keybase config"
        );
        Ok(config)
    }

    /// Parse the configuration from a JSON string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse the configuration from raw bytes.
    ///
    /// Invalid UTF-8 is a parse failure like any other malformed document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Read the whole file; a file removed after the existence check is still
/// reported as not installed.
fn read_config_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => Error::NotInstalled {
            path: path.to_path_buf(),
        },
        _ => Error::Io(err),
    })
}
