//! Configuration path discovery.
//!
//! Exactly one rule applies per platform family; there is no search order
//! and no existence check here. A missing file is reported later, when the
//! configuration is loaded.

use kbl_common::PlatformFamily;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding the Windows local application data dir.
pub const ENV_LOCAL_APP_DATA: &str = "LOCALAPPDATA";

/// Standard config file name inside the Keybase config dir.
pub const CONFIG_FILENAME: &str = "config.json";

/// Directory name used under `LOCALAPPDATA` and `Application Support`.
const APP_DIR_TITLE: &str = "Keybase";

/// Directory name used under `~/.config`.
const APP_DIR_LOWER: &str = "keybase";

/// Where a configuration path came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    /// Derived from the platform rule.
    #[default]
    Platform,

    /// Explicitly provided by the caller (CLI argument or environment).
    Explicit,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Platform => write!(f, "platform default"),
            ConfigSource::Explicit => write!(f, "explicit path"),
        }
    }
}

/// Inputs the platform rules depend on.
#[derive(Debug, Clone, Default)]
pub struct PathInputs {
    /// The user's home directory.
    pub home: Option<PathBuf>,

    /// Value of `LOCALAPPDATA` (only consulted on Windows).
    pub local_app_data: Option<OsString>,
}

impl PathInputs {
    /// Read the inputs from the current process environment.
    pub fn from_env() -> Self {
        Self {
            home: dirs::home_dir(),
            local_app_data: std::env::var_os(ENV_LOCAL_APP_DATA),
        }
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_local_app_data(mut self, value: impl Into<OsString>) -> Self {
        self.local_app_data = Some(value.into());
        self
    }

    fn home_join(&self, rel: &str) -> PathBuf {
        // No home: leave the path relative; the later open fails.
        match &self.home {
            Some(home) => home.join(rel),
            None => PathBuf::from(rel),
        }
    }
}

/// Resolved configuration directory and file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigPaths {
    /// Keybase configuration directory.
    pub dir: PathBuf,

    /// Keybase configuration file (`<dir>/config.json`).
    pub file: PathBuf,

    /// How the paths were obtained (for diagnostics).
    pub source: ConfigSource,
}

impl ConfigPaths {
    /// Paths for an explicitly chosen config file.
    pub fn from_file(file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        let dir = file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            dir,
            file,
            source: ConfigSource::Explicit,
        }
    }
}

/// Compute the Keybase configuration directory for a platform family.
///
/// - Windows: `<LOCALAPPDATA>/Keybase`
/// - Darwin: `~/Library/Application Support/Keybase`
/// - other unix: `~/.config/keybase`
pub fn config_dir(family: PlatformFamily, inputs: &PathInputs) -> PathBuf {
    match family {
        PlatformFamily::Windows => match &inputs.local_app_data {
            Some(base) => PathBuf::from(base).join(APP_DIR_TITLE),
            // Unset expands to the empty string, leaving `/Keybase`.
            None => PathBuf::from("/").join(APP_DIR_TITLE),
        },
        PlatformFamily::Darwin => inputs
            .home_join("Library")
            .join("Application Support")
            .join(APP_DIR_TITLE),
        PlatformFamily::OtherUnix => inputs.home_join(".config").join(APP_DIR_LOWER),
    }
}

/// Resolve the configuration paths for a platform family.
pub fn resolve_paths(family: PlatformFamily, inputs: &PathInputs) -> ConfigPaths {
    let dir = config_dir(family, inputs);
    let file = dir.join(CONFIG_FILENAME);
    debug!(%family, file = %file.display(), "resolved keybase config path");
    ConfigPaths {
        dir,
        file,
        source: ConfigSource::Platform,
    }
}

/// Resolve the configuration paths for the current platform and environment.
pub fn resolve_current() -> ConfigPaths {
    resolve_paths(PlatformFamily::detect(), &PathInputs::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home_u() -> PathInputs {
        PathInputs::default().with_home("/home/u")
    }

    #[test]
    fn test_other_unix_rule() {
        let paths = resolve_paths(PlatformFamily::OtherUnix, &home_u());
        assert_eq!(paths.dir, PathBuf::from("/home/u/.config/keybase"));
        assert_eq!(
            paths.file,
            PathBuf::from("/home/u/.config/keybase/config.json")
        );
        assert_eq!(paths.source, ConfigSource::Platform);
    }

    #[test]
    fn test_darwin_rule() {
        let inputs = PathInputs::default().with_home("/Users/u");
        let paths = resolve_paths(PlatformFamily::Darwin, &inputs);
        assert_eq!(
            paths.file,
            PathBuf::from("/Users/u/Library/Application Support/Keybase/config.json")
        );
    }

    #[test]
    fn test_windows_rule_uses_local_app_data() {
        let inputs = home_u().with_local_app_data("/appdata/local");
        let paths = resolve_paths(PlatformFamily::Windows, &inputs);
        assert_eq!(paths.dir, PathBuf::from("/appdata/local").join("Keybase"));
        assert_eq!(paths.file, paths.dir.join("config.json"));
    }

    #[test]
    fn test_windows_ignores_home() {
        let with_home = resolve_paths(
            PlatformFamily::Windows,
            &home_u().with_local_app_data("/lad"),
        );
        let without_home = resolve_paths(
            PlatformFamily::Windows,
            &PathInputs::default().with_local_app_data("/lad"),
        );
        assert_eq!(with_home, without_home);
    }

    #[test]
    fn test_windows_missing_env_still_builds_path() {
        let paths = resolve_paths(PlatformFamily::Windows, &home_u());
        assert_eq!(paths.dir, PathBuf::from("/Keybase"));
        assert!(paths.file.ends_with("Keybase/config.json"));
    }

    #[test]
    fn test_missing_home_is_relative() {
        let paths = resolve_paths(PlatformFamily::OtherUnix, &PathInputs::default());
        assert_eq!(paths.file, PathBuf::from(".config/keybase/config.json"));
    }

    #[test]
    fn test_from_file_is_explicit() {
        let paths = ConfigPaths::from_file("/tmp/kb/config.json");
        assert_eq!(paths.dir, PathBuf::from("/tmp/kb"));
        assert_eq!(paths.source, ConfigSource::Explicit);
        assert_eq!(paths.source.to_string(), "explicit path");
    }
}
