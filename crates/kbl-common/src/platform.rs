//! Operating system family detection.

use serde::{Deserialize, Serialize};

/// Operating system family (selects config location and probe strategy).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    Windows,
    #[serde(alias = "macos")]
    Darwin,
    /// Linux, the BSDs, and anything else unix-like.
    #[serde(rename = "other-unix")]
    OtherUnix,
}

impl PlatformFamily {
    /// Detect the family of the platform this binary was built for.
    pub fn detect() -> Self {
        if cfg!(windows) {
            PlatformFamily::Windows
        } else if cfg!(target_os = "macos") {
            PlatformFamily::Darwin
        } else {
            PlatformFamily::OtherUnix
        }
    }

    /// Stable lowercase name (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformFamily::Windows => "windows",
            PlatformFamily::Darwin => "darwin",
            PlatformFamily::OtherUnix => "other-unix",
        }
    }
}

impl std::fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
