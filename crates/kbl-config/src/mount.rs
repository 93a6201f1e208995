//! KBFS mount layout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default KBFS mountpoint.
pub const KBFS_MOUNT: &str = "/keybase";

/// Visibility namespace under the KBFS mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Public,
}

impl Visibility {
    /// Path segment for this visibility.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Public => "public",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where KBFS is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountLayout {
    root: PathBuf,
}

impl Default for MountLayout {
    fn default() -> Self {
        Self::new(KBFS_MOUNT)
    }
}

impl MountLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<visibility>/<user>`. Does not touch the filesystem.
    pub fn user_dir(&self, visibility: Visibility, user: &str) -> PathBuf {
        self.root.join(visibility.as_str()).join(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root() {
        assert_eq!(MountLayout::default().root(), Path::new("/keybase"));
    }

    #[test]
    fn test_user_dir() {
        let layout = MountLayout::default();
        assert_eq!(
            layout.user_dir(Visibility::Private, "alice"),
            PathBuf::from("/keybase/private/alice")
        );
        assert_eq!(
            layout.user_dir(Visibility::Public, "alice"),
            PathBuf::from("/keybase/public/alice")
        );
    }

    #[test]
    fn test_custom_root() {
        let layout = MountLayout::new("/mnt/kbfs");
        assert_eq!(
            layout.user_dir(Visibility::Public, "bob"),
            PathBuf::from("/mnt/kbfs/public/bob")
        );
    }
}
