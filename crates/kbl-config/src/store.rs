//! The loaded, immutable view of a local Keybase installation.
//!
//! A [`ConfigStore`] is built once by the caller and handed to whatever needs
//! it. There is no reload: a new store means a new load.

use kbl_common::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::installation::InstallationConfig;
use crate::mount::{MountLayout, Visibility};
use crate::paths::ConfigPaths;
use crate::user::User;

/// Immutable configuration state for one process.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config: InstallationConfig,
    layout: MountLayout,
    paths: Option<ConfigPaths>,
}

impl ConfigStore {
    /// Build a store from already-loaded parts.
    pub fn new(config: InstallationConfig, layout: MountLayout) -> Self {
        Self {
            config,
            layout,
            paths: None,
        }
    }

    /// Load the configuration file named by `paths`.
    ///
    /// # Errors
    /// [`kbl_common::Error::NotInstalled`] if the file is missing; I/O and
    /// parse failures are propagated unchanged.
    pub fn load(paths: &ConfigPaths) -> Result<Self> {
        let config = InstallationConfig::from_file(&paths.file)?;
        info!(
            current_user = %config.current_user,
            source = %paths.source,
            "keybase installation found"
        );
        Ok(Self {
            config,
            layout: MountLayout::default(),
            paths: Some(paths.clone()),
        })
    }

    /// Replace the KBFS mount layout.
    pub fn with_layout(mut self, layout: MountLayout) -> Self {
        self.layout = layout;
        self
    }

    /// The currently logged-in user, verbatim from the config.
    pub fn current_user(&self) -> &str {
        &self.config.current_user
    }

    /// All users known to the installation, one per config record.
    pub fn local_users(&self) -> Vec<User> {
        self.config.users.values().cloned().map(User::new).collect()
    }

    /// Users paired with the username they are keyed under.
    pub fn users_by_name(&self) -> impl Iterator<Item = (&str, User)> + '_ {
        self.config
            .users
            .iter()
            .map(|(name, record)| (name.as_str(), User::new(record.clone())))
    }

    /// The current user's directory under the given visibility.
    pub fn kbfs_dir(&self, visibility: Visibility) -> PathBuf {
        self.layout.user_dir(visibility, self.current_user())
    }

    /// The current user's private KBFS directory.
    pub fn private_dir(&self) -> PathBuf {
        self.kbfs_dir(Visibility::Private)
    }

    /// The current user's public KBFS directory.
    pub fn public_dir(&self) -> PathBuf {
        self.kbfs_dir(Visibility::Public)
    }

    pub fn config(&self) -> &InstallationConfig {
        &self.config
    }

    pub fn layout(&self) -> &MountLayout {
        &self.layout
    }

    /// Where the configuration was loaded from, if it came from a file.
    pub fn config_file(&self) -> Option<&Path> {
        self.paths.as_ref().map(|p| p.file.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(users: serde_json::Value) -> ConfigStore {
        let config: InstallationConfig = serde_json::from_value(json!({
            "current_user": "alice",
            "users": users,
        }))
        .unwrap();
        ConfigStore::new(config, MountLayout::default())
    }

    #[test]
    fn test_accessors() {
        let store = store(json!({"alice": {"name": "alice"}, "bob": {"name": "bob"}}));
        assert_eq!(store.current_user(), "alice");
        assert_eq!(store.local_users().len(), 2);
        assert_eq!(store.private_dir(), PathBuf::from("/keybase/private/alice"));
        assert_eq!(store.public_dir(), PathBuf::from("/keybase/public/alice"));
        assert!(store.config_file().is_none());
    }

    #[test]
    fn test_user_count_matches_mapping() {
        for n in 1..=5 {
            let users: serde_json::Map<String, serde_json::Value> = (0..n)
                .map(|i| (format!("user{i}"), json!({"name": format!("user{i}")})))
                .collect();
            let store = store(serde_json::Value::Object(users));
            assert_eq!(store.local_users().len(), n);
        }
    }

    #[test]
    fn test_users_by_name() {
        let store = store(json!({"bob": {"id": "b"}}));
        let pairs: Vec<_> = store.users_by_name().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "bob");
        assert_eq!(pairs[0].1.id(), Some("b"));
    }

    #[test]
    fn test_custom_layout() {
        let store = store(json!({})).with_layout(MountLayout::new("/kb"));
        assert_eq!(store.private_dir(), PathBuf::from("/kb/private/alice"));
    }
}
