//! kbl configuration discovery and loading.
//!
//! This crate provides:
//! - Platform-specific discovery of Keybase's `config.json`
//! - A one-time, immutable load of that file ([`ConfigStore`])
//! - KBFS mount path derivation for the logged-in user

pub mod installation;
pub mod mount;
pub mod paths;
pub mod store;
pub mod user;

pub use installation::InstallationConfig;
pub use mount::{MountLayout, Visibility, KBFS_MOUNT};
pub use paths::{resolve_current, resolve_paths, ConfigPaths, ConfigSource, PathInputs};
pub use store::ConfigStore;
pub use user::User;
