//! Fuzz target for Keybase config.json parsing.
//!
//! Tests that installation config parsing handles arbitrary input
//! without panicking, and that every parsed config maps each user record
//! to exactly one user.

#![no_main]

use kbl_config::{ConfigStore, InstallationConfig, MountLayout};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = serde_json::from_slice::<InstallationConfig>(data) else {
        return;
    };
    let expected = config.users.len();
    let store = ConfigStore::new(config, MountLayout::default());
    assert_eq!(store.local_users().len(), expected);
    let _ = store.private_dir();
    let _ = store.public_dir();
});
