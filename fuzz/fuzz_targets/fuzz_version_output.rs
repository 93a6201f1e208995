//! Fuzz target for `keybase --version` output parsing.

#![no_main]

use kbl_core::probe::extract_version;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let output = String::from_utf8_lossy(data);
    if let Some(version) = extract_version(&output) {
        assert!(!version.is_empty());
        assert!(!version.contains(char::is_whitespace));
    }
});
