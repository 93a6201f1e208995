//! Process lookup via the /proc pseudo-filesystem.
//!
//! Used on unix systems other than macOS, where no external command is
//! needed: every `/proc/<pid>/comm` holds the process's command name.

use kbl_common::{Error, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, trace};

/// Default procfs mountpoint.
pub const PROC_ROOT: &str = "/proc";

/// Check whether any process under `proc_root` has command name `name`.
///
/// Stops at the first match. A pid directory that disappears between
/// listing and reading (its process exited) is a non-match. A missing
/// `proc_root` means there is nothing to match.
///
/// # Errors
/// - [`Error::Io`] if `proc_root` exists but cannot be listed
/// - [`Error::ProcRead`] if a `comm` file fails to read for any reason
///   other than its process having exited
pub fn any_process_named(proc_root: &Path, name: &str) -> Result<bool> {
    let entries = match fs::read_dir(proc_root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(root = %proc_root.display(), "procfs not mounted");
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    for entry in entries {
        let entry = entry?;
        let file_name = entry.file_name();

        // Only numeric directories are processes
        if file_name.to_string_lossy().parse::<u32>().is_err() {
            continue;
        }

        let comm_path = entry.path().join("comm");
        match read_comm(&comm_path)? {
            Some(comm) if comm == name => {
                debug!(pid = %file_name.to_string_lossy(), name, "found process");
                return Ok(true);
            }
            Some(_) => {}
            None => trace!(path = %comm_path.display(), "process exited during scan"),
        }
    }

    Ok(false)
}

/// Read a `comm` file with its trailing newline stripped.
///
/// Returns `Ok(None)` when the process is gone.
fn read_comm(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(chomp(content))),
        Err(e) if is_process_gone(&e) => Ok(None),
        Err(source) => Err(Error::ProcRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Errors a read of `/proc/<pid>/*` produces once `<pid>` has exited.
fn is_process_gone(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound || is_esrch(err)
}

#[cfg(unix)]
fn is_esrch(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::ESRCH)
}

#[cfg(not(unix))]
fn is_esrch(_err: &io::Error) -> bool {
    false
}

fn chomp(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
    s
}
