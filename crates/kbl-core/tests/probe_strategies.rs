//! Probe behaviour through the public API, with a hand-rolled runner and a
//! synthetic procfs tree.

use kbl_common::Error;
use kbl_core::probe::{CommandOutput, ProbeStrategy, ProcessProbe, ProcessRunner};
use std::cell::Cell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Runner that answers every command with the same stdout and counts calls.
struct FixedRunner {
    stdout: &'static str,
    calls: Cell<usize>,
}

impl FixedRunner {
    fn new(stdout: &'static str) -> Self {
        Self {
            stdout,
            calls: Cell::new(0),
        }
    }
}

impl ProcessRunner for FixedRunner {
    fn run(&self, program: &str, args: &[&str]) -> kbl_common::Result<CommandOutput> {
        self.calls.set(self.calls.get() + 1);
        Ok(CommandOutput {
            command: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            stdout: self.stdout.as_bytes().to_vec(),
            stderr: Vec::new(),
            exit_code: Some(0),
        })
    }
}

fn fake_proc(entries: &[(&str, Option<&str>)]) -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    for (pid, comm) in entries {
        let dir = tmp.path().join(pid);
        fs::create_dir_all(&dir).expect("pid dir");
        if let Some(comm) = comm {
            fs::write(dir.join("comm"), comm).expect("comm");
        }
    }
    tmp
}

fn procfs_probe(root: &Path, runner: FixedRunner) -> ProcessProbe<FixedRunner> {
    ProcessProbe::new(ProbeStrategy::procfs(root), runner)
}

#[test]
fn procfs_scan_tolerates_vanished_processes() {
    // Pids 2 and 3 were listed but exited before their comm was read.
    let proc_root = fake_proc(&[
        ("1", Some("init\n")),
        ("2", None),
        ("3", None),
        ("4", Some("sshd\n")),
    ]);
    let probe = procfs_probe(proc_root.path(), FixedRunner::new(""));
    assert!(!probe.is_running().expect("scan completes"));
}

#[test]
fn procfs_scan_finds_keybase_among_vanished() {
    let proc_root = fake_proc(&[("2", None), ("1500", Some("keybase\n"))]);
    let probe = procfs_probe(
        proc_root.path(),
        FixedRunner::new("keybase version 6.0.2-20230101 extra\n"),
    );
    assert!(probe.is_running().expect("scan completes"));
    assert_eq!(
        probe.running_version().expect("version"),
        Some("6.0.2-20230101".to_string())
    );
    assert_eq!(probe.runner().calls.get(), 1);
}

#[test]
fn version_is_refused_when_not_running() {
    let proc_root = fake_proc(&[("1", Some("init\n"))]);
    let probe = procfs_probe(proc_root.path(), FixedRunner::new("keybase version 1.0.0\n"));
    let err = probe.running_version().expect_err("not running");
    assert!(matches!(err, Error::NotRunning));
    assert!(err.is_recoverable());
    assert_eq!(probe.runner().calls.get(), 0);
}

#[test]
fn status_follows_process_table_changes() {
    let proc_root = fake_proc(&[("1", Some("init\n"))]);
    let probe = procfs_probe(proc_root.path(), FixedRunner::new("keybase version 2.0.0\n"));
    assert!(!probe.status().expect("status").running);

    // keybase starts; the next query sees it because nothing is cached.
    let dir = proc_root.path().join("2001");
    fs::create_dir_all(&dir).expect("pid dir");
    fs::write(dir.join("comm"), "keybase\n").expect("comm");
    let status = probe.status().expect("status");
    assert!(status.running);
    assert_eq!(status.version.as_deref(), Some("2.0.0"));

    // ...and stops again.
    fs::remove_dir_all(&dir).expect("remove pid dir");
    assert!(!probe.is_running().expect("scan completes"));
}

#[test]
fn windows_strategy_matches_image_name() {
    let probe = ProcessProbe::new(
        ProbeStrategy::Windows,
        FixedRunner::new("Image Name                     PID\n========\nkeybase.exe                   4410\n"),
    );
    assert!(probe.is_running().expect("tasklist parsed"));
}

#[test]
fn darwin_strategy_reads_pgrep_output() {
    let running = ProcessProbe::new(ProbeStrategy::Darwin, FixedRunner::new("512\n513\n"));
    assert!(running.is_running().expect("pgrep parsed"));

    let stopped = ProcessProbe::new(ProbeStrategy::Darwin, FixedRunner::new("\n"));
    assert!(!stopped.is_running().expect("pgrep parsed"));
}
