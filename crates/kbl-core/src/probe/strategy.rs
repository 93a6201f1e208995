//! Per-platform process detection strategies.

use kbl_common::PlatformFamily;
use std::path::PathBuf;

use super::procfs::PROC_ROOT;

/// How to tell whether the keybase process is running.
///
/// Chosen once (usually from [`PlatformFamily::detect`]) and injected into
/// the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStrategy {
    /// List tasks with `tasklist` and look for the executable name.
    Windows,
    /// Look the process up by name with `pgrep`.
    Darwin,
    /// Scan `<proc_root>/<pid>/comm`.
    OtherUnix { proc_root: PathBuf },
}

impl ProbeStrategy {
    /// Strategy for a platform family, using the default procfs root.
    pub fn for_family(family: PlatformFamily) -> Self {
        match family {
            PlatformFamily::Windows => ProbeStrategy::Windows,
            PlatformFamily::Darwin => ProbeStrategy::Darwin,
            PlatformFamily::OtherUnix => ProbeStrategy::procfs(PROC_ROOT),
        }
    }

    /// Strategy for the platform this binary was built for.
    pub fn current() -> Self {
        Self::for_family(PlatformFamily::detect())
    }

    /// procfs strategy rooted somewhere other than `/proc`.
    pub fn procfs(proc_root: impl Into<PathBuf>) -> Self {
        ProbeStrategy::OtherUnix {
            proc_root: proc_root.into(),
        }
    }

    pub fn family(&self) -> PlatformFamily {
        match self {
            ProbeStrategy::Windows => PlatformFamily::Windows,
            ProbeStrategy::Darwin => PlatformFamily::Darwin,
            ProbeStrategy::OtherUnix { .. } => PlatformFamily::OtherUnix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_family_round_trips() {
        for family in [
            PlatformFamily::Windows,
            PlatformFamily::Darwin,
            PlatformFamily::OtherUnix,
        ] {
            assert_eq!(ProbeStrategy::for_family(family).family(), family);
        }
    }

    #[test]
    fn test_other_unix_defaults_to_proc() {
        assert_eq!(
            ProbeStrategy::for_family(PlatformFamily::OtherUnix),
            ProbeStrategy::OtherUnix {
                proc_root: PathBuf::from("/proc")
            }
        );
    }
}
