//! Installation scope: where the kernel spec and frontend config land.

use std::fmt;
use std::path::{Path, PathBuf};

/// Scope flags as given on the command line.
///
/// The parser guarantees at most one of them is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeFlags {
    pub user: bool,
    pub sys_prefix: bool,
    pub prefix: Option<PathBuf>,
}

/// Resolved installation scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallScope {
    /// Per-user Jupyter directories.
    User,
    /// The interpreter's own `sys.prefix` (virtualenv / conda env).
    SysPrefix(PathBuf),
    /// A caller-supplied prefix.
    Prefix(PathBuf),
    /// System-wide Jupyter directories.
    System,
}

impl InstallScope {
    /// Whether the per-user location is targeted.
    pub fn user(&self) -> bool {
        matches!(self, InstallScope::User)
    }

    /// The install prefix, if the scope is prefix-based.
    pub fn prefix(&self) -> Option<&Path> {
        match self {
            InstallScope::SysPrefix(path) | InstallScope::Prefix(path) => Some(path),
            InstallScope::User | InstallScope::System => None,
        }
    }
}

impl fmt::Display for InstallScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallScope::User => write!(f, "user"),
            InstallScope::SysPrefix(path) => write!(f, "sys-prefix ({})", path.display()),
            InstallScope::Prefix(path) => write!(f, "prefix ({})", path.display()),
            InstallScope::System => write!(f, "system"),
        }
    }
}

/// Resolve the effective scope.
///
/// Precedence: `--sys-prefix`, then `--prefix`, then `--user`. With no flag
/// the scope is per-user unless running as root, which installs system-wide.
pub fn resolve_scope(flags: &ScopeFlags, sys_prefix: &Path, is_root: bool) -> InstallScope {
    if flags.sys_prefix {
        return InstallScope::SysPrefix(sys_prefix.to_path_buf());
    }
    if let Some(prefix) = flags.prefix.as_ref().filter(|p| !p.as_os_str().is_empty()) {
        return InstallScope::Prefix(prefix.clone());
    }
    if flags.user || !is_root {
        return InstallScope::User;
    }
    InstallScope::System
}

/// Whether the process runs with an effective uid of 0.
#[cfg(unix)]
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

/// Non-Unix platforms are never treated as elevated.
#[cfg(not(unix))]
pub fn is_root() -> bool {
    false
}
