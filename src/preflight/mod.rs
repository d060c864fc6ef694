//! Preflight checks run before anything is installed.
//!
//! The kernel is launched by a Python interpreter, so the installer needs
//! that interpreter's absolute path (for `kernel.json`) and its `sys.prefix`
//! (for `--sys-prefix`). Both come from a single probe, which also rejects
//! interpreters too old to run the kernel.
//!
//! # Example
//!
//! ```rust,no_run
//! use sos_notebook_install::preflight::probe_python;
//!
//! match probe_python(None) {
//!     Ok(python) => println!("using {}", python.executable.display()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Environment variable naming the interpreter to register.
pub const PYTHON_ENV_VAR: &str = "SOS_PYTHON";

/// Interpreter names tried on `PATH` when [`PYTHON_ENV_VAR`] is unset.
pub const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Oldest interpreter the kernel runs on.
pub const MIN_PYTHON: (u32, u32) = (3, 6);

const PROBE_SCRIPT: &str = "import sys\n\
print(sys.version_info[0], sys.version_info[1], sys.version_info[2])\n\
print(sys.prefix)\n\
print(sys.executable)\n";

/// Failures that make the host unsuitable for installing the kernel.
#[derive(Debug, Error)]
pub enum PreflightError {
    #[error(
        "no Python interpreter found (tried {tried}); set {} to its path",
        PYTHON_ENV_VAR
    )]
    InterpreterNotFound { tried: String },

    #[error("failed to run Python interpreter '{path}': {source}")]
    ProbeFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Python interpreter '{path}' exited with {status}: {stderr}")]
    ProbeExited {
        path: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("unexpected output from Python interpreter '{path}': {detail}")]
    MalformedProbe { path: PathBuf, detail: String },

    #[error(
        "sos requires Python {}.{} or higher. Please upgrade your Python {major}.{minor}.{micro}.",
        MIN_PYTHON.0,
        MIN_PYTHON.1
    )]
    UnsupportedPython { major: u32, minor: u32, micro: u32 },
}

/// What the installer needs to know about the kernel's interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonInfo {
    pub executable: PathBuf,
    pub prefix: PathBuf,
    pub version: (u32, u32, u32),
}

/// Locate the interpreter, probe it and check its version.
///
/// `explicit` takes precedence over [`PYTHON_ENV_VAR`], which takes
/// precedence over searching `PATH` for [`PYTHON_CANDIDATES`].
pub fn probe_python(explicit: Option<OsString>) -> Result<PythonInfo, PreflightError> {
    let explicit = explicit.or_else(|| std::env::var_os(PYTHON_ENV_VAR));
    let interpreter = locate_interpreter(explicit)?;
    tracing::debug!(interpreter = %interpreter.display(), "probing python interpreter");

    let output = Command::new(&interpreter)
        .arg("-c")
        .arg(PROBE_SCRIPT)
        .output()
        .map_err(|source| PreflightError::ProbeFailed {
            path: interpreter.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(PreflightError::ProbeExited {
            path: interpreter,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let info = parse_probe_output(&interpreter, &stdout)?;
    check_python_version(info.version)?;
    tracing::info!(
        executable = %info.executable.display(),
        prefix = %info.prefix.display(),
        "python {}.{}.{}",
        info.version.0,
        info.version.1,
        info.version.2
    );
    Ok(info)
}

fn locate_interpreter(explicit: Option<OsString>) -> Result<PathBuf, PreflightError> {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return which::which(&path).map_err(|_| PreflightError::InterpreterNotFound {
            tried: PathBuf::from(path).display().to_string(),
        });
    }

    PYTHON_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or_else(|| PreflightError::InterpreterNotFound {
            tried: PYTHON_CANDIDATES.join(", "),
        })
}

/// Parse the three probe lines: version triple, `sys.prefix`, `sys.executable`.
///
/// An empty `sys.executable` (embedded interpreters) falls back to the path
/// the probe was launched with.
pub fn parse_probe_output(interpreter: &Path, stdout: &str) -> Result<PythonInfo, PreflightError> {
    let malformed = |detail: &str| PreflightError::MalformedProbe {
        path: interpreter.to_path_buf(),
        detail: detail.to_string(),
    };

    let mut lines = stdout.lines().map(|line| line.trim_end_matches('\r'));
    let version_line = lines.next().ok_or_else(|| malformed("missing version line"))?;
    let parts = version_line
        .split_whitespace()
        .map(str::parse::<u32>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| malformed(&format!("invalid version line '{version_line}'")))?;
    let &[major, minor, micro] = parts.as_slice() else {
        return Err(malformed(&format!("invalid version line '{version_line}'")));
    };

    let prefix = lines
        .next()
        .filter(|line| !line.is_empty())
        .ok_or_else(|| malformed("missing sys.prefix"))?;
    let executable = match lines.next().filter(|line| !line.is_empty()) {
        Some(path) => PathBuf::from(path),
        None => interpreter.to_path_buf(),
    };

    Ok(PythonInfo {
        executable,
        prefix: PathBuf::from(prefix),
        version: (major, minor, micro),
    })
}

/// Reject Python 2 and Python 3 releases older than [`MIN_PYTHON`].
pub fn check_python_version(version: (u32, u32, u32)) -> Result<(), PreflightError> {
    let (major, minor, micro) = version;
    if (major, minor) < MIN_PYTHON {
        return Err(PreflightError::UnsupportedPython {
            major,
            minor,
            micro,
        });
    }
    Ok(())
}
