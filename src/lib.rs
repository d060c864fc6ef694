//! Installer for the SoS Jupyter kernel.
//!
//! Registers the `sos` kernel spec with Jupyter and seeds the notebook
//! frontend setting the SoS extension reads.
//!
//! - **Preflight** - Locates the Python interpreter that runs the kernel and
//!   checks its version
//! - **Scope** - Resolves `--user` / `--sys-prefix` / `--prefix` (or the
//!   privilege-based default) into one install location
//! - **Kernel spec** - Stages `kernel.json` and its assets, then copies them
//!   into the Jupyter kernel registry
//! - **Config** - Adds `sos_notebook_console_panel` to `nbconfig/notebook.json`
//!   when it is missing
//!
//! # Architecture
//!
//! ```text
//! sos-notebook-install (bin)
//!     │
//!     ├── cli::Cli ──────────────► scope::ScopeFlags
//!     ├── preflight::probe_python ► PythonInfo (executable, sys.prefix)
//!     └── install::InstallEnv::install
//!             ├── scope::resolve_scope
//!             ├── kernelspec::install_sos_kernel_spec
//!             │       StagingDir ──► KernelSpecManager ──► <data>/kernels/sos
//!             └── config::install_config
//!                     JsonConfigManager ──► <config>/nbconfig/notebook.json
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sos_notebook_install::{preflight, InstallEnv, JupyterPaths, ScopeFlags};
//!
//! let env = InstallEnv {
//!     python: preflight::probe_python(None)?,
//!     paths: JupyterPaths::from_env()?,
//!     is_root: sos_notebook_install::scope::is_root(),
//! };
//! let report = env.install(&ScopeFlags { user: true, ..Default::default() })?;
//! println!("{}", report.kernel_dir.display());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod filesystem;
pub mod install;
pub mod kernelspec;
pub mod paths;
pub mod preflight;
pub mod scope;

pub use install::{InstallEnv, InstallReport};
pub use paths::JupyterPaths;
pub use scope::{InstallScope, ScopeFlags};
