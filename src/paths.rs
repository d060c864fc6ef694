//! Jupyter directory layout.
//!
//! Mirrors where Jupyter itself looks for kernel specs and frontend config,
//! so anything installed here is discovered without extra setup.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

use crate::scope::InstallScope;

pub const DATA_DIR_ENV_VAR: &str = "JUPYTER_DATA_DIR";
pub const CONFIG_DIR_ENV_VAR: &str = "JUPYTER_CONFIG_DIR";

/// Data and config roots for the user and system-wide scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JupyterPaths {
    pub user_data_dir: PathBuf,
    pub user_config_dir: PathBuf,
    pub system_data_dir: PathBuf,
    pub system_config_dir: PathBuf,
}

impl JupyterPaths {
    /// Resolve the layout from the environment and the platform defaults.
    pub fn from_env() -> Result<Self> {
        let user_data_dir = match env_dir(DATA_DIR_ENV_VAR) {
            Some(dir) => dir,
            None => default_user_data_dir()?,
        };
        let user_config_dir = match env_dir(CONFIG_DIR_ENV_VAR) {
            Some(dir) => dir,
            None => dirs::home_dir()
                .map(|home| home.join(".jupyter"))
                .ok_or_else(|| anyhow!("cannot determine home directory for Jupyter config"))?,
        };

        Ok(Self {
            user_data_dir,
            user_config_dir,
            system_data_dir: system_data_dir(),
            system_config_dir: system_config_dir(),
        })
    }

    /// Root under which `kernels/<name>` lives for `scope`.
    pub fn data_dir(&self, scope: &InstallScope) -> PathBuf {
        match scope {
            InstallScope::User => self.user_data_dir.clone(),
            InstallScope::SysPrefix(prefix) | InstallScope::Prefix(prefix) => {
                prefix_data_dir(prefix)
            }
            InstallScope::System => self.system_data_dir.clone(),
        }
    }

    /// Directory holding `kernels/` for `scope`.
    pub fn kernels_dir(&self, scope: &InstallScope) -> PathBuf {
        self.data_dir(scope).join("kernels")
    }

    /// Jupyter config directory for `scope`.
    ///
    /// Prefix scopes map to `<prefix>/etc/jupyter`, including an explicit
    /// `--prefix`.
    pub fn config_dir(&self, scope: &InstallScope) -> PathBuf {
        match scope {
            InstallScope::User => self.user_config_dir.clone(),
            InstallScope::SysPrefix(prefix) | InstallScope::Prefix(prefix) => {
                prefix.join("etc").join("jupyter")
            }
            InstallScope::System => self.system_config_dir.clone(),
        }
    }
}

fn prefix_data_dir(prefix: &Path) -> PathBuf {
    prefix.join("share").join("jupyter")
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(target_os = "macos")]
fn default_user_data_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join("Library").join("Jupyter"))
        .ok_or_else(|| anyhow!("cannot determine home directory for Jupyter data"))
}

#[cfg(not(target_os = "macos"))]
fn default_user_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|data| data.join("jupyter"))
        .ok_or_else(|| anyhow!("cannot determine user data directory for Jupyter"))
}

#[cfg(windows)]
fn program_data() -> PathBuf {
    std::env::var_os("PROGRAMDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\ProgramData"))
}

#[cfg(windows)]
fn system_data_dir() -> PathBuf {
    program_data().join("jupyter")
}

#[cfg(windows)]
fn system_config_dir() -> PathBuf {
    program_data().join("jupyter")
}

#[cfg(not(windows))]
fn system_data_dir() -> PathBuf {
    PathBuf::from("/usr/local/share/jupyter")
}

#[cfg(not(windows))]
fn system_config_dir() -> PathBuf {
    PathBuf::from("/usr/local/etc/jupyter")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> JupyterPaths {
        JupyterPaths {
            user_data_dir: PathBuf::from("/home/u/.local/share/jupyter"),
            user_config_dir: PathBuf::from("/home/u/.jupyter"),
            system_data_dir: PathBuf::from("/usr/local/share/jupyter"),
            system_config_dir: PathBuf::from("/usr/local/etc/jupyter"),
        }
    }

    #[test]
    fn test_kernels_dir_per_scope() {
        let paths = layout();
        assert_eq!(
            paths.kernels_dir(&InstallScope::User),
            PathBuf::from("/home/u/.local/share/jupyter/kernels")
        );
        assert_eq!(
            paths.kernels_dir(&InstallScope::System),
            PathBuf::from("/usr/local/share/jupyter/kernels")
        );
        assert_eq!(
            paths.kernels_dir(&InstallScope::SysPrefix("/opt/env".into())),
            PathBuf::from("/opt/env/share/jupyter/kernels")
        );
        assert_eq!(
            paths.kernels_dir(&InstallScope::Prefix("/srv".into())),
            PathBuf::from("/srv/share/jupyter/kernels")
        );
    }

    #[test]
    fn test_config_dir_per_scope() {
        let paths = layout();
        assert_eq!(
            paths.config_dir(&InstallScope::User),
            PathBuf::from("/home/u/.jupyter")
        );
        assert_eq!(
            paths.config_dir(&InstallScope::System),
            PathBuf::from("/usr/local/etc/jupyter")
        );
        assert_eq!(
            paths.config_dir(&InstallScope::SysPrefix("/opt/env".into())),
            PathBuf::from("/opt/env/etc/jupyter")
        );
    }

    #[test]
    fn test_explicit_prefix_config_dir_honours_prefix() {
        let paths = layout();
        assert_eq!(
            paths.config_dir(&InstallScope::Prefix("/srv/custom".into())),
            PathBuf::from("/srv/custom/etc/jupyter")
        );
    }
}
