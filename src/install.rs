//! End-to-end install: kernel spec first, then the frontend config.

use anyhow::Result;
use std::path::PathBuf;

use crate::config::{install_config, ConfigOutcome};
use crate::kernelspec::{install_sos_kernel_spec, KernelSpecManager};
use crate::paths::JupyterPaths;
use crate::preflight::PythonInfo;
use crate::scope::{resolve_scope, InstallScope, ScopeFlags};

/// Host facts the installer runs against.
#[derive(Debug, Clone)]
pub struct InstallEnv {
    pub python: PythonInfo,
    pub paths: JupyterPaths,
    pub is_root: bool,
}

/// What a completed install touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub scope: InstallScope,
    pub kernel_dir: PathBuf,
    pub config: ConfigOutcome,
}

impl InstallEnv {
    pub fn scope(&self, flags: &ScopeFlags) -> InstallScope {
        resolve_scope(flags, &self.python.prefix, self.is_root)
    }

    /// Install the kernel spec and seed the notebook config for `flags`.
    pub fn install(&self, flags: &ScopeFlags) -> Result<InstallReport> {
        let scope = self.scope(flags);
        tracing::debug!(%scope, "resolved install scope");

        let manager = KernelSpecManager::new(self.paths.clone());
        let kernel_dir = install_sos_kernel_spec(&manager, &self.python, &scope)?;
        let config = install_config(&self.paths, &scope)?;

        Ok(InstallReport {
            scope,
            kernel_dir,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn env(root: &Path, is_root: bool) -> InstallEnv {
        InstallEnv {
            python: PythonInfo {
                executable: root.join("env/bin/python3"),
                prefix: root.join("env"),
                version: (3, 10, 12),
            },
            paths: JupyterPaths {
                user_data_dir: root.join("home/.local/share/jupyter"),
                user_config_dir: root.join("home/.jupyter"),
                system_data_dir: root.join("usr/local/share/jupyter"),
                system_config_dir: root.join("usr/local/etc/jupyter"),
            },
            is_root,
        }
    }

    #[test]
    fn test_default_unprivileged_install() {
        let temp = TempDir::new().unwrap();
        let report = env(temp.path(), false).install(&ScopeFlags::default()).unwrap();

        assert_eq!(report.scope, InstallScope::User);
        assert_eq!(
            report.kernel_dir,
            temp.path().join("home/.local/share/jupyter/kernels/sos")
        );
        assert_eq!(report.config.config_dir, temp.path().join("home/.jupyter"));
        assert!(report.config.updated);
    }

    #[test]
    fn test_default_root_install_is_system_wide() {
        let temp = TempDir::new().unwrap();
        let report = env(temp.path(), true).install(&ScopeFlags::default()).unwrap();

        assert_eq!(report.scope, InstallScope::System);
        assert_eq!(
            report.kernel_dir,
            temp.path().join("usr/local/share/jupyter/kernels/sos")
        );
        assert_eq!(
            report.config.config_dir,
            temp.path().join("usr/local/etc/jupyter")
        );
    }

    #[test]
    fn test_sys_prefix_install() {
        let temp = TempDir::new().unwrap();
        let flags = ScopeFlags {
            sys_prefix: true,
            ..ScopeFlags::default()
        };
        let report = env(temp.path(), false).install(&flags).unwrap();

        assert_eq!(
            report.kernel_dir,
            temp.path().join("env/share/jupyter/kernels/sos")
        );
        assert_eq!(report.config.config_dir, temp.path().join("env/etc/jupyter"));
    }

    #[test]
    fn test_second_install_leaves_config_alone() {
        let temp = TempDir::new().unwrap();
        let env = env(temp.path(), false);

        assert!(env.install(&ScopeFlags::default()).unwrap().config.updated);
        assert!(!env.install(&ScopeFlags::default()).unwrap().config.updated);
    }
}
