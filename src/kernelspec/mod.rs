//! SoS kernel spec: descriptor, bundled assets and installation.
//!
//! Installation stages `kernel.json` and the assets in a temp directory, then
//! hands that directory to [`KernelSpecManager`], which copies it into the
//! registry for the chosen scope. The staging directory is removed whether or
//! not the install succeeds.

pub mod assets;
pub mod descriptor;
pub mod manager;
pub mod staging;

use anyhow::Result;
use std::path::PathBuf;

pub use descriptor::KernelDescriptor;
pub use manager::KernelSpecManager;
pub use staging::StagingDir;

use crate::preflight::PythonInfo;
use crate::scope::InstallScope;

/// Name the kernel is registered under.
pub const SOS_KERNEL_NAME: &str = "sos";

/// Install the SoS kernel spec for `python` and return its destination.
pub fn install_sos_kernel_spec(
    manager: &KernelSpecManager,
    python: &PythonInfo,
    scope: &InstallScope,
) -> Result<PathBuf> {
    let descriptor = KernelDescriptor::sos(&python.executable);
    let staging = StagingDir::create(&descriptor, assets::KERNEL_ASSETS)?;
    manager.install_kernel_spec(staging.path(), SOS_KERNEL_NAME, scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::JupyterPaths;
    use std::fs;
    use tempfile::TempDir;

    fn python() -> PythonInfo {
        PythonInfo {
            executable: PathBuf::from("/opt/env/bin/python3"),
            prefix: PathBuf::from("/opt/env"),
            version: (3, 11, 4),
        }
    }

    fn manager(root: &std::path::Path) -> KernelSpecManager {
        KernelSpecManager::new(JupyterPaths {
            user_data_dir: root.join("data"),
            user_config_dir: root.join("config"),
            system_data_dir: root.join("sys-data"),
            system_config_dir: root.join("sys-config"),
        })
    }

    #[test]
    fn test_install_sos_kernel_spec_layout() {
        let temp = TempDir::new().unwrap();
        let ksm = manager(temp.path());

        let destination = install_sos_kernel_spec(&ksm, &python(), &InstallScope::User).unwrap();
        assert_eq!(destination, temp.path().join("data/kernels/sos"));

        for name in ["kernel.json", "kernel.js", "logo-64x64.png"] {
            assert!(destination.join(name).is_file(), "{name} missing");
        }

        let descriptor: KernelDescriptor =
            serde_json::from_slice(&fs::read(destination.join("kernel.json")).unwrap()).unwrap();
        assert_eq!(descriptor.language, "sos");
        assert_eq!(descriptor.argv[0], "/opt/env/bin/python3");
    }

    #[test]
    fn test_install_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let ksm = manager(temp.path());
        let scope = InstallScope::Prefix(temp.path().join("prefix"));

        let first = install_sos_kernel_spec(&ksm, &python(), &scope).unwrap();
        let snapshot = |dir: &std::path::Path| {
            let mut files: Vec<_> = fs::read_dir(dir)
                .unwrap()
                .map(|e| {
                    let e = e.unwrap();
                    (e.file_name(), fs::read(e.path()).unwrap())
                })
                .collect();
            files.sort();
            files
        };
        let before = snapshot(&first);

        let second = install_sos_kernel_spec(&ksm, &python(), &scope).unwrap();
        assert_eq!(first, second);
        assert_eq!(before, snapshot(&second));
    }
}
