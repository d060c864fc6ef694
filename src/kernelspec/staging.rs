//! Scratch directory assembled before a kernel spec is installed.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use super::assets::Asset;
use super::descriptor::{KernelDescriptor, KERNEL_JSON};

/// Mode applied to the staging directory.
///
/// Temp dirs start out 0700, which would leave the installed copy
/// unreadable by other users' kernel discovery.
pub const STAGING_MODE: u32 = 0o755;

const STAGING_PREFIX: &str = "sos-kernelspec-";

/// A populated kernel-spec source directory, removed on drop.
#[derive(Debug)]
pub struct StagingDir {
    dir: TempDir,
}

impl StagingDir {
    /// Create the directory under the system temp dir and write
    /// `kernel.json` plus `assets` into it.
    pub fn create(descriptor: &KernelDescriptor, assets: &[Asset]) -> Result<Self> {
        Self::create_in(std::env::temp_dir(), descriptor, assets)
    }

    /// Like [`StagingDir::create`], under `parent`.
    ///
    /// A failure partway through removes the directory again.
    pub fn create_in(
        parent: impl AsRef<Path>,
        descriptor: &KernelDescriptor,
        assets: &[Asset],
    ) -> Result<Self> {
        let parent = parent.as_ref();
        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(parent)
            .with_context(|| {
                format!(
                    "Failed to create kernel spec staging directory in {}",
                    parent.display()
                )
            })?;
        let staging = Self { dir };
        staging.widen_permissions()?;

        let kernel_json = staging.path().join(KERNEL_JSON);
        fs::write(&kernel_json, descriptor.to_json()?)
            .with_context(|| format!("Failed to write {}", kernel_json.display()))?;

        for asset in assets {
            asset.write_into(staging.path())?;
        }

        tracing::debug!(staging = %staging.path().display(), "kernel spec staged");
        Ok(staging)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[cfg(unix)]
    fn widen_permissions(&self) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(self.path(), fs::Permissions::from_mode(STAGING_MODE))
            .with_context(|| format!("Failed to chmod {}", self.path().display()))
    }

    #[cfg(not(unix))]
    fn widen_permissions(&self) -> Result<()> {
        Ok(())
    }
}
