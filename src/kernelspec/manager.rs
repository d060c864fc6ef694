//! Kernel registry: copies a staged spec into `kernels/<name>`.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::filesystem::copy_dir_recursive;
use crate::paths::JupyterPaths;
use crate::scope::InstallScope;

/// Installs kernel specs into the Jupyter data directories.
#[derive(Debug, Clone)]
pub struct KernelSpecManager {
    paths: JupyterPaths,
}

impl KernelSpecManager {
    pub fn new(paths: JupyterPaths) -> Self {
        Self { paths }
    }

    /// Where a kernel named `name` is installed for `scope`.
    ///
    /// Kernel names are case-insensitive; the directory uses the lowercase form.
    pub fn destination_dir(&self, name: &str, scope: &InstallScope) -> Result<PathBuf> {
        validate_kernel_name(name)?;
        Ok(self
            .paths
            .kernels_dir(scope)
            .join(name.to_ascii_lowercase()))
    }

    /// Copy `source_dir` into the registry as kernel `name`.
    ///
    /// A previous install at the destination is removed first, so reinstalling
    /// never leaves stale files behind. Returns the destination directory.
    pub fn install_kernel_spec(
        &self,
        source_dir: &Path,
        name: &str,
        scope: &InstallScope,
    ) -> Result<PathBuf> {
        let destination = self.destination_dir(name, scope)?;

        if !source_dir.is_dir() {
            bail!(
                "kernel spec source is not a directory: {}",
                source_dir.display()
            );
        }

        if destination.is_dir() {
            tracing::debug!(destination = %destination.display(), "removing existing kernel spec");
            fs::remove_dir_all(&destination).with_context(|| {
                format!(
                    "Failed to remove existing kernel spec {}",
                    destination.display()
                )
            })?;
        }

        copy_dir_recursive(source_dir, &destination).with_context(|| {
            format!(
                "Failed to install kernel spec '{}' to {}",
                name,
                destination.display()
            )
        })?;

        tracing::info!(kernel = name, %scope, destination = %destination.display(), "installed kernel spec");
        Ok(destination)
    }
}

/// Kernel names may contain ASCII letters, digits, `.`, `_` and `-`.
pub fn validate_kernel_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("kernel name must not be empty");
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        bail!(
            "invalid kernel name '{}': character '{}' is not allowed (use letters, digits, '.', '_' or '-')",
            name,
            bad
        );
    }
    if name == "." || name == ".." {
        bail!("invalid kernel name '{}'", name);
    }
    Ok(())
}
