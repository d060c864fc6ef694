//! Filesystem helpers shared by the kernel-spec installer and the config
//! patcher.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Recursively copy a directory of regular files and subdirectories.
///
/// Existing files at the destination are overwritten.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .with_context(|| format!("Failed to create directory: {}", dst.display()))?;

    for entry in fs::read_dir(src)
        .with_context(|| format!("Failed to read directory: {}", src.display()))?
    {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)
                .with_context(|| format!("Failed to copy file: {}", src_path.display()))?;
        }
    }

    Ok(())
}

/// Replace the contents of `path` via a temp file and a rename.
///
/// Readers never observe a half-written file. An existing `path` is
/// resolved through symlinks first, so the link target is what gets
/// replaced, and it keeps its permissions. New files are created 0644.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let (target, existing) = resolve_write_target(path)?;
    let parent = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    tmp.write_all(contents)
        .with_context(|| format!("Failed to write temp file for {}", target.display()))?;
    let permissions = match existing {
        Some(metadata) => metadata.permissions(),
        None => new_file_permissions(tmp.as_file())?,
    };
    tmp.as_file()
        .set_permissions(permissions)
        .with_context(|| format!("Failed to set permissions for {}", target.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("Failed to sync temp file for {}", target.display()))?;
    tmp.persist(&target)
        .with_context(|| format!("Failed to replace {}", target.display()))?;
    Ok(())
}

fn resolve_write_target(path: &Path) -> Result<(PathBuf, Option<fs::Metadata>)> {
    if !path.exists() {
        return Ok((path.to_path_buf(), None));
    }
    let target = fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    let metadata = fs::metadata(&target)
        .with_context(|| format!("Failed to stat {}", target.display()))?;
    Ok((target, Some(metadata)))
}

// NamedTempFile is created 0600; config files are meant to be shared.
#[cfg(unix)]
fn new_file_permissions(_file: &fs::File) -> Result<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions(file: &fs::File) -> Result<fs::Permissions> {
    Ok(file.metadata()?.permissions())
}
