//! JSON config store: one `<section>.json` file per section.

use anyhow::{bail, Context, Result};
use fs2::FileExt;
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::filesystem::write_atomic;

/// Reads and writes JSON config sections under a single directory.
#[derive(Debug, Clone)]
pub struct JsonConfigManager {
    config_dir: PathBuf,
}

impl JsonConfigManager {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn file_name(&self, section: &str) -> PathBuf {
        self.config_dir.join(format!("{section}.json"))
    }

    /// Load a section. A missing file is an empty section.
    pub fn get(&self, section: &str) -> Result<Map<String, Value>> {
        let path = self.file_name(section);
        if !path.exists() {
            return Ok(Map::new());
        }

        let bytes =
            fs::read(&path).with_context(|| format!("Failed to read config {}", path.display()))?;
        let value: Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        match value {
            Value::Object(map) => Ok(map),
            other => bail!(
                "config {} must hold a JSON object, found {}",
                path.display(),
                json_kind(&other)
            ),
        }
    }

    /// Replace a section with `data`.
    pub fn set(&self, section: &str, data: &Map<String, Value>) -> Result<()> {
        let path = self.file_name(section);
        let mut bytes = serde_json::to_vec_pretty(data)
            .with_context(|| format!("Failed to serialize config {}", path.display()))?;
        bytes.push(b'\n');
        write_atomic(&path, &bytes)
    }

    /// Hold an exclusive lock on the store for a read-modify-write cycle.
    ///
    /// Blocks until any other holder releases it. Nothing is added to the
    /// config directory.
    pub fn lock(&self) -> Result<StoreLock> {
        fs::create_dir_all(&self.config_dir).with_context(|| {
            format!(
                "Failed to create config directory {}",
                self.config_dir.display()
            )
        })?;

        let (file, path) = open_lock_target(&self.config_dir)?;
        file.lock_exclusive()
            .with_context(|| format!("Failed to lock {}", path.display()))?;

        Ok(StoreLock { file })
    }
}

// flock on the directory handle itself.
#[cfg(unix)]
fn open_lock_target(config_dir: &Path) -> Result<(File, PathBuf)> {
    let file = File::open(config_dir)
        .with_context(|| format!("Failed to open {} for locking", config_dir.display()))?;
    Ok((file, config_dir.to_path_buf()))
}

// Directories cannot be opened as files here; use a sidecar lock file in the
// temp dir, named after the store. It is left in place: unlinking it while
// another process waits on it would let a third process lock a fresh inode.
#[cfg(not(unix))]
fn open_lock_target(config_dir: &Path) -> Result<(File, PathBuf)> {
    use std::fs::OpenOptions;

    let key: String = config_dir
        .display()
        .to_string()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let path = std::env::temp_dir().join(format!("sos-nbconfig-{key}.lock"));
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(&path)
        .with_context(|| format!("Failed to open lock file {}", path.display()))?;
    Ok((file, path))
}

/// RAII guard: released on drop.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
