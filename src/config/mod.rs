//! Notebook frontend settings.
//!
//! The SoS frontend reads `sos_notebook_console_panel` from the `notebook`
//! section of the nbconfig store. Installing only seeds the default; a value
//! the user already chose is never touched.

pub mod manager;

use anyhow::Result;
use serde_json::{Map, Value};
use std::path::PathBuf;

pub use manager::JsonConfigManager;

use crate::paths::JupyterPaths;
use crate::scope::InstallScope;

pub const NBCONFIG_DIR: &str = "nbconfig";
pub const NOTEBOOK_SECTION: &str = "notebook";
pub const CONSOLE_PANEL_KEY: &str = "sos_notebook_console_panel";
pub const CONSOLE_PANEL_DEFAULT: &str = "auto";

/// Result of patching the notebook config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOutcome {
    /// Jupyter config directory for the scope.
    pub config_dir: PathBuf,
    /// The `notebook.json` that was inspected.
    pub config_file: PathBuf,
    /// Whether the file was written.
    pub updated: bool,
}

/// Insert `key = default` into `config` unless the key already exists.
///
/// Returns whether `config` changed. Existing values are kept as-is,
/// whatever their type.
pub fn ensure_key(config: &mut Map<String, Value>, key: &str, default: Value) -> bool {
    if config.contains_key(key) {
        return false;
    }
    config.insert(key.to_string(), default);
    true
}

/// Seed the console-panel setting in `<config_dir>/nbconfig/notebook.json`.
pub fn install_config(paths: &JupyterPaths, scope: &InstallScope) -> Result<ConfigOutcome> {
    let config_dir = paths.config_dir(scope);
    let cm = JsonConfigManager::new(config_dir.join(NBCONFIG_DIR));
    let config_file = cm.file_name(NOTEBOOK_SECTION);

    let _lock = cm.lock()?;
    let mut config = cm.get(NOTEBOOK_SECTION)?;
    let updated = ensure_key(
        &mut config,
        CONSOLE_PANEL_KEY,
        Value::String(CONSOLE_PANEL_DEFAULT.to_string()),
    );
    if updated {
        cm.set(NOTEBOOK_SECTION, &config)?;
        tracing::info!(file = %config_file.display(), "set {CONSOLE_PANEL_KEY}={CONSOLE_PANEL_DEFAULT}");
    } else {
        tracing::debug!(file = %config_file.display(), "{CONSOLE_PANEL_KEY} already set");
    }

    Ok(ConfigOutcome {
        config_dir,
        config_file,
        updated,
    })
}
