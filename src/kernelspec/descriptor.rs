use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const KERNEL_JSON: &str = "kernel.json";

/// Module the kernel process runs as.
pub const KERNEL_MODULE: &str = "sos_notebook.kernel";

/// Placeholder the notebook server substitutes with the connection file path.
pub const CONNECTION_FILE_PLACEHOLDER: &str = "{connection_file}";

/// Contents of `kernel.json`.
///
/// Fields are declared in sorted order, which is the order they serialize in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelDescriptor {
    pub argv: Vec<String>,
    pub display_name: String,
    pub language: String,
}

impl KernelDescriptor {
    /// Descriptor launching the SoS kernel under `python`.
    pub fn sos(python: &Path) -> Self {
        Self {
            argv: vec![
                python.display().to_string(),
                "-m".to_string(),
                KERNEL_MODULE.to_string(),
                "-f".to_string(),
                CONNECTION_FILE_PLACEHOLDER.to_string(),
            ],
            display_name: "SoS".to_string(),
            language: "sos".to_string(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).context("Failed to serialize kernel.json")
    }
}
