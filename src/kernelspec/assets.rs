//! Static files shipped alongside `kernel.json`.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// A file bundled into the binary at build time.
#[derive(Debug, Clone, Copy)]
pub struct Asset {
    pub file_name: &'static str,
    pub contents: &'static [u8],
}

pub const KERNEL_JS: Asset = Asset {
    file_name: "kernel.js",
    contents: include_bytes!("../../assets/kernel.js"),
};

pub const LOGO_64: Asset = Asset {
    file_name: "logo-64x64.png",
    contents: include_bytes!("../../assets/logo-64x64.png"),
};

/// Everything copied next to `kernel.json`.
pub const KERNEL_ASSETS: &[Asset] = &[KERNEL_JS, LOGO_64];

impl Asset {
    /// Write the asset into `dir` under its original file name.
    pub fn write_into(&self, dir: &Path) -> Result<()> {
        let dst = dir.join(self.file_name);
        fs::write(&dst, self.contents)
            .with_context(|| format!("Failed to write asset {}", dst.display()))
    }
}
