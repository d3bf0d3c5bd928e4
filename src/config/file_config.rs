use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// TOML config file contents. Every field is optional; present values
/// override their CLI counterparts.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub store_path: Option<String>,
    pub baseline_path: Option<String>,
    pub page_size: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
