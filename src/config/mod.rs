mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::PathBuf;

/// CLI arguments subject to config-file resolution.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub store_path: Option<PathBuf>,
    pub baseline_path: Option<PathBuf>,
    pub page_size: usize,
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the append store JSON file lives.
    pub store_path: PathBuf,
    /// Optional baseline TSV overriding the embedded dataset.
    pub baseline_path: Option<PathBuf>,
    pub page_size: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file
    /// config. TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let store_path = file
            .store_path
            .map(PathBuf::from)
            .or_else(|| cli.store_path.clone())
            .unwrap_or_else(|| PathBuf::from("konpa_store.json"));

        let baseline_path = file
            .baseline_path
            .map(PathBuf::from)
            .or_else(|| cli.baseline_path.clone());
        if let Some(path) = &baseline_path {
            if !path.is_file() {
                bail!("Baseline file does not exist: {:?}", path);
            }
        }

        let page_size = file.page_size.unwrap_or(cli.page_size);
        if page_size == 0 {
            bail!("page_size must be at least 1");
        }

        Ok(AppConfig {
            store_path,
            baseline_path,
            page_size,
        })
    }
}
