use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tokio::fs;

use crate::models::config_model::ConverterConfig;

static CONFIG_CACHE: OnceLock<ConverterConfig> = OnceLock::new();

pub const DEFAULT_CONFIG_PATH: &str = "lby.json";
pub const CONFIG_ENV: &str = "LBY_CONFIG";

/// Reads `path`, else `$LBY_CONFIG`, else `lby.json` when present, else the
/// defaults. An explicitly named file must exist.
pub async fn load_config(path: Option<&Path>) -> Result<ConverterConfig> {
    let (file_path, required) = match (path, std::env::var_os(CONFIG_ENV)) {
        (Some(p), _) => (p.to_path_buf(), true),
        (None, Some(p)) => (PathBuf::from(p), true),
        (None, None) => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };

    if !required && !fs::try_exists(&file_path).await.unwrap_or(false) {
        return Ok(ConverterConfig::default());
    }

    let data = fs::read_to_string(&file_path)
        .await
        .with_context(|| format!("File read error: {}", file_path.display()))?;

    serde_json::from_str::<ConverterConfig>(&data)
        .with_context(|| format!("JSON parse error: {}", file_path.display()))
}

/// Validates and caches the final config for the rest of the run.
pub fn init_config(config: ConverterConfig) -> Result<&'static ConverterConfig> {
    config.detector.validate()?;

    CONFIG_CACHE
        .set(config)
        .map_err(|_| anyhow::anyhow!("Config already initialized"))?;

    Ok(get_cached_config())
}

pub fn get_cached_config() -> &'static ConverterConfig {
    CONFIG_CACHE.get().expect("Config not initialized")
}
