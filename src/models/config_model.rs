use lby_reader::{DetectorConfig, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    /// Overwrite outputs that already exist.
    pub force: bool,
    pub dry_run: bool,
    pub verbose: bool,
    pub detector: DetectorConfig,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output"),
            format: OutputFormat::Csv,
            force: false,
            dry_run: false,
            verbose: false,
            detector: DetectorConfig::default(),
        }
    }
}
