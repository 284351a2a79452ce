use crate::error::{CliError, Result};
use aptafold::core::io::table::ColumnNames;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileFoldingConfig {
    pub executable: Option<String>,
    pub temperature: Option<f64>,
    #[serde(rename = "parameter-file")]
    pub parameter_file: Option<PathBuf>,
    #[serde(rename = "extra-args")]
    pub extra_args: Option<Vec<String>>,
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileBatchConfig {
    pub jobs: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    #[serde(rename = "include-metrics")]
    pub include_metrics: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub folding: Option<FileFoldingConfig>,
    pub batch: Option<FileBatchConfig>,
    pub output: Option<FileOutputConfig>,
    pub columns: Option<ColumnNames>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::file(path, e))?;
        Self::from_toml(&content).map_err(|e| match e {
            CliError::Config(message) => CliError::file(path, anyhow::anyhow!(message)),
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))
    }
}
