use aptafold::core::io::table::ColumnNames;
use aptafold::engine::config::{BatchConfig, FoldConfig};
use std::path::PathBuf;

/// Fully resolved settings for one `fold` run.
#[derive(Debug, Clone)]
pub struct FoldAppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub fold: FoldConfig,
    pub batch: BatchConfig,
    pub columns: ColumnNames,
    pub include_metrics: bool,
}

#[derive(Debug, Clone)]
pub struct AnalyzeAppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub columns: ColumnNames,
}
