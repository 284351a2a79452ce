//! Layered run configuration: built-in defaults, then a TOML file, then `-S KEY=VALUE`
//! overrides, then dedicated command-line flags.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{build_analyze_config, build_fold_config};
pub use models::{AnalyzeAppConfig, FoldAppConfig};
