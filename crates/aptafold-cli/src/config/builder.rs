use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AnalyzeAppConfig, FoldAppConfig};
use crate::cli::{AnalyzeArgs, ColumnArgs, FoldArgs};
use crate::error::{CliError, Result};
use crate::utils::parser::{self, ParseError};
use aptafold::core::io::table::ColumnNames;
use aptafold::engine::config::{BatchConfig, FoldConfigBuilder};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub fn build_fold_config(args: &FoldArgs, jobs: Option<usize>) -> Result<FoldAppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_layers(args.config.as_deref(), &args.set_values)?;

    let folding = file_config.folding.take().unwrap_or_default();
    let executable = args
        .rnafold
        .clone()
        .or(folding.executable)
        .unwrap_or(defaults.executable);
    let timeout_secs = args
        .timeout
        .or(folding.timeout_secs)
        .unwrap_or(defaults.timeout_secs);

    let fold = FoldConfigBuilder::new()
        .executable(executable)
        .temperature(args.temperature.or(folding.temperature))
        .parameter_file(args.param_file.clone().or(folding.parameter_file))
        .extra_args(folding.extra_args.unwrap_or_default())
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let jobs = jobs
        .or(file_config.batch.take().and_then(|batch| batch.jobs))
        .unwrap_or(defaults.jobs);
    if jobs == 0 {
        return Err(CliError::Argument(
            "The number of jobs must be at least 1.".to_string(),
        ));
    }

    let include_metrics = args.analyze
        || file_config
            .output
            .take()
            .and_then(|output| output.include_metrics)
            .unwrap_or(defaults.include_metrics);

    let config = FoldAppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        fold,
        batch: BatchConfig::with_jobs(jobs),
        columns: merge_columns(file_config, &args.columns),
        include_metrics,
    };
    debug!("Resolved fold configuration: {:?}", config);
    Ok(config)
}

pub fn build_analyze_config(args: &AnalyzeArgs) -> Result<AnalyzeAppConfig> {
    let file_config = load_layers(args.config.as_deref(), &args.set_values)?;

    let config = AnalyzeAppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        columns: merge_columns(
            file_config,
            &ColumnArgs {
                structure_column: args.structure_column.clone(),
                loop_count_column: args.loop_count_column.clone(),
                loop_nucleotides_column: args.loop_nucleotides_column.clone(),
                ..Default::default()
            },
        ),
    };
    debug!("Resolved analyze configuration: {:?}", config);
    Ok(config)
}

fn load_layers(config_path: Option<&Path>, set_values: &[String]) -> Result<FileConfig> {
    let file_config = match config_path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    apply_set_values(file_config, set_values)
}

fn merge_columns(mut file_config: FileConfig, cli: &ColumnArgs) -> ColumnNames {
    let mut columns = file_config.columns.take().unwrap_or_default();
    let overrides = [
        (&cli.id_column, &mut columns.id),
        (&cli.sequence_column, &mut columns.sequence),
        (&cli.structure_column, &mut columns.structure),
        (&cli.energy_column, &mut columns.energy),
        (&cli.loop_count_column, &mut columns.loop_count),
        (&cli.loop_nucleotides_column, &mut columns.loop_nucleotides),
    ];
    for (flag, name) in overrides {
        if let Some(value) = flag {
            *name = value.clone();
        }
    }
    columns
}

fn apply_set_values(mut file_config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for pair in set_values {
        let (key, value) = parser::parse_key_value(pair).map_err(config_error)?;
        let text = parser::unquote(value).to_string();

        match key {
            "folding.executable" => {
                file_config
                    .folding
                    .get_or_insert_with(Default::default)
                    .executable = Some(text);
            }
            "folding.temperature" => {
                file_config
                    .folding
                    .get_or_insert_with(Default::default)
                    .temperature =
                    Some(parser::parse_value(key, value, "float").map_err(config_error)?);
            }
            "folding.parameter-file" => {
                file_config
                    .folding
                    .get_or_insert_with(Default::default)
                    .parameter_file = Some(text.into());
            }
            "folding.extra-args" => {
                file_config
                    .folding
                    .get_or_insert_with(Default::default)
                    .extra_args = Some(text.split_whitespace().map(str::to_string).collect());
            }
            "folding.timeout-secs" => {
                file_config
                    .folding
                    .get_or_insert_with(Default::default)
                    .timeout_secs =
                    Some(parser::parse_value(key, value, "integer").map_err(config_error)?);
            }
            "batch.jobs" => {
                file_config.batch.get_or_insert_with(Default::default).jobs =
                    Some(parser::parse_value(key, value, "integer").map_err(config_error)?);
            }
            "output.include-metrics" => {
                file_config
                    .output
                    .get_or_insert_with(Default::default)
                    .include_metrics =
                    Some(parser::parse_value(key, value, "boolean").map_err(config_error)?);
            }
            "columns.id" => {
                file_config.columns.get_or_insert_with(Default::default).id = text;
            }
            "columns.sequence" => {
                file_config.columns.get_or_insert_with(Default::default).sequence = text;
            }
            "columns.structure" => {
                file_config.columns.get_or_insert_with(Default::default).structure = text;
            }
            "columns.energy" => {
                file_config.columns.get_or_insert_with(Default::default).energy = text;
            }
            "columns.loop-count" => {
                file_config.columns.get_or_insert_with(Default::default).loop_count = text;
            }
            "columns.loop-nucleotides" => {
                file_config
                    .columns
                    .get_or_insert_with(Default::default)
                    .loop_nucleotides = text;
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(file_config)
}

fn config_error(e: ParseError) -> CliError {
    CliError::Config(e.to_string())
}
