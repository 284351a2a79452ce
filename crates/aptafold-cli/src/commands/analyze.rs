use crate::cli::AnalyzeArgs;
use crate::config::{self, AnalyzeAppConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use aptafold::core::io::table::StructureTable;
use aptafold::engine::progress::ProgressReporter;
use aptafold::workflows::analyze::{self, AnalyzeSummary};
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, info};

pub async fn run(args: AnalyzeArgs, quiet: bool) -> Result<()> {
    info!("Building configuration for analyze command...");
    let config = config::build_analyze_config(&args)?;

    let progress = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let summary = execute(config.clone(), progress).await?;

    println!(
        "✓ Annotated {} row(s) in {}",
        summary.rows,
        config.output_path.display()
    );
    if summary.skipped > 0 {
        println!("  {} row(s) had no structure and were skipped", summary.skipped);
    }
    Ok(())
}

/// Annotates the input table into a temporary file beside the output and renames it
/// into place once every row is written. The input header is checked before anything
/// is created, and a failed run leaves any existing output untouched.
async fn execute(config: AnalyzeAppConfig, progress: CliProgressHandler) -> Result<AnalyzeSummary> {
    ensure_distinct_paths(&config.input_path, &config.output_path)?;

    info!("Reading structures from {:?}", &config.input_path);
    let table = StructureTable::open(&config.input_path, &config.columns.structure)
        .map_err(|e| CliError::file(&config.input_path, e))?;

    let output_dir = match config.output_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    let mut staging = tempfile::Builder::new()
        .prefix(".aptafold-")
        .suffix(".csv.tmp")
        .tempfile_in(&output_dir)
        .map_err(|e| CliError::file(&config.output_path, e))?;
    debug!("Staging analyzed table in {:?}", staging.path());

    let output_path = config.output_path.clone();
    let columns = config.columns;
    tokio::task::spawn_blocking(move || -> Result<AnalyzeSummary> {
        let reporter = ProgressReporter::with_callback(progress.get_callback());
        let summary = analyze::run(table, BufWriter::new(&mut staging), &columns, &reporter)?;
        staging
            .persist(&output_path)
            .map_err(|e| CliError::file(&output_path, e.error))?;
        Ok(summary)
    })
    .await
    .map_err(|e| CliError::Other(anyhow::anyhow!("Loop analysis task failed: {}", e)))?
}

fn ensure_distinct_paths(input: &Path, output: &Path) -> Result<()> {
    let (Ok(input), Ok(output)) = (input.canonicalize(), output.canonicalize()) else {
        return Ok(());
    };
    if input == output {
        return Err(CliError::Argument(format!(
            "Input and output must be different files: {}",
            input.display()
        )));
    }
    Ok(())
}
