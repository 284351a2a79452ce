use crate::cli::FoldArgs;
use crate::config::{self, FoldAppConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use aptafold::core::io::fasta::FastaFile;
use aptafold::core::io::table::RowWriter;
use aptafold::core::io::traits::SequenceFile;
use aptafold::engine::cancel::CancellationToken;
use aptafold::engine::folding::{FoldingInvoker, RnaFoldProcess};
use aptafold::engine::progress::ProgressReporter;
use aptafold::workflows::fold::{self, BatchSummary};
use tracing::{info, warn};

pub async fn run(
    args: FoldArgs,
    jobs: Option<usize>,
    quiet: bool,
    cancel: CancellationToken,
) -> Result<()> {
    info!("Building configuration for fold command...");
    let config = config::build_fold_config(&args, jobs)?;

    println!(
        "Folding sequences from {} with {} ({} job(s))",
        config.input_path.display(),
        config.fold.executable.display(),
        config.batch.jobs
    );

    let progress = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let summary = execute(config.clone(), progress, cancel).await?;

    println!(
        "✓ Wrote {} row(s) to {} ({} fold(s) failed)",
        summary.rows,
        config.output_path.display(),
        summary.failed
    );
    if summary.failed > 0 {
        warn!(
            "{} sequence(s) could not be folded; their rows carry empty structures and zero energies.",
            summary.failed
        );
    }

    if summary.cancelled {
        return Err(CliError::Cancelled {
            rows_written: summary.rows,
            total_records: summary.total_records,
        });
    }
    Ok(())
}

/// Reads the FASTA input, folds it off the async runtime, and writes every produced row.
///
/// The input is parsed before the output file is created, so malformed input leaves no
/// output behind. Rows finished before a cancellation are still written.
async fn execute(
    config: FoldAppConfig,
    progress: CliProgressHandler,
    cancel: CancellationToken,
) -> Result<BatchSummary> {
    info!("Reading sequences from {:?}", &config.input_path);
    let records = FastaFile::read_from_path(&config.input_path)
        .map_err(|e| CliError::file(&config.input_path, e))?;
    info!("Loaded {} sequence record(s).", records.len());
    if records.is_empty() {
        warn!("Input contains no sequences; only the header row will be written.");
    }

    let mut writer = RowWriter::create(
        &config.output_path,
        &config.columns,
        config.include_metrics,
    )
    .map_err(|e| CliError::file(&config.output_path, e))?;

    let invoker = FoldingInvoker::new(RnaFoldProcess::new(config.fold));
    let batch = config.batch;
    let outcome = tokio::task::spawn_blocking(move || {
        let reporter = ProgressReporter::with_callback(progress.get_callback());
        fold::run(records, &invoker, &batch, &reporter, &cancel)
    })
    .await
    .map_err(|e| CliError::Other(anyhow::anyhow!("Folding task failed: {}", e)))??;

    writer
        .write_all(&outcome.rows)
        .map_err(|e| CliError::file(&config.output_path, e))?;
    let written = writer
        .finish()
        .map_err(|e| CliError::file(&config.output_path, e))?;
    info!("Wrote {} row(s) to {:?}", written, &config.output_path);

    Ok(outcome.summary)
}
