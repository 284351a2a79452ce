use crate::core::models::record::SequenceRecord;
use crate::core::models::row::OutputRow;
use crate::engine::aggregate;
use crate::engine::cancel::CancellationToken;
use crate::engine::config::BatchConfig;
use crate::engine::error::EngineError;
use crate::engine::folding::{FoldingBackend, FoldingInvoker};
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total_records: usize,
    pub rows: usize,
    pub failed: usize,
    pub cancelled: bool,
}

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub rows: Vec<OutputRow>,
    pub summary: BatchSummary,
}

type Tagged = (usize, Option<OutputRow>);

/// Folds every record and returns one row per record in input order.
///
/// Records are folded sequentially, or by a pool of `batch.jobs` workers when the
/// `parallel` feature is enabled. In both cases each result is tagged with its input
/// index and the rows are re-ordered by that index, so output order never depends on
/// completion order.
///
/// If `cancel` is set during the run, in-flight invocations are stopped and records that
/// had not finished produce no row; the rows already produced are returned in input
/// order with `summary.cancelled` set.
///
/// # Errors
///
/// Returns [`EngineError::WorkerPool`] if the worker pool cannot be created. Fold
/// failures never surface here; they appear as rows with `succeeded() == false`.
#[instrument(skip_all, name = "fold_workflow", fields(records = records.len()))]
pub fn run<B: FoldingBackend>(
    records: Vec<SequenceRecord>,
    invoker: &FoldingInvoker<B>,
    batch: &BatchConfig,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Result<BatchOutcome, EngineError> {
    let total_records = records.len();
    let jobs = batch.effective_jobs();
    info!(jobs, "Starting folding of {} record(s).", total_records);

    reporter.report(Progress::PhaseStart { name: "Folding" });
    reporter.report(Progress::BatchStart {
        total_records: total_records as u64,
    });

    let mut tagged = if jobs > 1 {
        fold_parallel(records, invoker, jobs, reporter, cancel)?
    } else {
        fold_sequential(records, invoker, reporter, cancel)
    };
    tagged.sort_unstable_by_key(|(index, _)| *index);

    let rows: Vec<OutputRow> = tagged.into_iter().filter_map(|(_, row)| row).collect();

    reporter.report(Progress::BatchFinish);

    let failed = rows.iter().filter(|row| !row.succeeded()).count();
    let summary = BatchSummary {
        total_records,
        rows: rows.len(),
        failed,
        cancelled: rows.len() < total_records,
    };

    if summary.cancelled {
        warn!(
            completed = summary.rows,
            total = total_records,
            "Folding cancelled before all records finished."
        );
    }
    if failed > 0 {
        warn!("{} of {} fold(s) failed.", failed, summary.rows);
        reporter.report(Progress::Message(format!(
            "{} fold(s) failed and were recorded with empty structures",
            failed
        )));
    }
    info!(rows = summary.rows, failed, "Folding finished.");

    reporter.report(Progress::PhaseFinish);
    Ok(BatchOutcome { rows, summary })
}

fn fold_one<B: FoldingBackend>(
    index: usize,
    record: SequenceRecord,
    invoker: &FoldingInvoker<B>,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Tagged {
    if cancel.is_cancelled() {
        return (index, None);
    }
    debug!(index, id = %record.id, length = record.len(), "Folding record.");

    let Some(fold) = invoker.invoke_cancellable(&record.sequence, cancel) else {
        return (index, None);
    };
    reporter.report(Progress::RecordFinished {
        succeeded: fold.succeeded(),
    });
    (index, Some(aggregate::assemble(record, fold)))
}

fn fold_sequential<B: FoldingBackend>(
    records: Vec<SequenceRecord>,
    invoker: &FoldingInvoker<B>,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Vec<Tagged> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| fold_one(index, record, invoker, reporter, cancel))
        .collect()
}

#[cfg(feature = "parallel")]
fn fold_parallel<B: FoldingBackend>(
    records: Vec<SequenceRecord>,
    invoker: &FoldingInvoker<B>,
    jobs: usize,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Result<Vec<Tagged>, EngineError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .thread_name(|i| format!("aptafold-fold-{}", i))
        .build()
        .map_err(|e| EngineError::WorkerPool(e.to_string()))?;

    Ok(pool.install(|| {
        records
            .into_par_iter()
            .enumerate()
            .map(|(index, record)| fold_one(index, record, invoker, reporter, cancel))
            .collect()
    }))
}

#[cfg(not(feature = "parallel"))]
fn fold_parallel<B: FoldingBackend>(
    records: Vec<SequenceRecord>,
    invoker: &FoldingInvoker<B>,
    jobs: usize,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Result<Vec<Tagged>, EngineError> {
    debug!(
        jobs,
        "Built without the `parallel` feature; folding sequentially."
    );
    Ok(fold_sequential(records, invoker, reporter, cancel))
}
