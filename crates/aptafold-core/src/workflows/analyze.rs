use crate::core::io::table::{ColumnNames, StructureTable, TableError};
use crate::core::structure::analyze;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::io::{Read, Write};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzeSummary {
    pub rows: usize,
    pub skipped: usize,
}

/// Appends loop metrics to a table that already carries a structure column.
///
/// Every input column is passed through unchanged and two columns, named by
/// `columns.loop_count` and `columns.loop_nucleotides`, are appended. The table has
/// already located its structure column, so nothing is written to `output` for an input
/// that lacks one. Rows too short to contain a structure cell are skipped and counted
/// in the summary.
///
/// # Errors
///
/// Returns an error if reading or writing the table fails.
#[instrument(skip_all, name = "analyze_workflow")]
pub fn run<R: Read, W: Write>(
    mut table: StructureTable<R>,
    output: W,
    columns: &ColumnNames,
    reporter: &ProgressReporter,
) -> Result<AnalyzeSummary, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loop analysis",
    });

    let structure_index = table.structure_index();

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(output);
    let mut header = table.headers().clone();
    header.push_field(&columns.loop_count);
    header.push_field(&columns.loop_nucleotides);
    writer.write_record(&header).map_err(TableError::from)?;

    let mut summary = AnalyzeSummary::default();
    for (row_num, record) in table.records().enumerate() {
        let mut record = record?;
        let Some(structure) = record.get(structure_index) else {
            warn!(row = row_num + 1, "Row has no structure cell; skipping.");
            summary.skipped += 1;
            continue;
        };

        let metrics = analyze(structure);
        record.push_field(&metrics.loop_count.to_string());
        record.push_field(&metrics.nucleotides_in_loops.to_string());
        writer.write_record(&record).map_err(TableError::from)?;
        summary.rows += 1;
    }
    writer.flush().map_err(TableError::from)?;

    info!(
        rows = summary.rows,
        skipped = summary.skipped,
        "Loop analysis finished."
    );
    if summary.skipped > 0 {
        reporter.report(Progress::Message(format!(
            "{} row(s) without a structure were skipped",
            summary.skipped
        )));
    }
    reporter.report(Progress::PhaseFinish);
    Ok(summary)
}
