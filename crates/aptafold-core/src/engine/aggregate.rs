use crate::core::models::fold::{FoldResult, StructuralMetrics};
use crate::core::models::record::SequenceRecord;
use crate::core::models::row::OutputRow;
use crate::core::structure::analyze;

/// Joins a record with its fold result and loop metrics.
pub fn combine(record: SequenceRecord, fold: FoldResult, metrics: StructuralMetrics) -> OutputRow {
    OutputRow::new(record, fold, metrics)
}

/// Analyzes the fold's structure and joins everything into one row.
///
/// A failed fold carries an empty structure, so its metrics come out as `(0, 0)`
/// through the same analysis path as every other row.
pub fn assemble(record: SequenceRecord, fold: FoldResult) -> OutputRow {
    let metrics = analyze(fold.structure());
    combine(record, fold, metrics)
}
