use super::fold::{FoldResult, StructuralMetrics};
use super::record::SequenceRecord;

/// One line of the output table: an input record joined with its fold and loop metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub id: String,
    pub sequence: String,
    pub fold: FoldResult,
    pub metrics: StructuralMetrics,
}

impl OutputRow {
    pub fn new(record: SequenceRecord, fold: FoldResult, metrics: StructuralMetrics) -> Self {
        let SequenceRecord { id, sequence } = record;
        Self {
            id,
            sequence,
            fold,
            metrics,
        }
    }

    pub fn structure(&self) -> &str {
        self.fold.structure()
    }

    pub fn energy(&self) -> f64 {
        self.fold.energy()
    }

    pub fn succeeded(&self) -> bool {
        self.fold.succeeded()
    }
}
