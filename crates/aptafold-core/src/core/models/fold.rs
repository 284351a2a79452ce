/// Outcome of folding one sequence.
///
/// A successful result carries a dot-bracket structure exactly as long as the folded
/// sequence. A failed result is the zero-valued sentinel: empty structure and `0.0`
/// energy. The two states are only constructible through [`FoldResult::success`] and
/// [`FoldResult::failed`], so the sentinel can never carry stale data.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldResult {
    structure: String,
    energy: f64,
    succeeded: bool,
}

impl FoldResult {
    pub fn success(structure: String, energy: f64) -> Self {
        Self {
            structure,
            energy,
            succeeded: true,
        }
    }

    pub fn failed() -> Self {
        Self {
            structure: String::new(),
            energy: 0.0,
            succeeded: false,
        }
    }

    pub fn structure(&self) -> &str {
        &self.structure
    }

    /// Minimum free energy in kcal/mol.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }
}

/// Loop descriptors computed from a dot-bracket structure.
///
/// `nucleotides_in_loops >= loop_count` always holds: a loop is only counted together
/// with its first nucleotide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StructuralMetrics {
    pub loop_count: usize,
    pub nucleotides_in_loops: usize,
}

impl StructuralMetrics {
    pub fn new(loop_count: usize, nucleotides_in_loops: usize) -> Self {
        Self {
            loop_count,
            nucleotides_in_loops,
        }
    }
}
