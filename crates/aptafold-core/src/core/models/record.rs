/// A single identifier/sequence pair read from a header-delimited input file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceRecord {
    pub id: String,       // Header text after the marker, trimmed
    pub sequence: String, // All following non-empty lines, trimmed and joined
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    /// Number of nucleotides, counted in characters rather than bytes.
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
