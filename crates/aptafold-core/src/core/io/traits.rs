use crate::core::models::record::SequenceRecord;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading multi-record sequence file formats.
///
/// Implementors turn a text stream into an ordered list of [`SequenceRecord`]s. The
/// order of the returned records is always the order in which they appear in the
/// input, and reading the same input twice yields identical output.
pub trait SequenceFile {
    /// The error type for parsing and I/O failures.
    type Error: Error + From<io::Error>;

    /// Reads all records from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the parsed records in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed or the reader fails. A malformed
    /// file is rejected as a whole; no partial record list is returned.
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<SequenceRecord>, Self::Error>;

    /// Reads all records from an in-memory string.
    ///
    /// # Arguments
    ///
    /// * `text` - The complete file contents.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`SequenceFile::read_from`].
    fn read_from_str(text: &str) -> Result<Vec<SequenceRecord>, Self::Error> {
        let mut reader = text.as_bytes();
        Self::read_from(&mut reader)
    }

    /// Reads all records from a file path.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the file to read.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
