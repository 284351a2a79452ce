use crate::core::io::traits::SequenceFile;
use crate::core::models::record::SequenceRecord;
use std::io::{self, BufRead, Lines};
use thiserror::Error;

pub const HEADER_MARKER: char = '>';

const PREVIEW_CHARS: usize = 24;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(
        "Malformed input on line {line}: sequence data '{preview}' appears before any '{marker}' header",
        marker = HEADER_MARKER
    )]
    MalformedInput { line: usize, preview: String },
}

/// Lazily yields records from a header-delimited sequence stream.
///
/// Each header starts a new record; the record is emitted when the next header or the
/// end of input is reached. Sequence lines are trimmed and joined without separators,
/// blank lines are skipped. Once an error has been yielded the iterator is exhausted.
pub struct FastaRecords<R> {
    lines: Lines<R>,
    line_num: usize,
    current_id: Option<String>,
    sequence: String,
    finished: bool,
}

impl<R: BufRead> FastaRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
            current_id: None,
            sequence: String::new(),
            finished: false,
        }
    }

    fn flush(&mut self, id: String) -> SequenceRecord {
        SequenceRecord::new(id, std::mem::take(&mut self.sequence))
    }
}

impl<R: BufRead> Iterator for FastaRecords<R> {
    type Item = Result<SequenceRecord, FastaError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
                None => {
                    self.finished = true;
                    let id = self.current_id.take()?;
                    return Some(Ok(self.flush(id)));
                }
            };
            self.line_num += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(header) = trimmed.strip_prefix(HEADER_MARKER) {
                let previous = self.current_id.replace(header.trim().to_string());
                if let Some(id) = previous {
                    return Some(Ok(self.flush(id)));
                }
                continue;
            }

            if self.current_id.is_none() {
                self.finished = true;
                return Some(Err(FastaError::MalformedInput {
                    line: self.line_num,
                    preview: trimmed.chars().take(PREVIEW_CHARS).collect(),
                }));
            }
            self.sequence.push_str(trimmed);
        }
    }
}

pub struct FastaFile;

impl SequenceFile for FastaFile {
    type Error = FastaError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<SequenceRecord>, Self::Error> {
        FastaRecords::new(reader).collect()
    }
}

/// Parses a complete FASTA document held in memory.
pub fn parse(text: &str) -> Result<Vec<SequenceRecord>, FastaError> {
    FastaFile::read_from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn parses_records_in_file_order() {
        let text = ">apt-1\nGGGAAACCC\n>apt-2\nACGU\n>apt-3\nUUUU\n";
        let records = parse(text).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0], SequenceRecord::new("apt-1", "GGGAAACCC"));
        assert_eq!(records[1], SequenceRecord::new("apt-2", "ACGU"));
        assert_eq!(records[2], SequenceRecord::new("apt-3", "UUUU"));
    }

    #[test]
    fn joins_multiline_sequences_and_skips_blank_lines() {
        let text = "\n>  apt-1 selex round 4  \n  GGGA \n\nAACCC\n\n>apt-2\r\nAC\r\nGU\r\n";
        let records = parse(text).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "apt-1 selex round 4");
        assert_eq!(records[0].sequence, "GGGAAACCC");
        assert_eq!(records[1].id, "apt-2");
        assert_eq!(records[1].sequence, "ACGU");
    }

    #[test]
    fn preserves_sequence_case() {
        let records = parse(">mixed\nacguACGU\n").unwrap();
        assert_eq!(records[0].sequence, "acguACGU");
    }

    #[test]
    fn header_without_sequence_yields_empty_record() {
        let records = parse(">empty\n>full\nACGU\n").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], SequenceRecord::new("empty", ""));
        assert_eq!(records[1], SequenceRecord::new("full", "ACGU"));
    }

    #[test]
    fn header_with_no_identifier_is_accepted() {
        let records = parse(">\nACGU\n").unwrap();
        assert_eq!(records, vec![SequenceRecord::new("", "ACGU")]);
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n   \n").unwrap().is_empty());
    }

    #[test]
    fn sequence_before_any_header_is_malformed() {
        let result = parse("ACGUACGU\n>apt-1\nACGU\n");
        match result {
            Err(FastaError::MalformedInput { line, preview }) => {
                assert_eq!(line, 1);
                assert_eq!(preview, "ACGUACGU");
            }
            other => panic!("Expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn malformed_error_reports_line_after_leading_blank_lines() {
        let result = parse("\n\n  ACGU\n");
        assert!(matches!(
            result,
            Err(FastaError::MalformedInput { line: 3, .. })
        ));
    }

    #[test]
    fn malformed_error_message_names_the_line() {
        let err = parse("GGGG\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 1"));
        assert!(message.contains("'>' header"));
    }

    #[test]
    fn reparsing_the_same_text_is_identical() {
        let text = ">a\nAC\nGU\n>b\nGG\n";
        assert_eq!(parse(text).unwrap(), parse(text).unwrap());
    }

    #[test]
    fn lazy_iterator_stops_after_error() {
        let mut records = FastaRecords::new("ACGU\n>a\nGG\n".as_bytes());
        assert!(matches!(
            records.next(),
            Some(Err(FastaError::MalformedInput { .. }))
        ));
        assert!(records.next().is_none());
    }

    #[test]
    fn lazy_iterator_yields_records_one_at_a_time() {
        let mut records = FastaRecords::new(">a\nAC\n>b\nGU\n".as_bytes());
        assert_eq!(records.next().unwrap().unwrap().id, "a");
        assert_eq!(records.next().unwrap().unwrap().id, "b");
        assert!(records.next().is_none());
    }

    #[test]
    fn read_from_path_parses_file_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aptamers.fasta");
        let mut file = File::create(&path).unwrap();
        writeln!(file, ">apt-1\nGGGAAACCC\n>apt-2\nACGU").unwrap();

        let records = FastaFile::read_from_path(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].sequence, "ACGU");
    }

    #[test]
    fn read_from_path_propagates_missing_file_as_io_error() {
        let dir = tempdir().unwrap();
        let result = FastaFile::read_from_path(dir.path().join("missing.fasta"));
        assert!(matches!(result, Err(FastaError::Io(_))));
    }
}
