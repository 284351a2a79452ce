use crate::core::models::row::OutputRow;
use csv::StringRecord;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Column '{name}' not found in table header (available: {})", .available.join(", "))]
    MissingColumn { name: String, available: Vec<String> },
}

/// Header names used for the output table and for locating columns in input tables.
///
/// Deserializes from a `[columns]` table with kebab-case keys; absent keys keep their
/// default header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ColumnNames {
    pub id: String,
    pub sequence: String,
    pub structure: String,
    pub energy: String,
    pub loop_count: String,
    pub loop_nucleotides: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            id: "Id".to_string(),
            sequence: "Sequence".to_string(),
            structure: "Structure".to_string(),
            energy: "Energy".to_string(),
            loop_count: "LoopCount".to_string(),
            loop_nucleotides: "NucleotidesInLoops".to_string(),
        }
    }
}

/// Formats an energy value the way it appears in output tables (two decimals).
pub fn format_energy(energy: f64) -> String {
    format!("{:.2}", energy)
}

/// Streams [`OutputRow`]s into a CSV table.
///
/// The header is written on construction, so a table with zero rows still carries its
/// column names. Rows are written as they arrive; call [`RowWriter::finish`] to flush.
pub struct RowWriter<W: Write> {
    writer: csv::Writer<W>,
    include_metrics: bool,
    rows_written: usize,
}

impl<W: Write> RowWriter<W> {
    pub fn new(inner: W, columns: &ColumnNames, include_metrics: bool) -> Result<Self, TableError> {
        let mut writer = csv::Writer::from_writer(inner);

        let mut header = vec![
            columns.id.as_str(),
            columns.sequence.as_str(),
            columns.structure.as_str(),
            columns.energy.as_str(),
        ];
        if include_metrics {
            header.push(columns.loop_count.as_str());
            header.push(columns.loop_nucleotides.as_str());
        }
        writer.write_record(&header)?;

        Ok(Self {
            writer,
            include_metrics,
            rows_written: 0,
        })
    }

    pub fn write_row(&mut self, row: &OutputRow) -> Result<(), TableError> {
        let energy = format_energy(row.energy());
        let mut record = vec![
            row.id.clone(),
            row.sequence.clone(),
            row.structure().to_string(),
            energy,
        ];
        if self.include_metrics {
            record.push(row.metrics.loop_count.to_string());
            record.push(row.metrics.nucleotides_in_loops.to_string());
        }
        self.writer.write_record(&record)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn write_all<'a>(
        &mut self,
        rows: impl IntoIterator<Item = &'a OutputRow>,
    ) -> Result<(), TableError> {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize, TableError> {
        self.writer.flush()?;
        Ok(self.rows_written)
    }
}

impl RowWriter<File> {
    pub fn create<P: AsRef<Path>>(
        path: P,
        columns: &ColumnNames,
        include_metrics: bool,
    ) -> Result<Self, TableError> {
        let file = File::create(path)?;
        Self::new(file, columns, include_metrics)
    }
}

/// A CSV table that carries a dot-bracket structure column.
///
/// Rows are read flexibly: a row shorter than the header is still returned, and it is
/// up to the caller to decide what to do when the structure cell is absent.
pub struct StructureTable<R: Read> {
    reader: csv::Reader<R>,
    headers: StringRecord,
    structure_index: usize,
}

impl<R: Read> StructureTable<R> {
    pub fn from_reader(inner: R, structure_column: &str) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(inner);
        let headers = reader.headers()?.clone();

        let structure_index = headers
            .iter()
            .position(|h| h.trim() == structure_column)
            .ok_or_else(|| TableError::MissingColumn {
                name: structure_column.to_string(),
                available: headers.iter().map(str::to_string).collect(),
            })?;

        Ok(Self {
            reader,
            headers,
            structure_index,
        })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn structure_index(&self) -> usize {
        self.structure_index
    }

    pub fn records(&mut self) -> impl Iterator<Item = Result<StringRecord, TableError>> + '_ {
        self.reader
            .records()
            .map(|result| result.map_err(TableError::from))
    }
}

impl StructureTable<File> {
    pub fn open<P: AsRef<Path>>(path: P, structure_column: &str) -> Result<Self, TableError> {
        let file = File::open(path)?;
        Self::from_reader(file, structure_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::fold::{FoldResult, StructuralMetrics};
    use crate::core::models::record::SequenceRecord;

    fn row(id: &str, sequence: &str, fold: FoldResult, metrics: StructuralMetrics) -> OutputRow {
        OutputRow::new(SequenceRecord::new(id, sequence), fold, metrics)
    }

    fn written(rows: &[OutputRow], columns: &ColumnNames, include_metrics: bool) -> String {
        let mut buffer = Vec::new();
        let mut writer = RowWriter::new(&mut buffer, columns, include_metrics).unwrap();
        writer.write_all(rows).unwrap();
        assert_eq!(writer.finish().unwrap(), rows.len());
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn format_energy_uses_two_decimals() {
        assert_eq!(format_energy(-1.2), "-1.20");
        assert_eq!(format_energy(0.0), "0.00");
        assert_eq!(format_energy(-12.346), "-12.35");
    }

    #[test]
    fn writes_fold_columns_only_without_metrics() {
        let rows = vec![row(
            "apt-1",
            "GGGAAACCC",
            FoldResult::success("(((...)))".to_string(), -1.2),
            StructuralMetrics::new(1, 3),
        )];
        let output = written(&rows, &ColumnNames::default(), false);

        assert_eq!(
            output,
            "Id,Sequence,Structure,Energy\napt-1,GGGAAACCC,(((...))),-1.20\n"
        );
    }

    #[test]
    fn writes_metric_columns_when_requested() {
        let rows = vec![
            row(
                "apt-1",
                "GGGAAACCC",
                FoldResult::success("(((...)))".to_string(), -1.2),
                StructuralMetrics::new(1, 3),
            ),
            row(
                "apt-2",
                "ACGU",
                FoldResult::failed(),
                StructuralMetrics::default(),
            ),
        ];
        let output = written(&rows, &ColumnNames::default(), true);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "Id,Sequence,Structure,Energy,LoopCount,NucleotidesInLoops"
        );
        assert_eq!(lines[1], "apt-1,GGGAAACCC,(((...))),-1.20,1,3");
        assert_eq!(lines[2], "apt-2,ACGU,,0.00,0,0");
    }

    #[test]
    fn header_uses_column_overrides() {
        let columns = ColumnNames {
            id: "Aptamer".to_string(),
            structure: "Secondary Structure".to_string(),
            energy: "MFE".to_string(),
            ..Default::default()
        };
        let output = written(&[], &columns, false);
        assert_eq!(output, "Aptamer,Sequence,Secondary Structure,MFE\n");
    }

    #[test]
    fn identifiers_with_commas_are_quoted() {
        let rows = vec![row(
            "apt-1, round 3",
            "ACGU",
            FoldResult::failed(),
            StructuralMetrics::default(),
        )];
        let output = written(&rows, &ColumnNames::default(), false);
        assert!(output.contains("\"apt-1, round 3\",ACGU,,0.00"));
    }

    #[test]
    fn structure_table_locates_named_column() {
        let data = "Aptamer,Secondary Structure,MFE\napt-1,(((...))),-1.20\n";
        let mut table = StructureTable::from_reader(data.as_bytes(), "Secondary Structure").unwrap();

        assert_eq!(table.structure_index(), 1);
        assert_eq!(table.headers().len(), 3);
        let records: Vec<_> = table.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(1), Some("(((...)))"));
    }

    #[test]
    fn structure_table_reports_missing_column() {
        let data = "Id,Sequence\napt-1,ACGU\n";
        let result = StructureTable::from_reader(data.as_bytes(), "Structure");

        match result {
            Err(TableError::MissingColumn { name, available }) => {
                assert_eq!(name, "Structure");
                assert_eq!(available, vec!["Id".to_string(), "Sequence".to_string()]);
            }
            Err(other) => panic!("Expected MissingColumn, got {:?}", other),
            Ok(_) => panic!("Expected MissingColumn, got a table"),
        }
    }

    #[test]
    fn structure_table_tolerates_short_rows() {
        let data = "Id,Structure,Energy\napt-1\napt-2,(..),-0.5\n";
        let mut table = StructureTable::from_reader(data.as_bytes(), "Structure").unwrap();
        let records: Vec<_> = table.records().collect::<Result<_, _>>().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get(1), None);
        assert_eq!(records[1].get(1), Some("(..)"));
    }

    #[test]
    fn structure_table_opens_file_and_checks_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folded.csv");
        std::fs::write(&path, "Id,Structure\napt-1,(..)\n").unwrap();

        let mut table = StructureTable::open(&path, "Structure").unwrap();
        assert_eq!(table.records().count(), 1);
        assert!(matches!(
            StructureTable::open(&path, "Energy"),
            Err(TableError::MissingColumn { .. })
        ));
        assert!(matches!(
            StructureTable::open(dir.path().join("absent.csv"), "Structure"),
            Err(TableError::Io(_))
        ));
    }
}
