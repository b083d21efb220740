//! CSV loading and row validation.

use std::fs::File;
use std::path::Path;

use crate::error::{CleaningError, CleaningResult};
use crate::types::{Diagnostic, Record, RowFailure, Schema};

/// Options controlling how the source CSV is read.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Column descriptor applied to every row.
    pub schema: Schema,
    /// Treat the first row as a header and skip it. Off by default: the first row is data.
    pub has_headers: bool,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            schema: Schema::default(),
            has_headers: false,
            delimiter: b',',
        }
    }
}

/// Result of a load: valid records and diagnostics for dropped rows, both in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Rows that passed validation.
    pub records: Vec<Record>,
    /// One entry per dropped row.
    pub diagnostics: Vec<Diagnostic>,
    /// Data rows read, kept or dropped.
    pub rows_read: usize,
}

/// Load and validate a CSV file.
///
/// Failing to open `path` is fatal. Malformed rows are not: they are dropped and described
/// in [`LoadReport::diagnostics`]. The file handle is released before this returns.
pub fn load_csv_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> CleaningResult<LoadReport> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CleaningError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_csv_from_reader(file, options)
}

/// Load and validate CSV data from any reader.
///
/// Rules:
///
/// - Rows may have any width; a width other than the schema's is a row failure.
/// - Each field is parsed according to its schema column, stopping at the first failure.
/// - Rows that are not valid UTF-8 are row failures.
/// - Any other read error (e.g. I/O) aborts the load.
pub fn load_csv_from_reader<R: std::io::Read>(reader: R, options: &LoadOptions) -> CleaningResult<LoadReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(options.has_headers)
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(reader);

    // Header, when present, occupies line 1.
    let first_line = if options.has_headers { 2 } else { 1 };

    let mut report = LoadReport::default();
    for (row_idx0, result) in rdr.records().enumerate() {
        let line = row_idx0 + first_line;
        report.rows_read += 1;

        let outcome = match result {
            Ok(row) => options.schema.apply(line, &row),
            Err(err) => match err.kind() {
                csv::ErrorKind::Utf8 { err: utf8, .. } => Err(Diagnostic {
                    line,
                    column: utf8.field(),
                    cause: RowFailure::InvalidUtf8,
                }),
                _ => return Err(err.into()),
            },
        };

        match outcome {
            Ok(record) => report.records.push(record),
            Err(diagnostic) => report.diagnostics.push(diagnostic),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(input: &[u8]) -> LoadReport {
        load_csv_from_reader(input, &LoadOptions::default()).unwrap()
    }

    #[test]
    fn first_row_is_data_by_default() {
        let report = load(b"5.1,3.5,1.4,0.2,setosa\n");
        assert_eq!(report.rows_read, 1);
        assert_eq!(report.records.len(), 1);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn line_counter_advances_over_dropped_rows() {
        let report = load(b"1,2,3,4,a\nx,2,3,4,a\n1,2,3,4,\n1,2,3,4,b\n");
        assert_eq!(report.rows_read, 4);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[1].label, "b");
        let lines: Vec<_> = report.diagnostics.iter().map(|d| (d.line, d.column)).collect();
        assert_eq!(lines, vec![(2, 0), (3, 4)]);
    }

    #[test]
    fn header_row_shifts_line_numbers() {
        let options = LoadOptions {
            has_headers: true,
            ..Default::default()
        };
        let input = b"a,b,c,d,species\n1,2,3,4,x\n1,2,bad,4,x\n";
        let report = load_csv_from_reader(&input[..], &options).unwrap();
        assert_eq!(report.rows_read, 2);
        assert_eq!(report.diagnostics[0].line, 3);
        assert_eq!(report.diagnostics[0].column, 2);
    }

    #[test]
    fn invalid_utf8_drops_only_that_row() {
        let report = load(b"1,2,3,4,a\n1,2,3,4,\xff\xfe\n1,2,3,4,c\n");
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.diagnostics[0].line, 2);
        assert_eq!(report.diagnostics[0].column, 4);
        assert_eq!(report.diagnostics[0].cause, RowFailure::InvalidUtf8);
    }

    #[test]
    fn custom_delimiter() {
        let options = LoadOptions {
            delimiter: b';',
            ..Default::default()
        };
        let report = load_csv_from_reader(&b"1;2;3;4;a\n"[..], &options).unwrap();
        assert_eq!(report.records[0].measurements, [1.0, 2.0, 3.0, 4.0]);
    }
}
