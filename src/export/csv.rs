//! CSV writer for cleaned records.

use std::fs::File;
use std::path::Path;

use crate::error::{CleaningError, CleaningResult};
use crate::types::Record;

/// Options controlling how cleaned records are written.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Digits after the decimal point for every measurement.
    pub precision: usize,
    /// Field delimiter.
    pub delimiter: u8,
    /// Optional header row. `None` (the default) writes data rows only.
    pub header: Option<Vec<String>>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            precision: 2,
            delimiter: b',',
            header: None,
        }
    }
}

/// Render a record as output fields: fixed-point measurements, then the label verbatim.
pub fn format_record(record: &Record, precision: usize) -> Vec<String> {
    record
        .measurements
        .iter()
        .map(|v| format!("{v:.precision$}"))
        .chain(std::iter::once(record.label.clone()))
        .collect()
}

/// Create (or truncate) `path` and write one row per record, in order.
///
/// Returns the number of data rows written.
pub fn write_csv_to_path(path: impl AsRef<Path>, records: &[Record], options: &WriteOptions) -> CleaningResult<usize> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| CleaningError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv_to_writer(file, records, options)
}

/// Write records to any writer and flush it.
///
/// Fields containing the delimiter, quotes or line breaks are quoted. Leading or trailing spaces
/// alone do not trigger quoting.
pub fn write_csv_to_writer<W: std::io::Write>(
    writer: W,
    records: &[Record],
    options: &WriteOptions,
) -> CleaningResult<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_writer(writer);

    if let Some(header) = &options.header {
        wtr.write_record(header)?;
    }
    for record in records {
        wtr.write_record(format_record(record, options.precision))?;
    }
    wtr.flush()?;

    Ok(records.len())
}
