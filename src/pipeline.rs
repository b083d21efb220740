//! End-to-end cleaning: load and validate the source, report dropped rows, write the output.
//!
//! The two phases run strictly in sequence. The source file is closed before the destination
//! is created, and the only thing passed between them is the ordered list of valid records.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::error::CleaningResult;
use crate::export::{write_csv_to_path, WriteOptions};
use crate::ingestion::observability::{CleaningContext, CleaningObserver, CleaningSeverity};
use crate::ingestion::{load_csv_from_path, LoadOptions};
use crate::types::Schema;

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    /// Data rows read from the source.
    pub rows_read: usize,
    /// Rows written to the destination.
    pub rows_written: usize,
    /// Rows dropped with a diagnostic.
    pub rows_dropped: usize,
}

/// Options controlling a cleaning run.
///
/// Use [`Default`] for the iris layout, headerless input and output, comma delimiter and two
/// decimal places.
#[derive(Clone)]
pub struct CleaningOptions {
    /// Column descriptor.
    pub schema: Schema,
    /// Skip the first input row as a header.
    pub has_headers: bool,
    /// Delimiter for both input and output.
    pub delimiter: u8,
    /// Digits after the decimal point in the output.
    pub precision: usize,
    /// Write the schema's field names as the first output row.
    pub write_header: bool,
    /// Optional observer for dropped rows and run outcome.
    pub observer: Option<Arc<dyn CleaningObserver>>,
}

impl fmt::Debug for CleaningOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleaningOptions")
            .field("schema", &self.schema)
            .field("has_headers", &self.has_headers)
            .field("delimiter", &(self.delimiter as char))
            .field("precision", &self.precision)
            .field("write_header", &self.write_header)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            schema: Schema::default(),
            has_headers: false,
            delimiter: b',',
            precision: 2,
            write_header: false,
            observer: None,
        }
    }
}

impl CleaningOptions {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            schema: self.schema.clone(),
            has_headers: self.has_headers,
            delimiter: self.delimiter,
        }
    }

    fn write_options(&self) -> WriteOptions {
        WriteOptions {
            precision: self.precision,
            delimiter: self.delimiter,
            header: self
                .write_header
                .then(|| self.schema.field_names().map(str::to_owned).collect()),
        }
    }
}

/// Clean `input` into `output`.
///
/// When an observer is configured, this function reports:
///
/// - `on_row_dropped` once per dropped row, in input order, before the output is created
/// - `on_success` with row counts once the output is flushed
/// - `on_failure` with a computed severity on any fatal error
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use rust_data_cleaning::ingestion::TracingObserver;
/// use rust_data_cleaning::pipeline::{clean_file, CleaningOptions};
///
/// # fn main() -> Result<(), rust_data_cleaning::CleaningError> {
/// let opts = CleaningOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     ..Default::default()
/// };
/// let stats = clean_file("iris.csv", "processed.csv", &opts)?;
/// println!("kept {} of {} rows", stats.rows_written, stats.rows_read);
/// # Ok(())
/// # }
/// ```
pub fn clean_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &CleaningOptions,
) -> CleaningResult<CleaningStats> {
    let ctx = CleaningContext {
        input: input.as_ref().to_path_buf(),
        output: output.as_ref().to_path_buf(),
    };

    let result = run(&ctx, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(stats) => obs.on_success(&ctx, *stats),
            Err(e) => obs.on_failure(&ctx, CleaningSeverity::for_error(e), e),
        }
    }

    result
}

fn run(ctx: &CleaningContext, options: &CleaningOptions) -> CleaningResult<CleaningStats> {
    let report = load_csv_from_path(&ctx.input, &options.load_options())?;
    tracing::debug!(
        rows = report.rows_read,
        valid = report.records.len(),
        dropped = report.diagnostics.len(),
        "loaded {}",
        ctx.input.display()
    );

    if let Some(obs) = options.observer.as_ref() {
        for diagnostic in &report.diagnostics {
            obs.on_row_dropped(ctx, diagnostic);
        }
    }

    let rows_written = write_csv_to_path(&ctx.output, &report.records, &options.write_options())?;
    tracing::debug!(rows = rows_written, "wrote {}", ctx.output.display());

    Ok(CleaningStats {
        rows_read: report.rows_read,
        rows_written,
        rows_dropped: report.diagnostics.len(),
    })
}
