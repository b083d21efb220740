//! `rust-data-cleaning` validates a CSV of labeled numeric measurements against a declarative
//! [`types::Schema`], drops malformed rows with a [`types::Diagnostic`] each, and writes the
//! surviving rows with fixed-point numbers.
//!
//! The primary entrypoint is [`pipeline::clean_file`]. The binary wraps it in a small CLI
//! (see [`cli`]).
//!
//! ## Row rules
//!
//! With the default [`types::Schema::iris`] layout, columns 0–3 must parse as `f64` and column 4
//! must be non-empty text. A row fails at the first offending column, in positional order; a row
//! with the wrong number of columns fails at the first diverging index. Failing rows are never
//! fatal. Failing to open the source, create the destination or write to it is.
//!
//! ## Quick example
//!
//! ```rust
//! use rust_data_cleaning::export::{write_csv_to_writer, WriteOptions};
//! use rust_data_cleaning::ingestion::{load_csv_from_reader, LoadOptions};
//!
//! # fn main() -> Result<(), rust_data_cleaning::CleaningError> {
//! let input = "5.1,3.5,1.4,0.2,setosa\n5.1,hello,1.4,0.2,setosa\n5.1,3.5,1.4,0.2,\n";
//! let report = load_csv_from_reader(input.as_bytes(), &LoadOptions::default())?;
//!
//! let dropped: Vec<String> = report.diagnostics.iter().map(|d| d.to_string()).collect();
//! assert_eq!(
//!     dropped,
//!     vec![
//!         "line 2: unexpected value in column 1",
//!         "line 3: unexpected value in column 4",
//!     ]
//! );
//!
//! let mut out = Vec::new();
//! write_csv_to_writer(&mut out, &report.records, &WriteOptions::default())?;
//! assert_eq!(out, b"5.10,3.50,1.40,0.20,setosa\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema descriptor, records and diagnostics
//! - [`ingestion`]: CSV loading/validation and observer hooks
//! - [`export`]: CSV writer
//! - [`pipeline`]: load → report → write orchestration
//! - [`error`]: fatal error type

pub mod cli;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod pipeline;
pub mod types;

pub use error::{CleaningError, CleaningResult};
