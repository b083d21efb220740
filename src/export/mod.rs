//! Output writers for cleaned records.
//!
//! Only CSV is supported: see [`csv::write_csv_to_path`].

pub mod csv;

pub use self::csv::{format_record, write_csv_to_path, write_csv_to_writer, WriteOptions};
