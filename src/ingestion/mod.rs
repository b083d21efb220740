//! Loading and validation of source data.
//!
//! Most callers should use [`crate::pipeline::clean_file`], which loads, reports dropped rows
//! to a [`CleaningObserver`] and writes the output in one call.
//!
//! The pieces are also available separately:
//! - [`csv`]: schema-driven CSV loading into a [`LoadReport`]
//! - [`observability`]: observer hooks for dropped rows and run outcomes

pub mod csv;
pub mod observability;

pub use self::csv::{load_csv_from_path, load_csv_from_reader, LoadOptions, LoadReport};
pub use observability::{
    CleaningContext, CleaningObserver, CleaningSeverity, CompositeObserver, FileObserver, TracingObserver,
};
