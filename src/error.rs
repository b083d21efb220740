use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for cleaning operations.
pub type CleaningResult<T> = Result<T, CleaningError>;

/// Fatal errors returned by loading, writing and the end-to-end pipeline.
///
/// Row-level problems never surface here; they are reported as
/// [`crate::types::Diagnostic`]s and the row is dropped.
#[derive(Debug, Error)]
pub enum CleaningError {
    /// The source file could not be opened.
    #[error("cannot open source file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination file could not be created.
    #[error("cannot create destination file {}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Underlying I/O error (e.g. flushing the destination).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV read or write error that is not recoverable at row level.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// The column descriptor is not a valid schema.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn io_cause_is_a_source_not_part_of_the_message() {
        let err = CleaningError::Open {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "cannot open source file missing.csv");
        assert_eq!(err.source().map(|s| s.to_string()), Some("gone".to_string()));

        let chain = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(chain, "cannot open source file missing.csv: gone");
    }
}
