use std::error::Error as StdError;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::error::CleaningError;
use crate::pipeline::CleaningStats;
use crate::types::Diagnostic;

/// Severity of a fatal failure reported to [`CleaningObserver::on_failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningSeverity {
    /// The run failed.
    Error,
    /// The run failed on I/O (open, create or write).
    Critical,
}

impl CleaningSeverity {
    /// Severity of a fatal error.
    pub fn for_error(error: &CleaningError) -> Self {
        match error {
            CleaningError::Open { .. } | CleaningError::Create { .. } | CleaningError::Io(_) => Self::Critical,
            CleaningError::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(_) => Self::Critical,
                _ => Self::Error,
            },
            CleaningError::SchemaMismatch { .. } => Self::Error,
        }
    }
}

/// Context about a cleaning run.
#[derive(Debug, Clone)]
pub struct CleaningContext {
    /// Source CSV.
    pub input: PathBuf,
    /// Destination CSV.
    pub output: PathBuf,
}

/// Observer interface for cleaning outcomes.
///
/// Implementors can record metrics, logs, or keep the diagnostics for later inspection.
pub trait CleaningObserver: Send + Sync {
    /// Called once per dropped row, in input order.
    fn on_row_dropped(&self, _ctx: &CleaningContext, _diagnostic: &Diagnostic) {}

    /// Called when the output has been fully written.
    fn on_success(&self, _ctx: &CleaningContext, _stats: CleaningStats) {}

    /// Called when the run fails fatally.
    fn on_failure(&self, _ctx: &CleaningContext, _severity: CleaningSeverity, _error: &CleaningError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn CleaningObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn CleaningObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl CleaningObserver for CompositeObserver {
    fn on_row_dropped(&self, ctx: &CleaningContext, diagnostic: &Diagnostic) {
        for o in &self.observers {
            o.on_row_dropped(ctx, diagnostic);
        }
    }

    fn on_success(&self, ctx: &CleaningContext, stats: CleaningStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &CleaningContext, severity: CleaningSeverity, error: &CleaningError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }
}

/// Emits events through `tracing`.
///
/// Dropped rows are logged at `WARN` with exactly the diagnostic text, e.g.
/// `line 3: unexpected value in column 1`. Success is logged at `INFO` and failure at `DEBUG`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl CleaningObserver for TracingObserver {
    fn on_row_dropped(&self, _ctx: &CleaningContext, diagnostic: &Diagnostic) {
        tracing::warn!("{diagnostic}");
        tracing::debug!(line = diagnostic.line, column = diagnostic.column, cause = %diagnostic.cause, "row dropped");
    }

    fn on_success(&self, ctx: &CleaningContext, stats: CleaningStats) {
        tracing::info!(
            input = %ctx.input.display(),
            output = %ctx.output.display(),
            rows_read = stats.rows_read,
            rows_written = stats.rows_written,
            rows_dropped = stats.rows_dropped,
            "cleaning finished"
        );
    }

    // The binary reports fatal errors itself; keep this below the default filter.
    fn on_failure(&self, ctx: &CleaningContext, severity: CleaningSeverity, error: &CleaningError) {
        tracing::debug!(
            ?severity,
            input = %ctx.input.display(),
            output = %ctx.output.display(),
            "cleaning failed: {error}"
        );
    }
}

/// Appends events to a local log file as JSON lines.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum FileEvent<'a> {
    RowDropped {
        ts: u64,
        input: &'a Path,
        message: String,
        #[serde(flatten)]
        diagnostic: &'a Diagnostic,
    },
    Finished {
        ts: u64,
        input: &'a Path,
        output: &'a Path,
        #[serde(flatten)]
        stats: CleaningStats,
    },
    Failed {
        ts: u64,
        input: &'a Path,
        output: &'a Path,
        severity: CleaningSeverity,
        error: String,
    },
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append(&self, event: &FileEvent<'_>) {
        let Ok(line) = serde_json::to_string(event) else {
            return;
        };
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl CleaningObserver for FileObserver {
    fn on_row_dropped(&self, ctx: &CleaningContext, diagnostic: &Diagnostic) {
        self.append(&FileEvent::RowDropped {
            ts: unix_ts(),
            input: &ctx.input,
            message: diagnostic.to_string(),
            diagnostic,
        });
    }

    fn on_success(&self, ctx: &CleaningContext, stats: CleaningStats) {
        self.append(&FileEvent::Finished {
            ts: unix_ts(),
            input: &ctx.input,
            output: &ctx.output,
            stats,
        });
    }

    fn on_failure(&self, ctx: &CleaningContext, severity: CleaningSeverity, error: &CleaningError) {
        self.append(&FileEvent::Failed {
            ts: unix_ts(),
            input: &ctx.input,
            output: &ctx.output,
            severity,
            error: error_chain(error),
        });
    }
}

/// `error` followed by each of its sources, separated by `: `.
fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut out = error.to_string();
    let mut cur = error.source();
    while let Some(err) = cur {
        out.push_str(": ");
        out.push_str(&err.to_string());
        cur = err.source();
    }
    out
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
