//! Command-line interface: argument definitions, logging setup and the top-level run.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use crate::ingestion::{CleaningObserver, CompositeObserver, FileObserver, TracingObserver};
use crate::pipeline::{clean_file, CleaningOptions, CleaningStats};

/// Default source file, relative to the working directory.
pub const DEFAULT_INPUT: &str = "data/iris_multiple_mixed_types.csv";
/// Default destination file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "processed.csv";

/// Validate a CSV of labeled measurements and write the clean rows with normalized numbers.
///
/// Rows with a non-numeric measurement, an empty label or the wrong number of columns are
/// dropped and reported as `line <n>: unexpected value in column <c>`.
#[derive(Debug, Clone, Parser)]
#[command(name = "rust-data-cleaning", version, about)]
pub struct Args {
    /// Source CSV file
    #[arg(short = 'i', long = "input", value_name = "PATH", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Destination CSV file (created or overwritten)
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Treat the first input row as a header and skip it
    #[arg(long)]
    pub has_headers: bool,

    /// Write column names as the first output row
    #[arg(long)]
    pub write_header: bool,

    /// Field delimiter for input and output (single ASCII character)
    #[arg(short = 'd', long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Digits after the decimal point for measurements
    #[arg(short = 'p', long, default_value_t = 2)]
    pub precision: usize,

    /// Append JSON-lines events (dropped rows, outcome) to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log level implied by `--verbose`. The default only shows dropped-row warnings.
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Build pipeline options, wiring the tracing observer and the optional log file.
    pub fn cleaning_options(&self) -> CleaningOptions {
        let tracing: Arc<dyn CleaningObserver> = Arc::new(TracingObserver);
        let observer: Arc<dyn CleaningObserver> = match &self.log_file {
            Some(path) => {
                let file: Arc<dyn CleaningObserver> = Arc::new(FileObserver::new(path));
                Arc::new(CompositeObserver::new(vec![tracing, file]))
            }
            None => tracing,
        };

        CleaningOptions {
            has_headers: self.has_headers,
            delimiter: self.delimiter,
            precision: self.precision,
            write_header: self.write_header,
            observer: Some(observer),
            ..Default::default()
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
    }
}

/// Set up `tracing` output on stderr.
///
/// Lines carry no timestamp, target or level so a dropped row prints as the bare diagnostic.
/// Colour is only used when stderr is a terminal.
/// `RUST_LOG` overrides the level chosen by `--verbose`.
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rust_data_cleaning={}", args.get_log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .without_time()
                .with_target(false)
                .with_level(args.verbose > 0)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Run one cleaning pass as configured by `args`.
pub fn run(args: &Args) -> anyhow::Result<CleaningStats> {
    clean_file(&args.input, &args.output, &args.cleaning_options()).with_context(|| {
        format!(
            "failed to clean {} into {}",
            args.input.display(),
            args.output.display()
        )
    })
}
