use std::process;

use clap::Parser;
use rust_data_cleaning::cli::{self, Args};

fn main() {
    let args = Args::parse();
    cli::setup_logging(&args);

    if let Err(error) = cli::run(&args) {
        eprintln!("Error: {error:#}");
        process::exit(1);
    }
}
