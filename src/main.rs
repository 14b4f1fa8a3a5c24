//! AIB Ledger CLI
//!
//! Reads an AIB transaction export and prints one tab-separated ledger line
//! per visible transaction.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --categories categories.csv export.csv > ledger.tsv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` to see which rows were hidden and why

use aib_ledger::{CategoryTable, Config, Input, Ledger, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process;

fn main() {
    env_logger::init();
    let config = Config::parse();

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    let table = match &config.categories {
        Some(path) => CategoryTable::from_csv(BufReader::new(File::open(path)?))?,
        None => CategoryTable::new(),
    };

    let ledger = Ledger::new(table)
        .error_policy(config.error_policy())
        .has_header(config.has_header())
        .sort_by_date(config.sort);

    let stdout = io::stdout();
    let handle = BufWriter::new(stdout.lock());

    match config.input() {
        Input::Stdin => ledger.process(io::stdin().lock(), handle)?,
        Input::File(path) => ledger.process(BufReader::new(File::open(path)?), handle)?,
    };

    Ok(())
}
