//! Command-line configuration.

use crate::ledger::ErrorPolicy;
use clap::Parser;
use std::path::PathBuf;

/// Where the export is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

/// Turn an AIB transaction export into a categorised ledger.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "aib-ledger", version, about)]
pub struct Config {
    /// Export to read, or `-` for stdin
    pub input: PathBuf,

    /// CSV file of `pattern,category` entries
    #[arg(long, value_name = "FILE")]
    pub categories: Option<PathBuf>,

    /// Log and skip rows that fail to parse instead of stopping
    #[arg(long)]
    pub skip_invalid: bool,

    /// The first line is a transaction, not a header
    #[arg(long)]
    pub no_header: bool,

    /// Print transactions in completed-date order
    #[arg(long)]
    pub sort: bool,
}

impl Config {
    pub fn input(&self) -> Input {
        if self.input.as_os_str() == "-" {
            Input::Stdin
        } else {
            Input::File(self.input.clone())
        }
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        if self.skip_invalid {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::Abort
        }
    }

    pub fn has_header(&self) -> bool {
        !self.no_header
    }
}
