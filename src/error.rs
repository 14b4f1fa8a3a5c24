//! Error types for row parsing and ledger processing.

use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Why a single export row could not be turned into a transaction.
///
/// None of these are ever coerced into a default value: a bad date or amount
/// would silently change which rows are hidden and what gets printed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The row is short of positional fields or is not valid UTF-8
    #[error("malformed row: {reason}")]
    MalformedRow { reason: String },

    /// The date field is not `DD/MM/YY`
    #[error("malformed date {value:?}: expected DD/MM/YY")]
    MalformedDate { value: String },

    /// Debit/credit fields are both set, both empty, or not a decimal number
    #[error("malformed amount: {reason}")]
    MalformedAmount { reason: String },
}

/// Errors that can occur while processing an export.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Failed to open, read or write a file or stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A row failed to parse while running with the abort policy
    #[error("Invalid transaction at row {row}: {source}")]
    InvalidRow {
        row: u64,
        #[source]
        source: ParseError,
    },

    /// Category table contains an unusable entry
    #[error("Invalid category table entry {line}: {message}")]
    InvalidCategory { line: u64, message: String },
}
