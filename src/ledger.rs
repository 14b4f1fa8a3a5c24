//! Export-to-ledger driver.
//!
//! Reads an AIB export record by record, parses each row into a
//! [`Transaction`] and writes one line per visible transaction. What happens
//! to a bad row is decided by the [`ErrorPolicy`].

use crate::classify::Classifier;
use crate::error::{LedgerError, ParseError, Result};
use crate::transaction::Transaction;
use csv::{ByteRecord, ReaderBuilder, Trim};
use log::{debug, info, warn};
use std::io::{Read, Write};

/// What to do with a row that fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first bad row and return its error.
    #[default]
    Abort,
    /// Log the bad row and carry on.
    Skip,
}

/// Counts from one run over an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerSummary {
    /// Data rows read (header excluded).
    pub rows: u64,
    /// Lines written.
    pub printed: u64,
    /// Rows parsed but hidden by a visibility rule.
    pub hidden: u64,
    /// Rows dropped under [`ErrorPolicy::Skip`].
    pub skipped: u64,
}

/// Turns AIB exports into ledger lines.
///
/// # Example
///
/// ```
/// use aib_ledger::{CategoryTable, Ledger};
/// use std::io::Cursor;
///
/// let export = "Posted Account,Date,Description,Debit,Credit,Balance\n\
///               1234,05/03/24,Test Shop,12.50,,1000.00\n";
/// let ledger = Ledger::new(CategoryTable::new());
/// let mut out = Vec::new();
/// ledger.process(Cursor::new(export), &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "uncategorised\t\t5 Mar\t12.50\tTest Shop\tAIB\n"
/// );
/// ```
pub struct Ledger<C> {
    classifier: C,
    error_policy: ErrorPolicy,
    has_header: bool,
    sort_by_date: bool,
}

impl<C: Classifier> Ledger<C> {
    /// Creates a ledger that aborts on bad rows, skips one header row and
    /// writes lines in input order.
    pub fn new(classifier: C) -> Self {
        Ledger {
            classifier,
            error_policy: ErrorPolicy::default(),
            has_header: true,
            sort_by_date: false,
        }
    }

    /// Whether a bad row stops the run or is skipped.
    pub fn error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    /// Whether the first line of the input is a header to skip.
    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Emit lines in ascending completed-date order instead of input order.
    ///
    /// Ties keep their input order. Buffers the whole export.
    pub fn sort_by_date(mut self, sort_by_date: bool) -> Self {
        self.sort_by_date = sort_by_date;
        self
    }

    /// Processes an export, writing each visible transaction as a line.
    pub fn process<R: Read, W: Write>(&self, reader: R, mut writer: W) -> Result<LedgerSummary> {
        let mut printed = 0;
        let mut hidden = 0;
        let mut buffered = Vec::new();

        let (rows, skipped) = self.for_each_transaction(reader, |transaction| {
            if let Some(reason) = transaction.hidden_reason() {
                debug!("Hiding {:?} ({})", transaction.details(), reason);
                hidden += 1;
            } else if self.sort_by_date {
                buffered.push(transaction);
            } else {
                printed += write_line(&transaction, &mut writer)?;
            }
            Ok(())
        })?;

        buffered.sort_by_key(Transaction::completed_date);
        for transaction in &buffered {
            printed += write_line(transaction, &mut writer)?;
        }
        writer.flush()?;

        let summary = LedgerSummary {
            rows,
            printed,
            hidden,
            skipped,
        };
        info!(
            "Processed {} rows: {} printed, {} hidden, {} skipped",
            summary.rows, summary.printed, summary.hidden, summary.skipped
        );
        Ok(summary)
    }

    /// Parses every row of an export, hidden ones included.
    pub fn parse_all<R: Read>(&self, reader: R) -> Result<Vec<Transaction>> {
        let mut transactions = Vec::new();
        self.for_each_transaction(reader, |transaction| {
            transactions.push(transaction);
            Ok(())
        })?;
        Ok(transactions)
    }

    /// Streams parsed rows into `handle`, applying the error policy.
    ///
    /// Rows are split on every comma; quotes carry no meaning. Fields are
    /// decoded per row so that a stray non-UTF-8 byte is a row error, not a
    /// read error. Returns the number of rows read and the number skipped.
    fn for_each_transaction<R, F>(&self, reader: R, mut handle: F) -> Result<(u64, u64)>
    where
        R: Read,
        F: FnMut(Transaction) -> Result<()>,
    {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(self.has_header)
            .quoting(false)
            .flexible(true)
            .trim(Trim::None)
            .from_reader(reader);

        let mut rows = 0;
        let mut skipped = 0;

        for result in csv_reader.byte_records() {
            let record = result?;
            rows += 1;

            match self.parse_record(&record) {
                Ok(transaction) => handle(transaction)?,
                Err(err) => {
                    let row = record_line(&record);
                    match self.error_policy {
                        ErrorPolicy::Abort => {
                            return Err(LedgerError::InvalidRow { row, source: err });
                        }
                        ErrorPolicy::Skip => {
                            warn!("Row {}: {}, skipping", row, err);
                            skipped += 1;
                        }
                    }
                }
            }
        }

        Ok((rows, skipped))
    }

    fn parse_record(&self, record: &ByteRecord) -> std::result::Result<Transaction, ParseError> {
        let fields = record
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                std::str::from_utf8(field).map_err(|_| ParseError::MalformedRow {
                    reason: format!("field {} is not valid UTF-8", idx),
                })
            })
            .collect::<std::result::Result<Vec<&str>, _>>()?;
        Transaction::from_fields(&fields, &self.classifier)
    }
}

/// Writes the ledger line for a visible transaction, returning lines written.
fn write_line<W: Write>(transaction: &Transaction, writer: &mut W) -> Result<u64> {
    match transaction.ledger_line() {
        Some(line) => {
            writeln!(writer, "{}", line)?;
            Ok(1)
        }
        None => Ok(0),
    }
}

/// 1-indexed line the record started on.
fn record_line(record: &ByteRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}
