//! # AIB Ledger
//!
//! Parses AIB bank transaction exports into categorised transactions and
//! prints the ones worth seeing as a tab-separated ledger.
//!
//! ## Design Principles
//!
//! - **Exact amounts**: debit/credit columns become one signed `rust_decimal`
//!   amount, rendered to two places
//! - **Errors are values**: bad rows surface as [`ParseError`]; the caller
//!   picks abort or skip through [`ErrorPolicy`]
//! - **Fixed hide rules**: an ordered list, first match wins
//! - **Injected categories**: anything implementing [`Classifier`]
//!
//! ## Example
//!
//! ```
//! use aib_ledger::{CategoryTable, Transaction};
//!
//! let table = CategoryTable::new().with_rule("SHOP", "shopping");
//! let tx = Transaction::parse(r#",05/03/24," Test Shop ",12.50,,1000.00"#, &table).unwrap();
//! assert_eq!(tx.ledger_line().unwrap(), "shopping\t\t5 Mar\t12.50\tTest Shop\tAIB");
//! ```

pub mod amount;
pub mod classify;
pub mod config;
pub mod error;
pub mod ledger;
pub mod transaction;
pub mod visibility;

pub use amount::Amount;
pub use classify::{CategoryTable, Classifier, UNCATEGORISED};
pub use config::{Config, Input};
pub use error::{LedgerError, ParseError, Result};
pub use ledger::{ErrorPolicy, Ledger, LedgerSummary};
pub use transaction::Transaction;
pub use visibility::HideReason;
