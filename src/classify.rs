//! Category lookup for transaction descriptions.
//!
//! The parser only needs something that maps a description to a label; the
//! table-backed implementation here is what the CLI loads from disk.

use crate::error::{LedgerError, Result};
use csv::{ReaderBuilder, Trim};
use log::debug;
use serde::Deserialize;
use std::io::Read;

/// Label given to descriptions no table entry matches.
pub const UNCATEGORISED: &str = "uncategorised";

/// Maps a cleaned transaction description to a category label.
///
/// Implementations must be deterministic and should return a non-empty label.
pub trait Classifier {
    fn classify(&self, details: &str) -> String;
}

impl<F> Classifier for F
where
    F: Fn(&str) -> String,
{
    fn classify(&self, details: &str) -> String {
        self(details)
    }
}

/// One row of a category table file.
#[derive(Debug, Clone, Deserialize)]
struct CategoryRecord {
    pattern: String,
    category: String,
}

#[derive(Debug, Clone)]
struct CategoryRule {
    /// Upper-cased for case-insensitive matching.
    pattern: String,
    category: String,
}

/// Ordered list of `(pattern, category)` entries.
///
/// The first entry whose pattern occurs anywhere in the description (ignoring
/// case) supplies the category.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl CategoryTable {
    /// Creates an empty table; everything classifies as [`UNCATEGORISED`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. Later entries only apply when earlier ones miss.
    pub fn with_rule(mut self, pattern: &str, category: &str) -> Self {
        self.rules.push(CategoryRule {
            pattern: pattern.to_uppercase(),
            category: category.to_string(),
        });
        self
    }

    /// Loads a table from CSV with a `pattern,category` header.
    ///
    /// Entries with an empty pattern or category are rejected.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let mut table = CategoryTable::new();

        for (idx, result) in csv_reader.deserialize::<CategoryRecord>().enumerate() {
            let line = idx as u64 + 2; // 1-indexed, after the header
            let record = result?;

            if record.pattern.is_empty() {
                return Err(LedgerError::InvalidCategory {
                    line,
                    message: "empty pattern".to_string(),
                });
            }
            if record.category.is_empty() {
                return Err(LedgerError::InvalidCategory {
                    line,
                    message: format!("empty category for pattern {:?}", record.pattern),
                });
            }

            table = table.with_rule(&record.pattern, &record.category);
        }

        debug!("Loaded {} category rules", table.len());
        Ok(table)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Classifier for CategoryTable {
    fn classify(&self, details: &str) -> String {
        let upper = details.to_uppercase();
        self.rules
            .iter()
            .find(|rule| upper.contains(&rule.pattern))
            .map(|rule| rule.category.clone())
            .unwrap_or_else(|| UNCATEGORISED.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_empty_table_falls_back() {
        let table = CategoryTable::new();
        assert_eq!(table.classify("Test Shop"), UNCATEGORISED);
    }

    #[test]
    fn test_first_match_wins_case_insensitively() {
        let table = CategoryTable::new()
            .with_rule("tesco", "groceries")
            .with_rule("TESCO MOBILE", "phone");

        assert_eq!(table.classify("VDP-TESCO MOBILE"), "groceries");
        assert_eq!(table.classify("Tesco Stores 123"), "groceries");
        assert_eq!(table.classify("Spar"), UNCATEGORISED);
    }

    #[test]
    fn test_from_csv() {
        let csv = "pattern,category\n tesco , groceries \nLUAS,transport\n";
        let table = CategoryTable::from_csv(Cursor::new(csv)).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.classify("VDP-TESCO STORES"), "groceries");
        assert_eq!(table.classify("VDP-LUAS"), "transport");
    }

    #[test]
    fn test_from_csv_rejects_empty_category() {
        let csv = "pattern,category\ntesco,groceries\nluas,\n";
        let err = CategoryTable::from_csv(Cursor::new(csv)).unwrap_err();

        match err {
            LedgerError::InvalidCategory { line, .. } => assert_eq!(line, 3),
            other => panic!("Expected InvalidCategory, got {other:?}"),
        }
    }

    #[test]
    fn test_closure_classifier() {
        let classifier = |details: &str| format!("cat:{}", details.len());
        assert_eq!(classifier.classify("abc"), "cat:3");
    }
}
