//! AIB export rows and the transactions parsed from them.

use crate::amount::Amount;
use crate::classify::Classifier;
use crate::error::ParseError;
use crate::visibility::{self, HideReason};
use chrono::NaiveDate;
use std::ops::Range;
use std::str::FromStr;

/// Tag printed in the last column of every ledger line.
pub const SOURCE: &str = "AIB";

/// Positional fields an export row must have.
pub const FIELD_COUNT: usize = 6;

const DATE_FIELD: usize = 1;
const DETAILS_FIELD: usize = 2;
const DEBIT_FIELD: usize = 3;
const CREDIT_FIELD: usize = 4;
const BALANCE_FIELD: usize = 5;

/// Two-digit years below this are in the 2000s, the rest in the 1900s.
const CENTURY_PIVOT: i32 = 69;
const LEDGER_DATE_FORMAT: &str = "%-d %b";

/// A single parsed AIB transaction.
///
/// Built only by [`Transaction::parse`] or [`Transaction::from_fields`]; every
/// field, including the hidden flag, is fixed at that point.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Category label from the classifier.
    id: String,

    /// Raw date column of the ledger. Nothing in an AIB export fills it.
    real_date: String,

    completed_date: NaiveDate,

    /// Description with quotes removed and surrounding spaces trimmed.
    details: String,

    /// Positive for debits, negative for credits.
    amount: Amount,

    /// Running balance exactly as exported.
    balance: String,

    source: &'static str,

    hidden: Option<HideReason>,
}

impl Transaction {
    /// Parses one raw export line, splitting it on every comma.
    ///
    /// Quoted descriptions containing commas are not supported; the row is
    /// taken positionally, as exported.
    pub fn parse<C>(raw: &str, classifier: &C) -> Result<Self, ParseError>
    where
        C: Classifier + ?Sized,
    {
        let fields: Vec<&str> = raw.split(',').collect();
        Self::from_fields(&fields, classifier)
    }

    /// Builds a transaction from an already split row.
    ///
    /// Columns past the balance are ignored.
    pub fn from_fields<C>(fields: &[&str], classifier: &C) -> Result<Self, ParseError>
    where
        C: Classifier + ?Sized,
    {
        if fields.len() < FIELD_COUNT {
            return Err(ParseError::MalformedRow {
                reason: format!(
                    "expected at least {} fields, found {}",
                    FIELD_COUNT,
                    fields.len()
                ),
            });
        }

        let completed_date = parse_date(fields[DATE_FIELD])?;
        let details = clean_details(fields[DETAILS_FIELD]);
        let amount = reconcile_amount(fields[DEBIT_FIELD], fields[CREDIT_FIELD])?;
        let hidden = visibility::hide_reason(&details, amount);
        let id = classifier.classify(&details);

        Ok(Transaction {
            id,
            real_date: String::new(),
            completed_date,
            details,
            amount,
            balance: fields[BALANCE_FIELD].to_string(),
            source: SOURCE,
            hidden,
        })
    }

    /// Category label assigned by the classifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Always empty for AIB rows.
    pub fn real_date(&self) -> &str {
        &self.real_date
    }

    /// Date the transaction completed.
    pub fn completed_date(&self) -> NaiveDate {
        self.completed_date
    }

    /// Cleaned description.
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Signed amount: debits positive, credits negative.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Running balance as exported, unparsed.
    pub fn balance(&self) -> &str {
        &self.balance
    }

    /// Bank tag, always [`SOURCE`].
    pub fn source(&self) -> &str {
        self.source
    }

    /// Returns `true` if the row is excluded from the printed ledger.
    pub fn is_hidden(&self) -> bool {
        self.hidden.is_some()
    }

    /// The rule that hid this row, if any.
    pub fn hidden_reason(&self) -> Option<HideReason> {
        self.hidden
    }

    /// Renders the tab-separated ledger line, or `None` for hidden rows.
    ///
    /// Columns: category, raw date, `5 Mar` style date, amount to two
    /// decimals, details, source.
    pub fn ledger_line(&self) -> Option<String> {
        if self.is_hidden() {
            return None;
        }

        Some(format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.id,
            self.real_date,
            self.completed_date.format(LEDGER_DATE_FORMAT),
            self.amount,
            self.details,
            self.source
        ))
    }
}

/// Parses a strict `DD/MM/YY` date.
fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    let malformed = || ParseError::MalformedDate {
        value: value.to_string(),
    };

    let well_formed = value.len() == 8
        && value.bytes().enumerate().all(|(i, b)| match i {
            2 | 5 => b == b'/',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(malformed());
    }

    let number = |range: Range<usize>| {
        value[range]
            .parse::<u32>()
            .map_err(|_| malformed())
    };
    let day = number(0..2)?;
    let month = number(3..5)?;
    let year = number(6..8)? as i32;
    let year = if year < CENTURY_PIVOT {
        2000 + year
    } else {
        1900 + year
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

/// Removes every `"` and then trims surrounding spaces.
///
/// Trimming after quote removal is the reverse of a plain trim-then-strip, so
/// `" Test Shop "` comes out as `Test Shop` rather than ` Test Shop `.
fn clean_details(value: &str) -> String {
    value.replace('"', "").trim_matches(' ').to_string()
}

/// Folds the separate debit and credit columns into one signed amount.
///
/// A column counts as present when it is non-empty. Credits are negated; a
/// zero credit stays zero.
fn reconcile_amount(debit: &str, credit: &str) -> Result<Amount, ParseError> {
    match (debit.is_empty(), credit.is_empty()) {
        (false, false) => Err(ParseError::MalformedAmount {
            reason: "both credit and debit present".to_string(),
        }),
        (false, true) => parse_amount(debit),
        (true, false) => Ok(-parse_amount(credit)?),
        (true, true) => Err(ParseError::MalformedAmount {
            reason: "neither credit nor debit present".to_string(),
        }),
    }
}

fn parse_amount(value: &str) -> Result<Amount, ParseError> {
    let malformed = || ParseError::MalformedAmount {
        reason: format!("{value:?} is not a decimal number"),
    };

    if !is_plain_decimal(value) {
        return Err(malformed());
    }
    Amount::from_str(value).map_err(|_| malformed())
}

/// Optional sign, digits, at most one `.`, and at least one digit.
///
/// `rust_decimal` also takes `_` separators and exponents, which a bank
/// export never contains.
fn is_plain_decimal(value: &str) -> bool {
    let unsigned = value.strip_prefix(&['+', '-'][..]).unwrap_or(value);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shops(_details: &str) -> String {
        "shops".to_string()
    }

    fn parse(raw: &str) -> Result<Transaction, ParseError> {
        Transaction::parse(raw, &shops)
    }

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_debit_row() {
        let tx = parse(r#",05/03/24," Test Shop ",12.50,,1000.00"#).unwrap();

        assert_eq!(tx.id(), "shops");
        assert_eq!(tx.completed_date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(tx.details(), "Test Shop");
        assert_eq!(tx.amount(), amt("12.50"));
        assert_eq!(tx.balance(), "1000.00");
        assert_eq!(tx.source(), "AIB");
        assert_eq!(tx.real_date(), "");
        assert!(!tx.is_hidden());
    }

    #[test]
    fn test_ledger_line() {
        let tx = parse(r#",05/03/24," Test Shop ",12.50,,1000.00"#).unwrap();
        assert_eq!(
            tx.ledger_line().unwrap(),
            "shops\t\t5 Mar\t12.50\tTest Shop\tAIB"
        );
    }

    #[test]
    fn test_ledger_line_rounds_and_signs_credits() {
        let tx = parse(",28/12/23,SALARY ACME,,2500.456,3000.00").unwrap();
        assert_eq!(
            tx.ledger_line().unwrap(),
            "shops\t\t28 Dec\t-2500.46\tSALARY ACME\tAIB"
        );
    }

    #[test]
    fn test_credit_is_negated() {
        let tx = parse(",01/01/24,Refund,,50.00,900.00").unwrap();
        assert_eq!(tx.amount(), amt("-50"));
    }

    #[test]
    fn test_zero_credit_stays_zero() {
        let tx = parse(",01/01/24,Interest,,0.00,900.00").unwrap();
        assert!(tx.amount().is_zero());
        assert_eq!(tx.amount().to_string(), "0.00");
        assert_eq!(tx.hidden_reason(), Some(HideReason::ZeroAmount));
        assert_eq!(tx.ledger_line(), None);
    }

    #[test]
    fn test_both_amounts_rejected() {
        let err = parse(",01/01/24,Shop,5.00,5.00,900.00").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedAmount {
                reason: "both credit and debit present".to_string()
            }
        );
    }

    #[test]
    fn test_no_amount_rejected() {
        let err = parse(",01/01/24,Shop,,,900.00").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedAmount {
                reason: "neither credit nor debit present".to_string()
            }
        );
    }

    #[test]
    fn test_non_numeric_amount_rejected() {
        assert!(matches!(
            parse(",01/01/24,Shop,12,50x,,900.00"),
            Err(ParseError::MalformedAmount { .. })
        ));
        assert!(matches!(
            parse(",01/01/24,Shop, ,,900.00"),
            Err(ParseError::MalformedAmount { .. })
        ));
    }

    #[test]
    fn test_plain_decimal() {
        for value in ["1", "12.50", "-3.2", "+4", ".5", "5."] {
            assert!(is_plain_decimal(value), "{value}");
        }
        for value in ["", ".", "-", "1_000.00", "1__0", "1e3", "1.2.3", "--1", " 1", "Inf"] {
            assert!(!is_plain_decimal(value), "{value}");
        }
    }

    #[test]
    fn test_underscored_amount_not_hidden_as_known_transfer() {
        assert!(matches!(
            parse(",01/01/24,931365 22689017,1__0,,900.00"),
            Err(ParseError::MalformedAmount { .. })
        ));
    }

    #[test]
    fn test_bad_dates_rejected() {
        for date in ["2024-03-05", "5/3/24", "05/03/2024", "31/02/24", "", "05/13/24"] {
            let raw = format!(",{date},Shop,1.00,,900.00");
            assert_eq!(
                parse(&raw).unwrap_err(),
                ParseError::MalformedDate {
                    value: date.to_string()
                },
                "{date}"
            );
        }
    }

    #[test]
    fn test_two_digit_year_pivot() {
        let tx = parse(",15/06/68,Shop,1.00,,900.00").unwrap();
        assert_eq!(tx.completed_date(), NaiveDate::from_ymd_opt(2068, 6, 15).unwrap());

        let tx = parse(",15/06/69,Shop,1.00,,900.00").unwrap();
        assert_eq!(tx.completed_date(), NaiveDate::from_ymd_opt(1969, 6, 15).unwrap());
    }

    #[test]
    fn test_short_row_rejected() {
        assert_eq!(
            parse(",01/01/24,Shop,1.00,").unwrap_err(),
            ParseError::MalformedRow {
                reason: "expected at least 6 fields, found 5".to_string()
            }
        );
    }

    #[test]
    fn test_extra_columns_ignored() {
        let tx = parse("1234,01/01/24,Shop,1.00,,900.00,EUR,Debit").unwrap();
        assert_eq!(tx.balance(), "900.00");
        assert_eq!(tx.amount(), amt("1"));
    }

    #[test]
    fn test_comma_inside_quotes_is_not_special() {
        // splits into Shop / Dublin, pushing the debit into the credit column
        assert!(matches!(
            parse(r#",01/01/24,"Shop, Dublin",5.00,,100.00"#),
            Err(ParseError::MalformedAmount { .. })
        ));
    }

    #[test]
    fn test_savings_credit_hidden() {
        let tx = parse(r#",01/01/24,"*INET SAVINGS X",,50.00,900.00"#).unwrap();
        assert_eq!(tx.amount(), amt("-50"));
        assert_eq!(tx.hidden_reason(), Some(HideReason::SavingsTransfer));
    }

    #[test]
    fn test_known_account_credit_stays_visible() {
        let tx = parse(r#",01/01/24,"931365 22689017",,10.00,900.00"#).unwrap();
        assert_eq!(tx.amount(), amt("-10"));
        assert!(!tx.is_hidden());
    }

    #[test]
    fn test_known_account_debit_hidden() {
        let tx = parse(",01/01/24,931365 22689017,10.00,,900.00").unwrap();
        assert_eq!(tx.hidden_reason(), Some(HideReason::KnownAccountTransfer));
    }

    #[test]
    fn test_revolut_takes_precedence_over_rent() {
        let tx = parse(",01/01/24,VDP-Revolut,600.00,,900.00").unwrap();
        assert_eq!(tx.hidden_reason(), Some(HideReason::RevolutTopUp));
    }

    #[test]
    fn test_classifier_sees_cleaned_details() {
        let echo = |details: &str| format!("[{details}]");
        let tx = Transaction::parse(r#",01/01/24, "Cafe" ,3.20,,900.00"#, &echo).unwrap();
        assert_eq!(tx.id(), "[Cafe]");
    }
}
