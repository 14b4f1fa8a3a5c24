//! Rules that keep internal transfers and noise out of the printed ledger.
//!
//! Rules are evaluated in order and the first match wins. The order only
//! matters for rows that would satisfy more than one rule, but the reason
//! reported for such rows depends on it.

use crate::amount::Amount;
use std::fmt;

/// Why a transaction was hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideReason {
    /// Nothing moved.
    ZeroAmount,
    /// Top-up of a Revolut account from this one.
    RevolutTopUp,
    /// Transfer into the savings account.
    SavingsTransfer,
    /// Monthly rent share sent by internet banking.
    RentTransfer,
    /// Standing transfer to a known account.
    KnownAccountTransfer,
}

impl fmt::Display for HideReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HideReason::ZeroAmount => "zero amount",
            HideReason::RevolutTopUp => "revolut top-up",
            HideReason::SavingsTransfer => "savings transfer",
            HideReason::RentTransfer => "rent transfer",
            HideReason::KnownAccountTransfer => "known account transfer",
        };
        f.write_str(label)
    }
}

type Predicate = fn(&str, Amount) -> bool;

/// Ordered (predicate, reason) pairs.
const RULES: &[(Predicate, HideReason)] = &[
    (is_zero_amount, HideReason::ZeroAmount),
    (is_revolut_top_up, HideReason::RevolutTopUp),
    (is_savings_transfer, HideReason::SavingsTransfer),
    (is_rent_transfer, HideReason::RentTransfer),
    (is_known_account_transfer, HideReason::KnownAccountTransfer),
];

const REVOLUT_PREFIXES: [&str; 4] = [
    "VDP-Revolut**",
    "VDP-Revolut* - ",
    "VDP-Revolut  - ",
    "VDP-REVOLUT*",
];

/// Returns the first rule that hides a row with these cleaned details and
/// reconciled amount, or `None` if the row is visible.
pub fn hide_reason(details: &str, amount: Amount) -> Option<HideReason> {
    RULES
        .iter()
        .find(|(matches, _)| matches(details, amount))
        .map(|&(_, reason)| reason)
}

fn is_zero_amount(_details: &str, amount: Amount) -> bool {
    amount.is_zero()
}

fn is_revolut_top_up(details: &str, _amount: Amount) -> bool {
    details == "VDP-Revolut"
        || REVOLUT_PREFIXES
            .iter()
            .any(|prefix| details.starts_with(prefix))
}

fn is_savings_transfer(details: &str, _amount: Amount) -> bool {
    details.starts_with("*INET SAVINGS ")
}

fn is_rent_transfer(details: &str, amount: Amount) -> bool {
    amount == Amount::from(600)
        && (details.starts_with("*INET RENT ") || details.starts_with("*INET DAVID "))
}

fn is_known_account_transfer(details: &str, amount: Amount) -> bool {
    amount == Amount::from(10) && details == "931365 22689017"
}
