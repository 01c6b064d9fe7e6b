//! Duplicate detection across re-imports and re-categorizations.
//!
//! Categorizing an entry rewrites its non-bank split, so structural equality
//! stops recognising it. Two entries are the same bank transaction when date,
//! description, amount and bank code all agree; non-bank codes and the running
//! bank balance are ignored.
//!
//! Distinct bank events sharing all four fields (two identical ATM withdrawals
//! on one day) also match. Telling them apart by occurrence count is left to
//! the import pipeline; [`count_same_bank_transactions`] only counts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bookkeeper_core::{DomainError, DomainResult, Money};

use crate::journal::GeneralJournalEntry;

/// Identity of the underlying bank event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DuplicateFingerprint {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub bank_code: String,
}

impl DuplicateFingerprint {
    pub fn of(entry: &GeneralJournalEntry) -> DomainResult<Self> {
        Ok(Self {
            date: entry.date(),
            description: entry.description().to_string(),
            amount: entry.amount(),
            bank_code: entry.bank_code()?.to_string(),
        })
    }
}

/// Whether `a` and `b` record the same bank event.
///
/// Both bank codes are derived before anything else is compared, so an entry
/// without a unique bank split is always an error and never a plain `false`.
/// When both entries fail, the error reported does not depend on argument
/// order (see [`precedence`]).
pub fn is_same_bank_transaction(
    a: &GeneralJournalEntry,
    b: &GeneralJournalEntry,
) -> DomainResult<bool> {
    let (bank_a, bank_b) = match (a.bank_code(), b.bank_code()) {
        (Ok(bank_a), Ok(bank_b)) => (bank_a, bank_b),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => return Err(logged(e)),
        (Err(ea), Err(eb)) => {
            let e = if precedence(&eb) < precedence(&ea) { eb } else { ea };
            return Err(logged(e));
        }
    };

    Ok(a.date() == b.date()
        && a.description() == b.description()
        && a.amount() == b.amount()
        && bank_a == bank_b)
}

/// Ordering between bank-split errors: `NoBankSplit` first, then ambiguous
/// splits by their code list.
fn precedence(error: &DomainError) -> (u8, &[String]) {
    const NO_CODES: &[String] = &[];
    match error {
        DomainError::NoBankSplit => (0, NO_CODES),
        DomainError::AmbiguousBankSplit { codes } => (1, codes.as_slice()),
        _ => (2, NO_CODES),
    }
}

fn logged(error: DomainError) -> DomainError {
    tracing::debug!(error = %error, "duplicate check: no unique bank code");
    error
}

/// Number of entries in `existing` that are the same bank transaction as `candidate`.
pub fn count_same_bank_transactions<'a>(
    existing: impl IntoIterator<Item = &'a GeneralJournalEntry>,
    candidate: &GeneralJournalEntry,
) -> DomainResult<usize> {
    let mut count = 0;
    for entry in existing {
        if is_same_bank_transaction(entry, candidate)? {
            count += 1;
        }
    }
    Ok(count)
}
