use core::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bookkeeper_core::{DomainError, DomainResult, Money, ValueObject};

use crate::account::{BankCodeRange, UNCATEGORIZED_ACCOUNT_CODE};
use crate::duplicate::{self, DuplicateFingerprint};
use crate::split::SplitTransaction;

/// Double-entry journal entry (immutable).
///
/// Invariants, enforced by [`GeneralJournalEntry::new`]:
/// - both sides hold at least one split;
/// - debit total equals credit total at currency precision.
///
/// `bank_balance` and `notes` are metadata: they take no part in `==`, `Hash`
/// or the duplicate fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawJournalEntry")]
pub struct GeneralJournalEntry {
    date: NaiveDate,
    #[serde(skip_serializing)]
    amount: Money,
    description: String,
    debits: Vec<SplitTransaction>,
    credits: Vec<SplitTransaction>,
    bank_balance: Money,
    notes: String,
}

#[derive(Deserialize)]
struct RawJournalEntry {
    date: NaiveDate,
    description: String,
    debits: Vec<SplitTransaction>,
    credits: Vec<SplitTransaction>,
    #[serde(default)]
    bank_balance: Money,
    #[serde(default)]
    notes: String,
}

impl TryFrom<RawJournalEntry> for GeneralJournalEntry {
    type Error = DomainError;

    fn try_from(raw: RawJournalEntry) -> Result<Self, Self::Error> {
        Self::new(
            raw.date,
            raw.description,
            raw.debits,
            raw.credits,
            raw.bank_balance,
            raw.notes,
        )
    }
}

impl GeneralJournalEntry {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        debits: Vec<SplitTransaction>,
        credits: Vec<SplitTransaction>,
        bank_balance: impl Into<Money>,
        notes: impl Into<String>,
    ) -> DomainResult<Self> {
        if debits.is_empty() {
            return Err(DomainError::EmptySplits { side: "debit" });
        }
        if credits.is_empty() {
            return Err(DomainError::EmptySplits { side: "credit" });
        }

        let debit_total = side_total(&debits, "debit")?;
        let credit_total = side_total(&credits, "credit")?;
        if debit_total != credit_total {
            return Err(DomainError::UnbalancedEntry {
                debits: debit_total,
                credits: credit_total,
            });
        }

        Ok(Self {
            date,
            amount: debit_total,
            description: description.into(),
            debits,
            credits,
            bank_balance: bank_balance.into(),
            notes: notes.into(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn debits(&self) -> &[SplitTransaction] {
        &self.debits
    }

    pub fn credits(&self) -> &[SplitTransaction] {
        &self.credits
    }

    pub fn bank_balance(&self) -> Money {
        self.bank_balance
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// The transaction amount (debit total; equal to the credit total).
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Code of the single split in the default bank range (`000`–`099`).
    pub fn bank_code(&self) -> DomainResult<&str> {
        self.bank_code_in(BankCodeRange::default())
    }

    /// Code of the single split whose account lies in `range`.
    ///
    /// Debits are scanned before credits. Zero matches is `NoBankSplit`, more
    /// than one is `AmbiguousBankSplit`.
    pub fn bank_code_in(&self, range: BankCodeRange) -> DomainResult<&str> {
        let mut found = self
            .debits
            .iter()
            .chain(self.credits.iter())
            .map(SplitTransaction::account_code)
            .filter(|code| range.contains(code));

        match (found.next(), found.next()) {
            (None, _) => Err(DomainError::NoBankSplit),
            (Some(code), None) => Ok(code),
            (Some(first), Some(second)) => {
                let mut codes = vec![first.to_string(), second.to_string()];
                codes.extend(found.map(str::to_string));
                Err(DomainError::AmbiguousBankSplit { codes })
            }
        }
    }

    /// True when money arrived in the bank account (bank split is a debit).
    pub fn is_income(&self) -> DomainResult<bool> {
        let range = BankCodeRange::default();
        self.bank_code_in(range)?;
        Ok(self.debits.iter().any(|s| range.contains(s.account_code())))
    }

    /// True when any split still posts to the uncategorized placeholder.
    pub fn is_uncategorized(&self) -> bool {
        self.debits
            .iter()
            .chain(self.credits.iter())
            .any(|s| s.account_code() == UNCATEGORIZED_ACCOUNT_CODE)
    }

    /// A new entry with every non-bank split reposted to `account_code`.
    ///
    /// Date, description, amounts, the bank split, bank balance and notes are
    /// carried over unchanged, so the result is the same bank transaction.
    pub fn recategorize(&self, account_code: &str) -> DomainResult<Self> {
        let range = BankCodeRange::default();
        self.bank_code_in(range)?;
        if range.contains(account_code) {
            return Err(DomainError::validation(format!(
                "cannot categorize to bank account {account_code}"
            )));
        }

        let repost = |splits: &[SplitTransaction]| -> DomainResult<Vec<SplitTransaction>> {
            splits
                .iter()
                .map(|s| {
                    if range.contains(s.account_code()) {
                        Ok(s.clone())
                    } else {
                        s.with_account_code(account_code)
                    }
                })
                .collect()
        };

        Self::new(
            self.date,
            self.description.clone(),
            repost(&self.debits)?,
            repost(&self.credits)?,
            self.bank_balance,
            self.notes.clone(),
        )
    }

    /// Duplicate identity: (date, description, amount, bank code).
    pub fn fingerprint(&self) -> DomainResult<DuplicateFingerprint> {
        DuplicateFingerprint::of(self)
    }

    /// Same underlying bank event as `other`, whatever either is categorized to.
    pub fn is_same_bank_transaction(&self, other: &Self) -> DomainResult<bool> {
        duplicate::is_same_bank_transaction(self, other)
    }
}

fn side_total(splits: &[SplitTransaction], side: &'static str) -> DomainResult<Money> {
    Money::checked_sum(splits.iter().map(SplitTransaction::amount))
        .ok_or_else(|| DomainError::validation(format!("{side} total exceeds the decimal range")))
}

impl PartialEq for GeneralJournalEntry {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
            && self.description == other.description
            && self.debits == other.debits
            && self.credits == other.credits
    }
}

impl Eq for GeneralJournalEntry {}

impl Hash for GeneralJournalEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.date.hash(state);
        self.description.hash(state);
        self.debits.hash(state);
        self.credits.hash(state);
    }
}

impl ValueObject for GeneralJournalEntry {}
