//! Domain error model.

use thiserror::Error;

use crate::money::Money;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants). Construction-time variants abort entry creation; the bank-split
/// variants are raised when a bank code is derived and are recoverable by the
/// caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed account code, non-positive amount).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Debit and credit totals differ at currency precision.
    #[error("unbalanced journal entry: debits {debits} != credits {credits}")]
    UnbalancedEntry { debits: Money, credits: Money },

    /// One side of a journal entry has no splits.
    #[error("journal entry has no {side} splits")]
    EmptySplits { side: &'static str },

    /// No split posts to a bank-range account.
    #[error("journal entry has no bank account split")]
    NoBankSplit,

    /// More than one split posts to a bank-range account.
    #[error("journal entry has multiple bank account splits: {}", codes.join(", "))]
    AmbiguousBankSplit { codes: Vec<String> },

    /// Configuration data (rule tables, account fixtures) could not be loaded.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// True for the errors raised while deriving an entry's bank code.
    pub fn is_bank_split_error(&self) -> bool {
        matches!(self, Self::NoBankSplit | Self::AmbiguousBankSplit { .. })
    }
}
