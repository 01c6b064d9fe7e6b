//! Accounting module (double-entry general ledger).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. Entries are
//! immutable values; the owning ledger collection lives elsewhere.

pub mod account;
pub mod duplicate;
pub mod journal;
pub mod split;

pub use account::{
    Account, AccountLookup, AccountType, BankCodeRange, ChartOfAccounts, GstType,
    UNCATEGORIZED_ACCOUNT_CODE, is_account_code,
};
pub use duplicate::{DuplicateFingerprint, count_same_bank_transactions, is_same_bank_transaction};
pub use journal::GeneralJournalEntry;
pub use split::SplitTransaction;
