//! `bookkeeper-categorization`
//!
//! Deterministic, rule-based categorization of bank transactions.
//!
//! - Rules are data: ordered keyword tables, first match wins.
//! - Every call returns a result; unmatched transactions get a fallback code.
//! - No chart-of-accounts access at call time. The emitted codes are checked
//!   against a chart once, at startup or in tests (see [`crosscheck`]).

pub mod categorizer;
pub mod crosscheck;
pub mod rules;

pub use categorizer::{
    Categorization, TransactionCategorizer, categorize_expense_transaction,
    categorize_income_transaction, categorizer_account_codes,
};
pub use crosscheck::{missing_categorizer_accounts, verify_categorizer_accounts};
pub use rules::{CategorizationRule, Fallback, RuleTables, normalize};
