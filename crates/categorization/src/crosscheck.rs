//! Startup cross-check of categorizer output against a chart of accounts.

use bookkeeper_accounting::AccountLookup;
use bookkeeper_core::{DomainError, DomainResult};

use crate::categorizer::TransactionCategorizer;

/// Codes the categorizer can emit that `accounts` does not know, in code order.
pub fn missing_categorizer_accounts(
    categorizer: &TransactionCategorizer,
    accounts: &impl AccountLookup,
) -> Vec<String> {
    categorizer
        .account_codes()
        .into_iter()
        .filter(|code| accounts.get_account(code).is_none())
        .collect()
}

/// Fails with `InvalidConfig` when any emitted code is missing from `accounts`.
pub fn verify_categorizer_accounts(
    categorizer: &TransactionCategorizer,
    accounts: &impl AccountLookup,
) -> DomainResult<()> {
    let missing = missing_categorizer_accounts(categorizer, accounts);
    if missing.is_empty() {
        return Ok(());
    }

    tracing::warn!(missing = ?missing, "categorizer emits codes absent from chart of accounts");
    Err(DomainError::invalid_config(format!(
        "categorizer account codes missing from chart of accounts: {}",
        missing.join(", ")
    )))
}
