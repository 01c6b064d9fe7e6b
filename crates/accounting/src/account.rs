use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use bookkeeper_core::{DomainError, DomainResult, ValueObject};

/// Placeholder account that imported bank lines post to until categorized.
pub const UNCATEGORIZED_ACCOUNT_CODE: &str = "999";

/// High-level account type (determines where the account reports).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Bank,
    Revenue,
    Expense,
    Cogs,
    Asset,
    Liability,
    Equity,
}

/// GST treatment applied when reporting the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GstType {
    GstOnIncome,
    GstOnExpenses,
    GstFreeIncome,
    GstFreeExpenses,
    BasExcluded,
}

/// Chart-of-accounts record. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    pub code: String, // e.g. "316"
    pub name: String, // e.g. "Office Supplies"
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub gst: bool,
    pub gst_type: GstType,
}

impl ValueObject for Account {}

/// Returns true for a well-formed account code (exactly three ASCII digits).
pub fn is_account_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_digit())
}

/// Reserved numeric range of bank account codes (inclusive).
///
/// Bank codes record where money physically moved; every other code records
/// how the movement was categorized.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BankCodeRange {
    pub first: u16,
    pub last: u16,
}

impl Default for BankCodeRange {
    fn default() -> Self {
        Self { first: 0, last: 99 }
    }
}

impl BankCodeRange {
    pub fn with_first(mut self, first: u16) -> Self {
        self.first = first;
        self
    }

    pub fn with_last(mut self, last: u16) -> Self {
        self.last = last;
        self
    }

    pub fn contains(&self, code: &str) -> bool {
        if !is_account_code(code) {
            return false;
        }
        code.parse::<u16>()
            .map(|n| (self.first..=self.last).contains(&n))
            .unwrap_or(false)
    }
}

/// Lookup of accounts by code (the chart-of-accounts store).
pub trait AccountLookup {
    fn get_account(&self, code: &str) -> Option<&Account>;
}

/// In-memory chart of accounts, keyed and ordered by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartOfAccounts {
    accounts: BTreeMap<String, Account>,
}

impl ChartOfAccounts {
    /// Build a chart, rejecting malformed or duplicated codes.
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> DomainResult<Self> {
        let mut map = BTreeMap::new();
        for account in accounts {
            if !is_account_code(&account.code) {
                return Err(DomainError::invalid_config(format!(
                    "account code '{}' must be three digits",
                    account.code
                )));
            }
            if map.contains_key(&account.code) {
                return Err(DomainError::invalid_config(format!(
                    "duplicate account code '{}'",
                    account.code
                )));
            }
            map.insert(account.code.clone(), account);
        }
        Ok(Self { accounts: map })
    }

    /// Load a chart from a JSON array of accounts.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let accounts: Vec<Account> = serde_json::from_str(json)
            .map_err(|e| DomainError::invalid_config(format!("chart of accounts: {e}")))?;
        let chart = Self::new(accounts)?;
        tracing::debug!(accounts = chart.len(), "loaded chart of accounts");
        Ok(chart)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Accounts whose code falls in `range`.
    pub fn bank_accounts(&self, range: BankCodeRange) -> impl Iterator<Item = &Account> {
        self.accounts.values().filter(move |a| range.contains(&a.code))
    }
}

impl AccountLookup for ChartOfAccounts {
    fn get_account(&self, code: &str) -> Option<&Account> {
        self.accounts.get(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(code: &str, name: &str, account_type: AccountType) -> Account {
        Account {
            code: code.to_string(),
            name: name.to_string(),
            account_type,
            gst: false,
            gst_type: GstType::BasExcluded,
        }
    }

    #[test]
    fn bank_range_defaults_to_000_through_099() {
        let range = BankCodeRange::default();
        assert!(range.contains("000"));
        assert!(range.contains("001"));
        assert!(range.contains("099"));
        assert!(!range.contains("100"));
        assert!(!range.contains("999"));
    }

    #[test]
    fn bank_range_rejects_malformed_codes() {
        let range = BankCodeRange::default();
        assert!(!range.contains("1"));
        assert!(!range.contains("01"));
        assert!(!range.contains("0001"));
        assert!(!range.contains("0a1"));
        assert!(!range.contains(""));
    }

    #[test]
    fn bank_range_is_configurable() {
        let range = BankCodeRange::default().with_first(10).with_last(19);
        assert!(range.contains("015"));
        assert!(!range.contains("001"));
    }

    #[test]
    fn chart_rejects_duplicate_codes() {
        let err = ChartOfAccounts::new([
            account("001", "Cheque", AccountType::Bank),
            account("001", "Savings", AccountType::Bank),
        ])
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfig(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn chart_loads_from_json_and_looks_up_by_code() {
        let chart = ChartOfAccounts::from_json(
            r#"[
                {"code": "001", "name": "Business Cheque", "type": "bank", "gst": false, "gst_type": "bas_excluded"},
                {"code": "316", "name": "Office Supplies", "type": "expense", "gst": true, "gst_type": "gst_on_expenses"}
            ]"#,
        )
        .unwrap();

        assert_eq!(chart.len(), 2);
        let supplies = chart.get_account("316").unwrap();
        assert_eq!(supplies.name, "Office Supplies");
        assert_eq!(supplies.account_type, AccountType::Expense);
        assert_eq!(supplies.gst_type, GstType::GstOnExpenses);
        assert!(chart.get_account("999").is_none());

        let banks: Vec<_> = chart.bank_accounts(BankCodeRange::default()).collect();
        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].code, "001");
    }

    #[test]
    fn chart_rejects_invalid_json() {
        let err = ChartOfAccounts::from_json("{not json").unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfig(_)));
    }
}
