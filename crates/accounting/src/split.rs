use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bookkeeper_core::{DomainError, DomainResult, Money, ValueObject};

use crate::account::is_account_code;

/// One posting line of a journal entry (immutable).
///
/// The amount is always a positive magnitude; direction comes from the side
/// (debits or credits) the split is placed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSplit")]
pub struct SplitTransaction {
    account_code: String,
    amount: Money,
}

#[derive(Deserialize)]
struct RawSplit {
    account_code: String,
    amount: Decimal,
}

impl TryFrom<RawSplit> for SplitTransaction {
    type Error = DomainError;

    fn try_from(raw: RawSplit) -> Result<Self, Self::Error> {
        Self::new(raw.account_code, raw.amount)
    }
}

impl SplitTransaction {
    pub fn new(account_code: impl Into<String>, amount: impl Into<Money>) -> DomainResult<Self> {
        let account_code = account_code.into();
        let amount = amount.into();

        if !is_account_code(&account_code) {
            return Err(DomainError::validation(format!(
                "account code '{account_code}' must be three digits"
            )));
        }
        if !amount.is_positive() {
            return Err(DomainError::validation(format!(
                "split amount must be positive (got {amount} on account {account_code})"
            )));
        }

        Ok(Self { account_code, amount })
    }

    pub fn account_code(&self) -> &str {
        &self.account_code
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Same amount, posted to a different account.
    pub fn with_account_code(&self, account_code: impl Into<String>) -> DomainResult<Self> {
        Self::new(account_code, self.amount)
    }
}

impl ValueObject for SplitTransaction {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_zero_and_negative_amounts() {
        assert!(matches!(
            SplitTransaction::new("316", dec!(0)),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            SplitTransaction::new("316", dec!(-12.50)),
            Err(DomainError::Validation(_))
        ));
        // Rounds to zero at cent precision.
        assert!(SplitTransaction::new("316", dec!(0.004)).is_err());
    }

    #[test]
    fn rejects_malformed_account_codes() {
        for code in ["", "31", "3160", "abc", " 316"] {
            assert!(SplitTransaction::new(code, dec!(1)).is_err(), "code {code:?}");
        }
    }

    #[test]
    fn equality_is_code_and_currency_amount() {
        let a = SplitTransaction::new("001", dec!(130.48)).unwrap();
        let b = SplitTransaction::new("001", dec!(130.480)).unwrap();
        let c = SplitTransaction::new("002", dec!(130.48)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn with_account_code_keeps_amount() {
        let split = SplitTransaction::new("999", dec!(42.10)).unwrap();
        let moved = split.with_account_code("506").unwrap();
        assert_eq!(moved.account_code(), "506");
        assert_eq!(moved.amount(), split.amount());
    }

    #[test]
    fn deserialization_validates() {
        let ok: SplitTransaction =
            serde_json::from_str(r#"{"account_code": "001", "amount": "10.50"}"#).unwrap();
        assert_eq!(ok.amount(), Money::new(dec!(10.5)));

        let negative = serde_json::from_str::<SplitTransaction>(
            r#"{"account_code": "001", "amount": "-10.50"}"#,
        );
        assert!(negative.is_err());
    }
}
