//! Keyword rule tables (configuration-as-data).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use bookkeeper_accounting::is_account_code;
use bookkeeper_core::{DomainError, DomainResult};

/// Placeholder substituted into justification templates.
pub const SUPPLIER_PLACEHOLDER: &str = "{supplier}";

/// Lower-case `text`, turn punctuation into spaces and collapse whitespace.
///
/// Keywords and transaction text go through the same normalisation, so
/// "7-Eleven" and "7 eleven" agree.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn supplier_label(supplier_name: &str) -> &str {
    let trimmed = supplier_name.trim();
    if trimmed.is_empty() { "unknown supplier" } else { trimmed }
}

/// One table row: any keyword present selects `account_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizationRule {
    pub keywords: Vec<String>,
    pub account_code: String,
    /// Template; `{supplier}` is replaced by the supplier name.
    pub justification: String,
}

impl CategorizationRule {
    pub fn new(keywords: &[&str], account_code: &str, justification: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| normalize(k)).collect(),
            account_code: account_code.to_string(),
            justification: justification.to_string(),
        }
    }

    /// Whether any keyword starts a word of `text`, which must already be
    /// [`normalize`]d.
    ///
    /// Keywords anchor at a word start but may end mid-word: "grocer" matches
    /// "grocery", "rent" does not match "current".
    pub fn matches(&self, text: &str) -> bool {
        let padded = format!(" {text}");
        self.keywords
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| padded.contains(&format!(" {k}")))
    }

    pub fn justify(&self, supplier_name: &str) -> String {
        self.justification
            .replace(SUPPLIER_PLACEHOLDER, supplier_label(supplier_name))
    }
}

/// Result used when no rule in a table matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fallback {
    pub account_code: String,
    pub justification: String,
}

impl Fallback {
    pub fn new(account_code: &str, justification: &str) -> Self {
        Self {
            account_code: account_code.to_string(),
            justification: justification.to_string(),
        }
    }

    pub fn justify(&self, supplier_name: &str) -> String {
        self.justification
            .replace(SUPPLIER_PLACEHOLDER, supplier_label(supplier_name))
    }
}

/// Ordered income and expense tables plus their fallbacks.
///
/// Built once and injected into a categorizer; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTables {
    pub income: Vec<CategorizationRule>,
    pub expense: Vec<CategorizationRule>,
    pub income_fallback: Fallback,
    pub expense_fallback: Fallback,
}

type RuleRow = (&'static [&'static str], &'static str, &'static str);

// Evaluation stops at the first match, so rules naming a supplier or a
// specific supply precede generic phrases. Keywords match word prefixes;
// keep them long enough not to start unrelated words.
const INCOME_RULES: &[RuleRow] = &[
    (
        &[
            "payment from",
            "customer payment",
            "invoice",
            "catering order",
            "booking deposit",
        ],
        "100",
        "Sales revenue: customer payment received from {supplier}",
    ),
    (
        &[
            "stripe",
            "square",
            "paypal",
            "zettle",
            "windcave",
            "card processing",
            "merchant settlement",
            "eftpos settlement",
        ],
        "150",
        "Processing income: settlement from payment processor {supplier}",
    ),
    (
        &["interest", "int credit"],
        "160",
        "Interest income: interest credited by {supplier}",
    ),
    (
        &["grant", "subsidy", "wage subsidy"],
        "170",
        "Government grant: subsidy received from {supplier}",
    ),
    (
        &["refund", "reimbursement", "rebate", "reversal"],
        "180",
        "Refund income: refund or rebate received from {supplier}",
    ),
];

const EXPENSE_RULES: &[RuleRow] = &[
    (
        &[
            "software",
            "subscription",
            "saas",
            "xero",
            "adobe",
            "microsoft",
            "google workspace",
            "canva",
            "dropbox",
            "shopify",
            "github",
        ],
        "310",
        "Software expense: subscription or licence from {supplier}",
    ),
    (
        &[
            "spark nz",
            "vodafone",
            "one nz",
            "2degrees",
            "broadband",
            "mobile plan",
            "internet",
        ],
        "312",
        "Telephone & internet: service from {supplier}",
    ),
    (
        &[
            "countdown",
            "woolworths",
            "pak n save",
            "paknsave",
            "new world",
            "grocer",
            "gilmours",
            "bidfood",
            "ingredient",
            "produce",
            "flour",
            "dairy",
            "butcher",
        ],
        "200",
        "Cost of goods sold: ingredients purchased from {supplier}",
    ),
    (
        &["packaging", "container", "takeaway boxes", "napkin"],
        "210",
        "Cost of goods sold: packaging purchased from {supplier}",
    ),
    (
        &[
            "marketing",
            "sponsor",
            "advert",
            "facebook ads",
            "meta ads",
            "google ads",
            "flyer",
            "promotion",
        ],
        "300",
        "Marketing expense: advertising or sponsorship with {supplier}",
    ),
    (
        &[
            "fuel",
            "petrol",
            "diesel",
            "z energy",
            "bp connect",
            "caltex",
            "parking",
            "vehicle",
            "car wash",
        ],
        "330",
        "Motor vehicle expense: fuel or running costs at {supplier}",
    ),
    (
        &["rent", "lease", "property management"],
        "320",
        "Rent: premises payment to {supplier}",
    ),
    (
        &[
            "electricity",
            "power",
            "contact energy",
            "mercury",
            "genesis",
            "meridian",
            "water rates",
            "gas bill",
            "lpg",
        ],
        "325",
        "Utilities: energy or water supplied by {supplier}",
    ),
    (
        &["insurance", "insurer", "premium"],
        "340",
        "Insurance: premium paid to {supplier}",
    ),
    (
        &[
            "accountant",
            "accounting fees",
            "bookkeeping",
            "lawyer",
            "legal",
            "solicitor",
        ],
        "350",
        "Professional fees: services from {supplier}",
    ),
    (
        &["repair", "maintenance", "plumber", "electrician"],
        "345",
        "Repairs & maintenance: work by {supplier}",
    ),
    (
        &[
            "airfare",
            "air new zealand",
            "jetstar",
            "hotel",
            "accommodation",
            "uber",
            "taxi",
        ],
        "335",
        "Travel: fares or accommodation from {supplier}",
    ),
    (
        &[
            "restaurant",
            "client lunch",
            "client dinner",
            "entertainment",
        ],
        "355",
        "Entertainment: hospitality at {supplier}",
    ),
    (
        &[
            "stationery",
            "office supplies",
            "officemax",
            "printer",
            "paper",
        ],
        "316",
        "Office Supplies: stationery or consumables from {supplier}",
    ),
    (
        &[
            "bank fee",
            "account fee",
            "monthly fee",
            "overdrawn fee",
            "dishonour fee",
        ],
        "305",
        "Bank fees: charge levied by {supplier}",
    ),
];

impl RuleTables {
    /// The built-in tables.
    pub fn standard() -> Self {
        let build = |rows: &[RuleRow]| -> Vec<CategorizationRule> {
            rows.iter()
                .map(|(keywords, code, justification)| {
                    CategorizationRule::new(keywords, code, justification)
                })
                .collect()
        };

        Self {
            income: build(INCOME_RULES),
            expense: build(EXPENSE_RULES),
            income_fallback: Fallback::new(
                "199",
                "Uncategorized income: no income rule matched {supplier}; review required",
            ),
            expense_fallback: Fallback::new(
                "316",
                "Office Supplies (default): no expense rule matched {supplier}; review required",
            ),
        }
    }

    /// Load tables from JSON, normalising keywords and validating codes.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let mut tables: Self = serde_json::from_str(json)
            .map_err(|e| DomainError::invalid_config(format!("rule tables: {e}")))?;

        for rule in tables.income.iter_mut().chain(tables.expense.iter_mut()) {
            rule.keywords = rule.keywords.iter().map(|k| normalize(k)).collect();
        }
        tables.validate()?;

        tracing::debug!(
            income_rules = tables.income.len(),
            expense_rules = tables.expense.len(),
            "loaded categorization rule tables"
        );
        Ok(tables)
    }

    pub fn with_income_fallback(mut self, fallback: Fallback) -> Self {
        self.income_fallback = fallback;
        self
    }

    pub fn with_expense_fallback(mut self, fallback: Fallback) -> Self {
        self.expense_fallback = fallback;
        self
    }

    /// Reject malformed codes and rules that can never match.
    pub fn validate(&self) -> DomainResult<()> {
        for (table, rules) in [("income", &self.income), ("expense", &self.expense)] {
            for (i, rule) in rules.iter().enumerate() {
                if !is_account_code(&rule.account_code) {
                    return Err(DomainError::invalid_config(format!(
                        "{table} rule {i}: account code '{}' must be three digits",
                        rule.account_code
                    )));
                }
                if rule.keywords.iter().all(|k| k.is_empty()) {
                    return Err(DomainError::invalid_config(format!(
                        "{table} rule {i}: no keywords"
                    )));
                }
            }
        }

        for (table, fallback) in [
            ("income", &self.income_fallback),
            ("expense", &self.expense_fallback),
        ] {
            if !is_account_code(&fallback.account_code) {
                return Err(DomainError::invalid_config(format!(
                    "{table} fallback: account code '{}' must be three digits",
                    fallback.account_code
                )));
            }
        }

        Ok(())
    }

    /// Every account code any rule or fallback can emit.
    pub fn account_codes(&self) -> BTreeSet<String> {
        self.income
            .iter()
            .chain(self.expense.iter())
            .map(|r| r.account_code.clone())
            .chain([
                self.income_fallback.account_code.clone(),
                self.expense_fallback.account_code.clone(),
            ])
            .collect()
    }
}

impl Default for RuleTables {
    fn default() -> Self {
        Self::standard()
    }
}
