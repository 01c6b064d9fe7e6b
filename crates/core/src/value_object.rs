//! Value object trait: equality by value, not identity.
//!
//! Ledger records have **no identity** of their own. A split, an amount or a
//! journal entry is defined entirely by its attribute values, so two records
//! with the same values are the same record.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "change" one,
/// build a new one: recategorizing a journal entry produces a new entry and the
/// owning collection swaps it in place of the old one.
///
/// Because they never mutate, value objects can be shared across threads and
/// results computed from them can be memoized by input.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct SplitTransaction {
///     account_code: String,
///     amount: Money,
/// }
///
/// impl ValueObject for SplitTransaction {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
