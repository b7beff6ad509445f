//! Value object trait: equality by value, not identity.
//!
//! Parties, line items and bank accounts on an invoice have **no identity**.
//! Two recipients with the same name and address are the same recipient as far
//! as the document is concerned.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one with the new values. An invoice line whose quantity changes
/// is a new line with a freshly derived amount.
///
/// The trait requires:
/// - **Clone**: values are copied into every invoice built from them
/// - **PartialEq**: compared by attribute values
/// - **Debug**: helpful for logging and assertions
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct BankAccount {
///     bank_name: String,
///     iban: String,
/// }
///
/// impl ValueObject for BankAccount {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
