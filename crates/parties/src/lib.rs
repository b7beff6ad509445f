//! Parties on an invoice (recipient and issuing company).
//!
//! A party is a value object. Client records arrive in several historical
//! shapes; [`aliases`] maps each of them onto the canonical [`Party`] fields
//! through one explicit table.

pub mod aliases;
pub mod party;

pub use aliases::{AliasSource, PartyField, party_from_record, resolve_field};
pub use party::{BankAccount, Party};
