//! Invoice model and builder.
//!
//! Turns caller-supplied order, client and company data into a canonical,
//! immutable [`Invoice`] with derived totals, due date and payment reference.
//! Deterministic domain logic only: no IO, and the current date is always
//! passed in by the caller.

pub mod builder;
pub mod config;
pub mod input;
pub mod invoice;
pub mod line_item;

pub use builder::{InvoiceBuilder, default_invoice_number};
pub use config::{CompanyProfile, InvoiceConfig};
pub use input::{FallbackAmount, InvoiceInput, ItemInput, RecipientInput};
pub use invoice::{Invoice, Totals};
pub use line_item::LineItem;
