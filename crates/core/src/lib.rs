//! `arve-core` — building blocks shared by the invoice engine.
//!
//! Everything here is a **pure function** or plain value type: Estonian number
//! and date formatting, the 7-3-1 payment reference checksum, and the domain
//! error model. No IO, no clocks, no global state.

pub mod error;
pub mod format;
pub mod reference;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use value_object::ValueObject;
