//! Printable invoice documents.
//!
//! [`render`] is a pure function from an [`arve_invoicing::Invoice`] to a
//! self-contained HTML page. Printing, downloading or storing the page is left
//! to the caller.

pub mod escape;
pub mod html;

pub use escape::html_escape;
pub use html::{EXTENSION, render};
