use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use arve_core::{DomainError, DomainResult};
use arve_parties::{BankAccount, Party};

use crate::line_item::LineItem;

/// Subtotal, VAT and grand total, derived from line items and a tax rate.
///
/// Kept at full precision; rounding to cents happens when the document is
/// rendered, so many small lines never accumulate rounding drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

impl Totals {
    pub fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    pub fn from_items(items: &[LineItem], tax_rate: Decimal) -> DomainResult<Self> {
        let subtotal = items.iter().try_fold(Decimal::ZERO, |acc, item| {
            acc.checked_add(item.amount())
                .ok_or_else(|| DomainError::invariant("invoice subtotal overflow"))
        })?;
        let tax_amount = subtotal
            .checked_mul(tax_rate)
            .ok_or_else(|| DomainError::invariant("invoice tax overflow"))?;
        let total = subtotal
            .checked_add(tax_amount)
            .ok_or_else(|| DomainError::invariant("invoice total overflow"))?;

        Ok(Self {
            subtotal,
            tax_amount,
            total,
        })
    }
}

/// Canonical invoice, immutable once built.
///
/// Construct through [`crate::InvoiceBuilder`]; there is no way to change
/// items or totals afterwards. A corrected invoice is a new build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    invoice_number: String,
    number_prefix: String,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    reference_number: String,
    recipient: Party,
    sender: Party,
    bank: BankAccount,
    items: Vec<LineItem>,
    tax_rate: Decimal,
    #[serde(flatten)]
    totals: Totals,
    late_fee_notice: String,
    notes: Option<String>,
}

/// Everything the builder has resolved; totals are computed in
/// [`Invoice::assemble`].
pub(crate) struct InvoiceParts {
    pub invoice_number: String,
    pub number_prefix: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub reference_number: String,
    pub recipient: Party,
    pub sender: Party,
    pub bank: BankAccount,
    pub items: Vec<LineItem>,
    pub tax_rate: Decimal,
    pub late_fee_notice: String,
    pub notes: Option<String>,
}

impl Invoice {
    pub(crate) fn assemble(parts: InvoiceParts) -> DomainResult<Self> {
        if parts.due_date < parts.issue_date {
            return Err(DomainError::invalid_input(format!(
                "due date {} is before issue date {}",
                parts.due_date, parts.issue_date
            )));
        }

        let totals = Totals::from_items(&parts.items, parts.tax_rate)?;

        Ok(Self {
            invoice_number: parts.invoice_number,
            number_prefix: parts.number_prefix,
            issue_date: parts.issue_date,
            due_date: parts.due_date,
            reference_number: parts.reference_number,
            recipient: parts.recipient,
            sender: parts.sender,
            bank: parts.bank,
            items: parts.items,
            tax_rate: parts.tax_rate,
            totals,
            late_fee_notice: parts.late_fee_notice,
            notes: parts.notes,
        })
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    /// Invoice number as printed: prefix followed by the number.
    pub fn display_number(&self) -> String {
        format!("{}{}", self.number_prefix, self.invoice_number)
    }

    /// File name for a delivered copy: `<prefix><number>.<extension>`.
    ///
    /// Characters that are unsafe in file names become `_`.
    pub fn file_name(&self, extension: &str) -> String {
        let stem: String = self
            .display_number()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let extension = extension.trim_start_matches('.');
        if extension.is_empty() {
            stem
        } else {
            format!("{stem}.{extension}")
        }
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Payment reference ("viitenumber") derived from the invoice number.
    pub fn reference_number(&self) -> &str {
        &self.reference_number
    }

    pub fn recipient(&self) -> &Party {
        &self.recipient
    }

    pub fn sender(&self) -> &Party {
        &self.sender
    }

    pub fn bank(&self) -> &BankAccount {
        &self.bank
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn subtotal(&self) -> Decimal {
        self.totals.subtotal
    }

    pub fn tax_amount(&self) -> Decimal {
        self.totals.tax_amount
    }

    pub fn total(&self) -> Decimal {
        self.totals.total
    }

    pub fn late_fee_notice(&self) -> &str {
        &self.late_fee_notice
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}
