use chrono::{Days, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

use arve_core::reference;
use arve_core::{DomainError, DomainResult};

use crate::config::{InvoiceConfig, tax_rate_problem};
use crate::input::{FallbackAmount, InvoiceInput};
use crate::invoice::{Invoice, InvoiceParts};
use crate::line_item::LineItem;

/// Time-derived invoice number (`YYYYMMDDHHMMSS`) for callers that have no
/// numbering of their own. All digits, so it always yields a reference.
pub fn default_invoice_number(now: NaiveDateTime) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

/// Builds canonical invoices for one company profile.
///
/// Holds only configuration; every `build` call works on its own data, so a
/// builder can be shared between threads freely.
#[derive(Debug, Clone)]
pub struct InvoiceBuilder {
    config: InvoiceConfig,
}

impl InvoiceBuilder {
    pub fn new(config: InvoiceConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Build an invoice. `today` is used as the issue date when the input has
    /// none.
    pub fn build(&self, input: InvoiceInput, today: NaiveDate) -> DomainResult<Invoice> {
        let invoice_number = input
            .invoice_number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DomainError::invalid_input("invoice number is required"))?
            .to_string();

        let tax_rate = input.tax_rate.unwrap_or(self.config.tax_rate);
        if let Some(problem) = tax_rate_problem(tax_rate) {
            return Err(DomainError::invalid_input(problem));
        }

        let issue_date = input.issue_date.unwrap_or(today);
        let due_date = match input.due_date {
            Some(date) => date,
            None => {
                let days = input.due_days.unwrap_or(self.config.due_days);
                issue_date
                    .checked_add_days(Days::new(u64::from(days)))
                    .ok_or_else(|| DomainError::invalid_input("due date is out of range"))?
            }
        };

        let sender = match input.sender {
            Some(party) => party.normalized(),
            None => self.config.company.party.clone(),
        };
        if !sender.has_name() {
            return Err(DomainError::invalid_input("sender name is required"));
        }

        let mut items = input
            .items
            .into_iter()
            .enumerate()
            .map(|(i, item)| item.into_line_item(&self.config.default_unit, i + 1))
            .collect::<DomainResult<Vec<LineItem>>>()?;

        if items.is_empty() {
            if let Some(fallback) = input.fallback {
                let description = input
                    .fallback_description
                    .unwrap_or_else(|| self.config.default_item_description.clone());
                items.push(self.fallback_line(fallback, tax_rate, description)?);
            }
        }

        let notes = input
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let invoice = Invoice::assemble(InvoiceParts {
            reference_number: reference::generate(&invoice_number),
            invoice_number,
            number_prefix: self.config.number_prefix.clone(),
            issue_date,
            due_date,
            recipient: input.recipient.resolve(),
            sender,
            bank: self.config.company.bank.clone(),
            items,
            tax_rate,
            late_fee_notice: self.config.late_fee_notice.clone(),
            notes,
        })?;

        tracing::debug!(
            invoice_number = invoice.invoice_number(),
            reference = invoice.reference_number(),
            items = invoice.items().len(),
            total = %invoice.total(),
            "invoice built"
        );

        Ok(invoice)
    }

    /// Single line that reproduces a bare amount: quantity 1, unit price =
    /// subtotal.
    fn fallback_line(
        &self,
        fallback: FallbackAmount,
        tax_rate: Decimal,
        description: String,
    ) -> DomainResult<LineItem> {
        let subtotal = match fallback {
            FallbackAmount::Subtotal(subtotal) => subtotal,
            FallbackAmount::Total(total) => {
                // Always the invoice's own rate, never a hard-coded 24%.
                let divisor = Decimal::ONE + tax_rate;
                total
                    .checked_div(divisor)
                    .ok_or_else(|| DomainError::invalid_input("total cannot be split into VAT"))?
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            }
        };

        if subtotal < Decimal::ZERO {
            return Err(DomainError::invalid_input(format!(
                "invoice amount must not be negative, got {subtotal}"
            )));
        }

        LineItem::new(
            description,
            Decimal::ONE,
            self.config.default_unit.clone(),
            subtotal,
        )
    }
}
