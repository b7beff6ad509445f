//! Builder input: typed values or loose JSON records.
//!
//! Order and client records come from several generations of the dashboard
//! and spell their keys differently. The key lists below are the complete set
//! of accepted spellings for each invoice-level value; party fields resolve
//! through [`arve_parties::aliases`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;

use arve_core::format::{parse_date, parse_decimal};
use arve_core::{DomainError, DomainResult};
use arve_parties::{Party, party_from_record};

use crate::line_item::LineItem;

const INVOICE_NUMBER_KEYS: &[&str] = &["invoice_number", "invoiceNumber", "invoice_no", "number"];
const ISSUE_DATE_KEYS: &[&str] = &["issue_date", "issueDate", "date", "created_at", "createdAt"];
const DUE_DATE_KEYS: &[&str] = &["due_date", "dueDate"];
const DUE_DAYS_KEYS: &[&str] = &["due_days", "dueDays", "payment_term_days"];
const RECIPIENT_KEYS: &[&str] = &["recipient", "client", "customer"];
const SENDER_KEYS: &[&str] = &["sender"];
const ITEMS_KEYS: &[&str] = &["items", "lines", "line_items", "lineItems"];
const SUBTOTAL_KEYS: &[&str] = &["subtotal", "subTotal", "net_total"];
const TOTAL_KEYS: &[&str] = &["total", "total_price", "totalPrice"];
const TAX_RATE_KEYS: &[&str] = &["tax_rate", "taxRate", "vat_rate", "vatRate"];
const NOTES_KEYS: &[&str] = &["notes", "note", "comment"];
const DESCRIPTION_KEYS: &[&str] = &["description", "job_name", "jobName", "title"];

const ITEM_DESCRIPTION_KEYS: &[&str] = &["description", "name", "title", "item"];
const ITEM_QUANTITY_KEYS: &[&str] = &["quantity", "qty", "count"];
const ITEM_UNIT_KEYS: &[&str] = &["unit", "unit_label", "unitLabel"];
const ITEM_PRICE_KEYS: &[&str] = &["unit_price", "unitPrice", "price", "price_excl_vat"];

/// Recipient as typed data or as a client/order record of any shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipientInput {
    Party(Party),
    Record(Value),
}

impl Default for RecipientInput {
    fn default() -> Self {
        Self::Party(Party::default())
    }
}

impl From<Party> for RecipientInput {
    fn from(party: Party) -> Self {
        Self::Party(party)
    }
}

impl From<Value> for RecipientInput {
    fn from(record: Value) -> Self {
        Self::Record(record)
    }
}

impl RecipientInput {
    pub fn resolve(self) -> Party {
        match self {
            RecipientInput::Party(party) => party.normalized(),
            RecipientInput::Record(record) => party_from_record(&record),
        }
    }
}

/// One requested invoice line.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemInput {
    Line {
        description: String,
        quantity: Decimal,
        unit: Option<String>,
        unit_price: Decimal,
    },
    Record(Value),
}

impl ItemInput {
    pub fn line(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self::Line {
            description: description.into(),
            quantity,
            unit: None,
            unit_price,
        }
    }

    /// Turn the request into a [`LineItem`]. `position` is 1-based and only
    /// used in error messages.
    pub fn into_line_item(self, default_unit: &str, position: usize) -> DomainResult<LineItem> {
        match self {
            ItemInput::Line {
                description,
                quantity,
                unit,
                unit_price,
            } => LineItem::new(
                description,
                quantity,
                unit.unwrap_or_else(|| default_unit.to_string()),
                unit_price,
            ),
            ItemInput::Record(record) => {
                if !record.is_object() {
                    return Err(DomainError::invalid_input(format!(
                        "item {position} is not an object"
                    )));
                }
                let description = text_field(&record, ITEM_DESCRIPTION_KEYS).unwrap_or_default();
                let quantity = decimal_field(&record, ITEM_QUANTITY_KEYS, "quantity")?
                    .unwrap_or(Decimal::ONE);
                let unit = text_field(&record, ITEM_UNIT_KEYS)
                    .unwrap_or_else(|| default_unit.to_string());
                let unit_price = decimal_field(&record, ITEM_PRICE_KEYS, "unit price")?
                    .ok_or_else(|| {
                        DomainError::invalid_input(format!("item {position} has no unit price"))
                    })?;

                LineItem::new(description, quantity, unit, unit_price).map_err(|e| match e {
                    DomainError::InvalidInput(msg) => {
                        DomainError::invalid_input(format!("item {position}: {msg}"))
                    }
                    other => other,
                })
            }
        }
    }
}

/// Amount to bill when no line items are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackAmount {
    /// Amount without VAT.
    Subtotal(Decimal),
    /// Amount including VAT; the subtotal is derived with the invoice's tax
    /// rate.
    Total(Decimal),
}

/// Everything a caller can supply for one invoice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceInput {
    pub invoice_number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub due_days: Option<u32>,
    pub recipient: RecipientInput,
    /// Overrides the configured company profile.
    pub sender: Option<Party>,
    pub items: Vec<ItemInput>,
    pub fallback: Option<FallbackAmount>,
    /// Description for the line synthesized from `fallback`.
    pub fallback_description: Option<String>,
    pub tax_rate: Option<Decimal>,
    pub notes: Option<String>,
}

impl InvoiceInput {
    pub fn new(invoice_number: impl Into<String>) -> Self {
        Self {
            invoice_number: Some(invoice_number.into()),
            ..Self::default()
        }
    }

    pub fn issued_on(mut self, date: NaiveDate) -> Self {
        self.issue_date = Some(date);
        self
    }

    pub fn due_on(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn due_in_days(mut self, days: u32) -> Self {
        self.due_days = Some(days);
        self
    }

    pub fn recipient(mut self, recipient: impl Into<RecipientInput>) -> Self {
        self.recipient = recipient.into();
        self
    }

    pub fn sender(mut self, sender: Party) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn item(mut self, item: ItemInput) -> Self {
        self.items.push(item);
        self
    }

    pub fn fallback(mut self, amount: FallbackAmount) -> Self {
        self.fallback = Some(amount);
        self
    }

    pub fn tax_rate(mut self, rate: Decimal) -> Self {
        self.tax_rate = Some(rate);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Read an invoice request from a loose JSON record.
    ///
    /// When no `recipient`/`client`/`customer` object is present the record
    /// itself is treated as the client record (flat order records carry
    /// `client_name`, `email` and so on at the top level, or a plain-string
    /// `client`). An unreadable
    /// number or date is an error; absent values are left for the builder's
    /// defaults.
    pub fn from_record(record: &Value) -> DomainResult<Self> {
        if !record.is_object() {
            return Err(DomainError::invalid_input("invoice request must be an object"));
        }

        let recipient = lookup(record, RECIPIENT_KEYS)
            .filter(|v| v.is_object())
            .unwrap_or(record)
            .clone();

        let sender = lookup(record, SENDER_KEYS)
            .filter(|v| v.is_object())
            .map(party_from_record);

        let items = match lookup(record, ITEMS_KEYS) {
            None => Vec::new(),
            Some(Value::Array(items)) => items.iter().cloned().map(ItemInput::Record).collect(),
            Some(_) => return Err(DomainError::invalid_input("items must be a list")),
        };

        let fallback = match decimal_field(record, SUBTOTAL_KEYS, "subtotal")? {
            Some(subtotal) => Some(FallbackAmount::Subtotal(subtotal)),
            None => decimal_field(record, TOTAL_KEYS, "total")?.map(FallbackAmount::Total),
        };

        let due_days = decimal_field(record, DUE_DAYS_KEYS, "due days")?
            .map(whole_days)
            .transpose()?;

        Ok(Self {
            invoice_number: text_field(record, INVOICE_NUMBER_KEYS),
            issue_date: date_field(record, ISSUE_DATE_KEYS, "issue date")?,
            due_date: date_field(record, DUE_DATE_KEYS, "due date")?,
            due_days,
            recipient: RecipientInput::Record(recipient),
            sender,
            items,
            fallback,
            fallback_description: text_field(record, DESCRIPTION_KEYS),
            tax_rate: decimal_field(record, TAX_RATE_KEYS, "tax rate")?,
            notes: text_field(record, NOTES_KEYS),
        })
    }
}

fn whole_days(days: Decimal) -> DomainResult<u32> {
    days.fract()
        .is_zero()
        .then(|| days.to_u32())
        .flatten()
        .ok_or_else(|| {
            DomainError::invalid_input(format!(
                "due days must be a non-negative whole number, got {days}"
            ))
        })
}

fn lookup<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !is_blank(value))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn text_field(record: &Value, keys: &[&str]) -> Option<String> {
    lookup(record, keys).and_then(|value| match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn decimal_field(record: &Value, keys: &[&str], what: &str) -> DomainResult<Option<Decimal>> {
    let Some(value) = lookup(record, keys) else {
        return Ok(None);
    };

    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    };

    parsed
        .map(Some)
        .ok_or_else(|| DomainError::invalid_input(format!("{what} is not a number: {value}")))
}

fn date_field(record: &Value, keys: &[&str], what: &str) -> DomainResult<Option<NaiveDate>> {
    let Some(value) = lookup(record, keys) else {
        return Ok(None);
    };

    value
        .as_str()
        .and_then(parse_date)
        .map(Some)
        .ok_or_else(|| DomainError::invalid_input(format!("{what} is not a date: {value}")))
}
