//! Invoice engine configuration.
//!
//! The issuing company and the business defaults (VAT rate, payment term,
//! number prefix) are passed to the builder explicitly, so one process can
//! issue invoices for several company profiles.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use arve_core::{DomainError, DomainResult};
use arve_parties::{BankAccount, Party};

/// Standard Estonian VAT rate (24%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(24, 0, 0, false, 2);

/// Days between issue date and due date when the caller gives neither.
pub const DEFAULT_DUE_DAYS: u32 = 7;

/// Issuing company: the sender party and the account payments go to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub party: Party,
    pub bank: BankAccount,
}

impl CompanyProfile {
    pub fn new(party: Party, bank: BankAccount) -> Self {
        Self { party, bank }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceConfig {
    pub company: CompanyProfile,
    /// VAT as a fraction (`0.24`).
    pub tax_rate: Decimal,
    pub due_days: u32,
    /// Printed in front of the invoice number and used in file names.
    pub number_prefix: String,
    pub late_fee_notice: String,
    /// Unit label for items that don't name one ("tk" = piece).
    pub default_unit: String,
    /// Description for the single line synthesized from a bare total.
    pub default_item_description: String,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            company: CompanyProfile::default(),
            tax_rate: DEFAULT_TAX_RATE,
            due_days: DEFAULT_DUE_DAYS,
            number_prefix: "ARVE-".to_string(),
            late_fee_notice: "Viivis 0,5% päevas".to_string(),
            default_unit: "tk".to_string(),
            default_item_description: "3D-printimise teenus".to_string(),
        }
    }
}

impl InvoiceConfig {
    pub fn with_company(mut self, company: CompanyProfile) -> Self {
        self.company = company;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.company.party.has_name() {
            return Err(DomainError::validation("company profile name is not configured"));
        }
        if let Some(problem) = tax_rate_problem(self.tax_rate) {
            return Err(DomainError::validation(format!("configured {problem}")));
        }
        Ok(())
    }
}

/// Describes why `rate` is unusable, if it is outside `[0, 1]`.
pub(crate) fn tax_rate_problem(rate: Decimal) -> Option<String> {
    (rate < Decimal::ZERO || rate > Decimal::ONE)
        .then(|| format!("tax rate must be a fraction between 0 and 1, got {rate}"))
}
