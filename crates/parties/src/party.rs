use serde::{Deserialize, Serialize};

use arve_core::ValueObject;

use crate::aliases::PartyField;

/// Recipient or issuer of an invoice.
///
/// Optional fields hold `None` rather than empty strings; the setters trim
/// their input and treat blank text as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Party {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Business registry code ("registrikood").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    /// VAT identifier ("KMKR").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ValueObject for Party {}

impl Party {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            ..Self::default()
        }
    }

    pub fn with_address(self, address: impl Into<String>) -> Self {
        self.with_field(PartyField::Address, address)
    }

    pub fn with_city(self, city: impl Into<String>) -> Self {
        self.with_field(PartyField::City, city)
    }

    pub fn with_postal_code(self, postal_code: impl Into<String>) -> Self {
        self.with_field(PartyField::PostalCode, postal_code)
    }

    pub fn with_region(self, region: impl Into<String>) -> Self {
        self.with_field(PartyField::Region, region)
    }

    pub fn with_registration_number(self, number: impl Into<String>) -> Self {
        self.with_field(PartyField::RegistrationNumber, number)
    }

    pub fn with_vat_number(self, vat: impl Into<String>) -> Self {
        self.with_field(PartyField::VatNumber, vat)
    }

    pub fn with_email(self, email: impl Into<String>) -> Self {
        self.with_field(PartyField::Email, email)
    }

    pub fn with_phone(self, phone: impl Into<String>) -> Self {
        self.with_field(PartyField::Phone, phone)
    }

    /// Set one field by its canonical name. Blank values clear optional
    /// fields.
    pub fn with_field(mut self, field: PartyField, value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        let optional = (!trimmed.is_empty()).then(|| trimmed.to_string());

        match field {
            PartyField::Name => self.name = trimmed.to_string(),
            PartyField::Address => self.address = optional,
            PartyField::City => self.city = optional,
            PartyField::PostalCode => self.postal_code = optional,
            PartyField::Region => self.region = optional,
            PartyField::RegistrationNumber => self.registration_number = optional,
            PartyField::VatNumber => self.vat_number = optional,
            PartyField::Email => self.email = optional,
            PartyField::Phone => self.phone = optional,
        }
        self
    }

    /// Drop blank optional values that may have come in through
    /// deserialization.
    pub fn normalized(self) -> Self {
        let mut out = Party::new(self.name);
        for (field, value) in [
            (PartyField::Address, self.address),
            (PartyField::City, self.city),
            (PartyField::PostalCode, self.postal_code),
            (PartyField::Region, self.region),
            (PartyField::RegistrationNumber, self.registration_number),
            (PartyField::VatNumber, self.vat_number),
            (PartyField::Email, self.email),
            (PartyField::Phone, self.phone),
        ] {
            if let Some(value) = value {
                out = out.with_field(field, value);
            }
        }
        out
    }

    /// Postal code and region on one line (`"10111 Harjumaa"`), if either is
    /// present.
    pub fn postal_line(&self) -> Option<String> {
        let parts: Vec<&str> = [self.postal_code.as_deref(), self.region.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Bank account printed in the payment block of an invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankAccount {
    pub bank_name: String,
    /// BIC / SWIFT routing code.
    pub bank_code: String,
    /// IBAN.
    pub account: String,
}

impl ValueObject for BankAccount {}

impl BankAccount {
    pub fn new(
        bank_name: impl Into<String>,
        bank_code: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        Self {
            bank_name: bank_name.into(),
            bank_code: bank_code.into(),
            account: account.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_values_are_absent() {
        let party = Party::new("  Print OÜ ")
            .with_city("   ")
            .with_email(" info@print.ee ");

        assert_eq!(party.name, "Print OÜ");
        assert_eq!(party.city, None);
        assert_eq!(party.email.as_deref(), Some("info@print.ee"));
    }

    #[test]
    fn postal_line_joins_code_and_region() {
        let both = Party::new("A").with_postal_code("10111").with_region("Harjumaa");
        assert_eq!(both.postal_line().as_deref(), Some("10111 Harjumaa"));

        let region_only = Party::new("A").with_region("Tartumaa");
        assert_eq!(region_only.postal_line().as_deref(), Some("Tartumaa"));

        assert_eq!(Party::new("A").postal_line(), None);
    }

    #[test]
    fn normalized_clears_blank_strings_from_deserialized_input() {
        let raw: Party = serde_json::from_str(
            r#"{"name":"Klient","address":"","phone":" 5551234 "}"#,
        )
        .unwrap();

        let party = raw.normalized();
        assert_eq!(party.address, None);
        assert_eq!(party.phone.as_deref(), Some("5551234"));
    }

    #[test]
    fn equal_by_value() {
        let a = Party::new("Klient").with_city("Tallinn");
        let b = Party::new("Klient").with_city("Tallinn");
        assert_eq!(a, b);
    }
}
