//! Alias resolution for client records.
//!
//! Recipient data has been stored under different key names over time
//! (`zip` vs `postal_code`, `registry_code` vs `registration_number`, a company
//! name next to a contact person's name). Every accepted spelling is listed
//! here, per canonical field, in priority order. Resolution runs once, when an
//! invoice is built.

use serde_json::Value;

use crate::party::Party;

/// Canonical party field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyField {
    Name,
    Address,
    City,
    PostalCode,
    Region,
    RegistrationNumber,
    VatNumber,
    Email,
    Phone,
}

/// Where a field value may come from in a loose record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasSource {
    /// A single key.
    Key(&'static str),
    /// Several keys whose non-empty values are joined with a space
    /// (`first_name` + `last_name`).
    Joined(&'static [&'static str]),
}

use AliasSource::{Joined, Key};

const NAME: &[AliasSource] = &[
    // Business recipients: the company name wins over the contact person.
    Key("company_name"),
    Key("companyName"),
    Key("company"),
    Key("business_name"),
    Key("name"),
    Key("client_name"),
    Key("clientName"),
    Key("customer_name"),
    Key("customerName"),
    // Plain-string client/customer; objects under these keys are nested records.
    Key("client"),
    Key("customer"),
    Key("full_name"),
    Key("fullName"),
    Joined(&["first_name", "last_name"]),
    Joined(&["firstName", "lastName"]),
];

const ADDRESS: &[AliasSource] = &[
    Key("address"),
    Key("street"),
    Key("street_address"),
    Key("streetAddress"),
    Key("address_line1"),
    Key("addressLine1"),
];

const CITY: &[AliasSource] = &[Key("city"), Key("town")];

const POSTAL_CODE: &[AliasSource] = &[
    Key("postal_code"),
    Key("postalCode"),
    Key("zip"),
    Key("zip_code"),
    Key("zipCode"),
    Key("postcode"),
];

const REGION: &[AliasSource] = &[
    Key("region"),
    Key("county"),
    Key("maakond"),
    Key("state"),
];

const REGISTRATION_NUMBER: &[AliasSource] = &[
    Key("registration_number"),
    Key("registrationNumber"),
    Key("registry_code"),
    Key("registryCode"),
    Key("reg_code"),
    Key("regCode"),
    Key("company_code"),
];

const VAT_NUMBER: &[AliasSource] = &[
    Key("vat_number"),
    Key("vatNumber"),
    Key("kmkr"),
    Key("vat_id"),
    Key("vatId"),
    Key("vat"),
];

const EMAIL: &[AliasSource] = &[
    Key("email"),
    Key("e_mail"),
    Key("contact_email"),
    Key("contactEmail"),
];

const PHONE: &[AliasSource] = &[
    Key("phone"),
    Key("phone_number"),
    Key("phoneNumber"),
    Key("telephone"),
    Key("tel"),
];

/// Keys under which older order records nest the client. The top-level
/// record is always consulted first.
pub const NESTED_RECORD_KEYS: &[&str] = &["client", "customer", "recipient"];

impl PartyField {
    pub const ALL: [PartyField; 9] = [
        PartyField::Name,
        PartyField::Address,
        PartyField::City,
        PartyField::PostalCode,
        PartyField::Region,
        PartyField::RegistrationNumber,
        PartyField::VatNumber,
        PartyField::Email,
        PartyField::Phone,
    ];

    /// Accepted sources for this field, highest priority first.
    pub fn aliases(self) -> &'static [AliasSource] {
        match self {
            PartyField::Name => NAME,
            PartyField::Address => ADDRESS,
            PartyField::City => CITY,
            PartyField::PostalCode => POSTAL_CODE,
            PartyField::Region => REGION,
            PartyField::RegistrationNumber => REGISTRATION_NUMBER,
            PartyField::VatNumber => VAT_NUMBER,
            PartyField::Email => EMAIL,
            PartyField::Phone => PHONE,
        }
    }
}

/// Resolve one canonical field from a loose record.
///
/// Strings are trimmed and blank ones skipped; numbers (registry codes are
/// often stored as numbers) are written out as-is. Nested client objects are
/// searched after the top-level record.
pub fn resolve_field(record: &Value, field: PartyField) -> Option<String> {
    candidate_objects(record).find_map(|object| {
        field.aliases().iter().find_map(|source| {
            let value = match source {
                Key(key) => object.get(*key).and_then(text),
                Joined(keys) => {
                    let parts: Vec<String> =
                        keys.iter().filter_map(|k| object.get(*k).and_then(text)).collect();
                    (!parts.is_empty()).then(|| parts.join(" "))
                }
            };
            if value.is_some() {
                tracing::trace!(?field, ?source, "resolved party field");
            }
            value
        })
    })
}

/// Build a [`Party`] from a loose record, resolving every field through the
/// alias table. Missing fields stay empty; a missing name is not an error.
pub fn party_from_record(record: &Value) -> Party {
    PartyField::ALL
        .into_iter()
        .fold(Party::default(), |party, field| match resolve_field(record, field) {
            Some(value) => party.with_field(field, value),
            None => party,
        })
}

fn candidate_objects(record: &Value) -> impl Iterator<Item = &serde_json::Map<String, Value>> {
    let nested = NESTED_RECORD_KEYS.iter().filter_map(move |key| record.get(*key));
    std::iter::once(record)
        .chain(nested)
        .filter_map(Value::as_object)
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
