use rust_decimal::Decimal;
use serde::Serialize;

use arve_core::{DomainError, DomainResult, ValueObject};

/// One billable row on an invoice.
///
/// The amount is derived once, at construction. Fields are read-only so the
/// amount can never disagree with quantity × unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    description: String,
    quantity: Decimal,
    unit: String,
    /// Price per unit, excluding VAT.
    unit_price: Decimal,
    amount: Decimal,
}

impl ValueObject for LineItem {}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        unit: impl Into<String>,
        unit_price: Decimal,
    ) -> DomainResult<Self> {
        if quantity <= Decimal::ZERO {
            return Err(DomainError::invalid_input(format!(
                "line item quantity must be positive, got {quantity}"
            )));
        }
        if unit_price < Decimal::ZERO {
            return Err(DomainError::invalid_input(format!(
                "line item unit price must not be negative, got {unit_price}"
            )));
        }

        let amount = quantity
            .checked_mul(unit_price)
            .ok_or_else(|| DomainError::invalid_input("line item amount overflow"))?;

        Ok(Self {
            description: description.into(),
            quantity,
            unit: unit.into(),
            unit_price,
            amount,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amount_is_quantity_times_price() {
        let item = LineItem::new("PLA print", dec!(2.5), "h", dec!(12.40)).unwrap();
        assert_eq!(item.amount(), dec!(31.00));
    }

    #[test]
    fn free_items_are_allowed() {
        let item = LineItem::new("Sample", dec!(1), "tk", dec!(0)).unwrap();
        assert_eq!(item.amount(), Decimal::ZERO);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let err = LineItem::new("x", dec!(-1), "tk", dec!(10)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(msg) if msg.contains("quantity")));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(LineItem::new("x", dec!(0), "tk", dec!(10)).is_err());
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = LineItem::new("x", dec!(1), "tk", dec!(-0.01)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(msg) if msg.contains("unit price")));
    }

    #[test]
    fn overflow_is_reported_not_panicked() {
        let err = LineItem::new("x", Decimal::MAX, "tk", dec!(2)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
