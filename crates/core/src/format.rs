//! Estonian number and date formatting.
//!
//! Amounts use a decimal comma and no thousands separator (`1234,50`), dates
//! are `DD.MM.YYYY`. These functions never fail: input that cannot be
//! interpreted degrades to the zero amount or the empty string, so a
//! half-filled invoice can still be previewed.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits used for money on the rendered document.
pub const AMOUNT_DECIMALS: u32 = 2;

const DATE_FORMAT: &str = "%d.%m.%Y";

/// Format a monetary amount with two fractional digits.
pub fn format_amount(value: Decimal) -> String {
    format_decimal(Some(value), AMOUNT_DECIMALS)
}

/// Format a decimal with a fixed number of fractional digits and a comma
/// separator. `None` renders as zero with the same number of digits.
///
/// Rounds half away from zero, which matches how amounts are rounded on paper.
pub fn format_decimal(value: Option<Decimal>, decimals: u32) -> String {
    let rounded = value
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    // "-0,00" is never a useful thing to print on an invoice.
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };

    format!("{:.*}", decimals as usize, rounded).replace('.', ",")
}

/// Format a float amount. NaN and infinities render as `0,00`.
pub fn format_amount_f64(value: f64) -> String {
    if !value.is_finite() {
        return format_decimal(None, AMOUNT_DECIMALS);
    }
    format_decimal(Decimal::from_f64(value), AMOUNT_DECIMALS)
}

/// Format an amount given as text (`"1234.5"` or `"1234,5"`).
pub fn format_amount_str(raw: &str) -> String {
    format_decimal(parse_decimal(raw), AMOUNT_DECIMALS)
}

/// Format a quantity without trailing zeros: `2` → `"2"`, `1.50` → `"1,5"`.
pub fn format_quantity(value: Decimal) -> String {
    let normalized = value.normalize();
    if normalized.is_zero() {
        return "0".to_string();
    }
    normalized.to_string().replace('.', ",")
}

/// Format a tax rate fraction as a whole-number percentage: `0.24` → `"24"`.
pub fn format_percent(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if percent.is_zero() {
        return "0".to_string();
    }
    percent.to_string()
}

/// Format a calendar date as `DD.MM.YYYY`. `None` renders as `""`.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Format a date given as text.
///
/// Accepts ISO dates (`2025-03-05`), RFC 3339 timestamps and dates that are
/// already in `DD.MM.YYYY` form. Anything else renders as `""`.
pub fn format_date_str(raw: &str) -> String {
    format_date(parse_date(raw))
}

/// Parse a date in any of the forms accepted by [`format_date_str`].
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| NaiveDate::parse_from_str(raw, DATE_FORMAT).ok())
}

/// Parse a decimal written with either a dot or a comma as fractional
/// separator. Spaces (including non-breaking ones) are ignored.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}
