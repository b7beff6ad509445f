//! Estonian payment reference number ("viitenumber").
//!
//! A reference is the digits of the invoice identifier followed by one check
//! digit computed with the 7-3-1 method: weights 7, 3, 1 repeat from the
//! rightmost digit leftwards, and the check digit brings the weighted sum up to
//! the next multiple of ten.

/// Maximum number of identifier digits carried into a reference. The check
/// digit makes the full reference at most 19 characters long.
pub const MAX_BASE_DIGITS: usize = 18;

const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Build a payment reference from an invoice identifier.
///
/// Non-digit characters are dropped and the first 18 digits are kept. An
/// identifier with no digits at all is returned unchanged.
pub fn generate(identifier: &str) -> String {
    let digits: String = identifier
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_BASE_DIGITS)
        .collect();

    match check_digit(&digits) {
        Some(check) => format!("{digits}{check}"),
        None => identifier.to_string(),
    }
}

/// Compute the 7-3-1 check digit for a string of ASCII digits.
///
/// Returns `None` for an empty string or when anything other than a digit is
/// present.
pub fn check_digit(digits: &str) -> Option<u8> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let sum: u32 = digits
        .bytes()
        .rev()
        .zip(WEIGHTS.iter().cycle())
        .map(|(b, w)| u32::from(b - b'0') * w)
        .sum();

    Some(((10 - sum % 10) % 10) as u8)
}

/// Verify a complete reference (base digits plus trailing check digit).
pub fn is_valid(reference: &str) -> bool {
    if reference.len() < 2
        || reference.len() > MAX_BASE_DIGITS + 1
        || !reference.bytes().all(|b| b.is_ascii_digit())
    {
        return false;
    }
    let (base, check) = reference.split_at(reference.len() - 1);
    match (check_digit(base), check.parse::<u8>()) {
        (Some(expected), Ok(actual)) => expected == actual,
        _ => false,
    }
}
