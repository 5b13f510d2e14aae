//! Check-digit algorithms shared by the identifier generators.
//!
//! Luhn is public because callers validate card-like numbers directly; the
//! remaining helpers back the identifier modules.

use rand::RngCore;

use crate::error::ChanceError;
use crate::sampling::{IntegerRange, integer};

/// Computes the digit that makes `digits` followed by it Luhn-valid.
///
/// Walking left from the rightmost digit, every other digit starting with
/// the rightmost is doubled (minus 9 when above 9), then the check digit
/// tops the sum up to a multiple of ten.
///
/// # Errors
///
/// Returns [`ChanceError::InvalidDigits`] when the input holds anything
/// other than ASCII digits.
///
/// # Example
///
/// ```
/// use chancery::luhn_calculate;
///
/// assert_eq!(luhn_calculate("7992739871"), Ok(3));
/// ```
pub fn luhn_calculate(digits: &str) -> Result<u8, ChanceError> {
    parse_digits(digits).map(|parsed| luhn_digit(&parsed))
}

/// Returns whether `number`, including its final check digit, is
/// Luhn-valid. Empty or non-numeric input is simply invalid.
///
/// # Example
///
/// ```
/// use chancery::luhn_check;
///
/// assert!(luhn_check("79927398713"));
/// assert!(!luhn_check("79927398710"));
/// assert!(!luhn_check("not a number"));
/// ```
#[must_use]
pub fn luhn_check(number: &str) -> bool {
    let Ok(digits) = parse_digits(number) else {
        return false;
    };
    match digits.split_last() {
        Some((check, body)) => luhn_digit(body) == *check,
        None => false,
    }
}

pub(crate) fn luhn_digit(body: &[u8]) -> u8 {
    let sum: u32 = body
        .iter()
        .rev()
        .enumerate()
        .map(|(position, digit)| {
            let value = u32::from(*digit);
            if position % 2 == 0 {
                let doubled = value * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                value
            }
        })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Sums `digits[i] * weights[i]` over the shorter of the two.
pub(crate) fn weighted_sum(digits: &[u8], weights: &[u32]) -> u32 {
    digits
        .iter()
        .zip(weights)
        .map(|(digit, weight)| u32::from(*digit) * weight)
        .sum()
}

/// ISO 7064 mod-97 remainder of an alphanumeric string, reading letters as
/// 10 (`A`) to 35 (`Z`). Returns `None` for any other character.
pub(crate) fn mod97(input: &str) -> Option<u32> {
    input.chars().try_fold(0_u32, |remainder, c| {
        let value = c.to_digit(36)?;
        let shifted = if value < 10 {
            remainder * 10
        } else {
            remainder * 100
        };
        Some((shifted + value) % 97)
    })
}

pub(crate) fn parse_digits(input: &str) -> Result<Vec<u8>, ChanceError> {
    input
        .bytes()
        .map(|byte| {
            if byte.is_ascii_digit() {
                Ok(byte - b'0')
            } else {
                Err(ChanceError::InvalidDigits {
                    input: input.to_owned(),
                })
            }
        })
        .collect()
}

pub(crate) fn render_digits(digits: &[u8]) -> String {
    digits.iter().map(|digit| char::from(b'0' + digit)).collect()
}

pub(crate) fn random_digits<R: RngCore + ?Sized>(
    rng: &mut R,
    count: usize,
) -> Result<Vec<u8>, ChanceError> {
    let mut digits = Vec::with_capacity(count);
    for _ in 0..count {
        let digit = integer(rng, IntegerRange::new(0, 9))?;
        digits.push(u8::try_from(digit).unwrap_or(0));
    }
    Ok(digits)
}
