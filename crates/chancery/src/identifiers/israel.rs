//! Israeli identity numbers (Teudat Zehut).

use rand::RngCore;

use super::verified;
use crate::checksum::{luhn_check, luhn_digit, random_digits, render_digits};
use crate::error::ChanceError;

const ID_LENGTH: usize = 9;

/// Returns a nine-digit identity number: eight random digits and a Luhn
/// check digit.
///
/// # Errors
///
/// Propagates digit sampling failures.
pub fn israel_id<R: RngCore + ?Sized>(rng: &mut R) -> Result<String, ChanceError> {
    let mut digits = random_digits(rng, ID_LENGTH - 1)?;
    digits.push(luhn_digit(&digits));
    verified("Israeli ID", render_digits(&digits), israel_id_check)
}

/// Returns whether `value` is a nine-digit identity number with a valid
/// check digit.
#[must_use]
pub fn israel_id_check(value: &str) -> bool {
    value.len() == ID_LENGTH && luhn_check(value)
}
