//! Brazilian taxpayer numbers: CPF for people, CNPJ for companies.

use rand::RngCore;
use serde::Deserialize;

use super::{punctuate, regenerate, strip_separators, verified};
use crate::checksum::{parse_digits, random_digits, render_digits, weighted_sum};
use crate::error::ChanceError;

const CPF_FIRST_WEIGHTS: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const CPF_SECOND_WEIGHTS: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

const CPF_SEPARATORS: [(usize, char); 3] = [(3, '.'), (6, '.'), (9, '-')];
const CNPJ_SEPARATORS: [(usize, char); 4] = [(2, '.'), (5, '.'), (8, '/'), (12, '-')];

/// Head office branch number carried by generated CNPJs.
const CNPJ_HEAD_OFFICE: [u8; 4] = [0, 0, 0, 1];

/// Options for [`cpf`] and [`cnpj`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrazilOptions {
    /// Insert the conventional punctuation.
    pub formatted: bool,
}

impl Default for BrazilOptions {
    fn default() -> Self {
        Self { formatted: true }
    }
}

/// Returns a CPF, formatted as `000.000.000-00` unless disabled.
///
/// # Errors
///
/// Returns [`ChanceError::ChecksumRetriesExhausted`] if every drawn body
/// was a reserved repeated-digit sequence.
///
/// # Example
///
/// ```
/// use chancery::{Engine, identifiers::{BrazilOptions, cpf, cpf_check}};
///
/// let mut engine = Engine::seeded(42_u32);
/// let value = cpf(&mut engine, BrazilOptions::default()).expect("valid body");
///
/// assert_eq!(value.len(), 14);
/// assert!(cpf_check(&value));
/// ```
pub fn cpf<R: RngCore + ?Sized>(rng: &mut R, options: BrazilOptions) -> Result<String, ChanceError> {
    let digits = regenerate(rng, "CPF", |source| {
        let body = random_digits(source, 9)?;
        if is_repeated(&body) {
            return Ok(None);
        }
        Ok(Some(with_check_digits(body, &CPF_FIRST_WEIGHTS, &CPF_SECOND_WEIGHTS)))
    })?;

    let raw = render_digits(&digits);
    let value = if options.formatted {
        punctuate(&raw, &CPF_SEPARATORS)
    } else {
        raw
    };
    verified("CPF", value, cpf_check)
}

/// Returns whether `value` is a valid CPF, with or without punctuation.
#[must_use]
pub fn cpf_check(value: &str) -> bool {
    check(value, 11, &CPF_FIRST_WEIGHTS, &CPF_SECOND_WEIGHTS)
}

/// Returns a head-office CNPJ, formatted as `00.000.000/0001-00` unless
/// disabled.
///
/// # Errors
///
/// Returns [`ChanceError::ChecksumRetriesExhausted`] if every drawn root
/// was a reserved repeated-digit sequence.
pub fn cnpj<R: RngCore + ?Sized>(rng: &mut R, options: BrazilOptions) -> Result<String, ChanceError> {
    let digits = regenerate(rng, "CNPJ", |source| {
        let mut body = random_digits(source, 8)?;
        if is_repeated(&body) {
            return Ok(None);
        }
        body.extend(CNPJ_HEAD_OFFICE);
        Ok(Some(with_check_digits(body, &CNPJ_FIRST_WEIGHTS, &CNPJ_SECOND_WEIGHTS)))
    })?;

    let raw = render_digits(&digits);
    let value = if options.formatted {
        punctuate(&raw, &CNPJ_SEPARATORS)
    } else {
        raw
    };
    verified("CNPJ", value, cnpj_check)
}

/// Returns whether `value` is a valid CNPJ, with or without punctuation.
#[must_use]
pub fn cnpj_check(value: &str) -> bool {
    check(value, 14, &CNPJ_FIRST_WEIGHTS, &CNPJ_SECOND_WEIGHTS)
}

fn check(value: &str, length: usize, first: &[u32], second: &[u32]) -> bool {
    let Ok(digits) = parse_digits(&strip_separators(value)) else {
        return false;
    };
    if digits.len() != length || is_repeated(&digits) {
        return false;
    }
    let body = digits.iter().take(length - 2).copied().collect();
    with_check_digits(body, first, second) == digits
}

/// Appends the two mod-11 check digits.
fn with_check_digits(mut digits: Vec<u8>, first: &[u32], second: &[u32]) -> Vec<u8> {
    digits.push(mod11_digit(&digits, first));
    digits.push(mod11_digit(&digits, second));
    digits
}

/// Remainders 0 and 1 would need a check digit of 11 or 10 and map to 0.
fn mod11_digit(digits: &[u8], weights: &[u32]) -> u8 {
    let remainder = weighted_sum(digits, weights) % 11;
    if remainder < 2 { 0 } else { (11 - remainder) as u8 }
}

fn is_repeated(digits: &[u8]) -> bool {
    digits.iter().all(|digit| Some(digit) == digits.first())
}
