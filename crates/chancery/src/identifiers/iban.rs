//! International bank account numbers (ISO 13616).

use rand::RngCore;
use serde::Deserialize;

use super::verified;
use crate::checksum::mod97;
use crate::error::ChanceError;
use crate::sampling::{CharacterOptions, character, pickone};
use crate::tables::{DataTables, IbanFormat};

/// Options for [`iban`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IbanOptions {
    /// ISO 3166 country code; random when absent.
    pub country: Option<String>,
}

/// Returns an IBAN whose BBAN follows the country's table pattern.
///
/// # Errors
///
/// Returns [`ChanceError::UnsupportedIbanCountry`] when the country has no
/// format in the tables.
///
/// # Example
///
/// ```
/// use chancery::{DataTables, Engine, identifiers::{IbanOptions, iban, iban_check}};
///
/// let tables = DataTables::builtin();
/// let mut engine = Engine::seeded(42_u32);
/// let options = IbanOptions { country: Some("GB".to_owned()) };
///
/// let value = iban(&mut engine, &tables, &options).expect("known country");
/// assert!(value.starts_with("GB"));
/// assert_eq!(value.len(), 22);
/// assert!(iban_check(&value));
/// ```
pub fn iban<R: RngCore + ?Sized>(
    rng: &mut R,
    tables: &DataTables,
    options: &IbanOptions,
) -> Result<String, ChanceError> {
    let format = resolve_format(rng, tables, options)?;

    let mut bban = String::with_capacity(format.bban_length());
    for segment in format.segments() {
        let pool = CharacterOptions::from_pool(segment.class.pool());
        for _ in 0..segment.count {
            bban.push(character(rng, &pool)?);
        }
    }

    let country = format.country();
    let rearranged = format!("{bban}{country}00");
    let remainder = mod97(&rearranged).ok_or_else(|| ChanceError::ChecksumMismatch {
        identifier: "IBAN",
        value: rearranged.clone(),
    })?;
    let check = 98 - remainder;

    verified("IBAN", format!("{country}{check:02}{bban}"), iban_check)
}

/// Returns whether `value` is a structurally valid IBAN with correct
/// mod-97 check digits. Spaces are ignored.
#[must_use]
pub fn iban_check(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| *c != ' ').collect();
    if compact.len() < 5 {
        return false;
    }
    let Some((head, tail)) = compact.split_at_checked(4) else {
        return false;
    };
    let Some((country, check)) = head.split_at_checked(2) else {
        return false;
    };
    let well_formed = country.bytes().all(|b| b.is_ascii_uppercase())
        && check.bytes().all(|b| b.is_ascii_digit())
        && tail
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase());
    well_formed && mod97(&format!("{tail}{head}")) == Some(1)
}

fn resolve_format<'a, R: RngCore + ?Sized>(
    rng: &mut R,
    tables: &'a DataTables,
    options: &IbanOptions,
) -> Result<&'a IbanFormat, ChanceError> {
    match options.country.as_deref() {
        Some(country) => {
            tables
                .iban_format(country)
                .ok_or_else(|| ChanceError::UnsupportedIbanCountry {
                    country: country.to_owned(),
                    permitted: tables
                        .iban_formats()
                        .iter()
                        .map(|format| format.country().to_owned())
                        .collect(),
                })
        }
        None => pickone(rng, tables.iban_formats()),
    }
}
