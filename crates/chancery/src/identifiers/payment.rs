//! Credit card numbers.

use rand::RngCore;
use serde::Deserialize;

use super::verified;
use crate::checksum::{luhn_check, luhn_digit, parse_digits, random_digits, render_digits};
use crate::error::ChanceError;
use crate::sampling::pickone;
use crate::tables::{CardType, DataTables};

/// Options for [`cc_type`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardTypeOptions {
    /// Display or short name of the issuer; random when absent.
    pub name: Option<String>,
}

/// Options for [`cc`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardOptions {
    /// Display or short name of the issuer; random when absent.
    #[serde(rename = "type")]
    pub card_type: Option<String>,
}

/// Resolves a card type by name, or picks one at random.
///
/// # Errors
///
/// Returns [`ChanceError::UnsupportedCardType`] listing the known short
/// names when `name` matches no issuer.
pub fn cc_type<'a, R: RngCore + ?Sized>(
    rng: &mut R,
    tables: &'a DataTables,
    options: &CardTypeOptions,
) -> Result<&'a CardType, ChanceError> {
    match options.name.as_deref() {
        Some(name) => tables
            .card_type(name)
            .ok_or_else(|| ChanceError::UnsupportedCardType {
                name: name.to_owned(),
                permitted: tables
                    .card_types()
                    .iter()
                    .map(|card| card.short_name().to_owned())
                    .collect(),
            }),
        None => pickone(rng, tables.card_types()),
    }
}

/// Returns a Luhn-valid card number carrying the issuer's prefix and length.
///
/// # Errors
///
/// Returns [`ChanceError::UnsupportedCardType`] for an unknown issuer.
///
/// # Example
///
/// ```
/// use chancery::{DataTables, Engine, identifiers::{CardOptions, cc}, luhn_check};
///
/// let tables = DataTables::builtin();
/// let mut engine = Engine::seeded(42_u32);
/// let options = CardOptions { card_type: Some("visa".to_owned()) };
///
/// let number = cc(&mut engine, &tables, &options).expect("known issuer");
/// assert!(number.starts_with('4'));
/// assert_eq!(number.len(), 16);
/// assert!(luhn_check(&number));
/// ```
pub fn cc<R: RngCore + ?Sized>(
    rng: &mut R,
    tables: &DataTables,
    options: &CardOptions,
) -> Result<String, ChanceError> {
    let card = cc_type(
        rng,
        tables,
        &CardTypeOptions {
            name: options.card_type.clone(),
        },
    )?;

    let mut digits = parse_digits(card.prefix())?;
    let body_length = card.length() - card.prefix().len() - 1;
    digits.extend(random_digits(rng, body_length)?);
    digits.push(luhn_digit(&digits));

    verified("credit card number", render_digits(&digits), luhn_check)
}
