//! Italian codice fiscale.

use chrono::NaiveDate;
use rand::RngCore;
use serde::Deserialize;

use super::verified;
use crate::error::ChanceError;
use crate::person::{self, Gender};
use crate::sampling::{CharacterOptions, NaturalRange, character, natural, pad};
use crate::time::{DateOptions, date, date_parts};

const MONTH_LETTERS: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'H', 'L', 'M', 'P', 'R', 'S', 'T'];
const CITY_LETTERS: &str = "ABCDEFGHILMZ";
const VOWELS: &str = "AEIOU";
const FEMALE_DAY_OFFSET: u32 = 40;

/// Check values of characters in odd (1-based) positions, indexed by the
/// character's ordinal: digits and letters `A` to `J` share the first ten.
const ODD_VALUES: [u32; 26] = [
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, 2, 4, 18, 20, 11, 3, 6, 8, 12, 14, 16, 10, 22, 25, 24, 23,
];

/// Options for [`cf`]. Absent fields are generated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CfOptions {
    /// Given name.
    pub first: Option<String>,
    /// Family name.
    pub last: Option<String>,
    /// Gender; female codes add 40 to the birth day.
    pub gender: Option<Gender>,
    /// Birth date.
    pub birthday: Option<NaiveDate>,
    /// Cadastral municipality code: one letter and three digits.
    pub city: Option<String>,
}

/// Returns a codice fiscale.
///
/// # Errors
///
/// Returns [`ChanceError::InvalidOptions`] when `city` is not a letter
/// followed by three digits.
///
/// # Example
///
/// ```
/// use chancery::{Engine, identifiers::{CfOptions, cf}};
/// use chancery::person::Gender;
/// use chrono::NaiveDate;
///
/// let mut engine = Engine::seeded(42_u32);
/// let options = CfOptions {
///     first: Some("Mario".to_owned()),
///     last: Some("Rossi".to_owned()),
///     gender: Some(Gender::Male),
///     birthday: NaiveDate::from_ymd_opt(1985, 12, 10),
///     city: Some("A562".to_owned()),
/// };
///
/// assert_eq!(cf(&mut engine, &options).expect("valid options"), "RSSMRA85T10A562S");
/// ```
pub fn cf<R: RngCore + ?Sized>(rng: &mut R, options: &CfOptions) -> Result<String, ChanceError> {
    let encoded_gender = options.gender.unwrap_or_else(|| person::gender(rng));
    let first = match &options.first {
        Some(first) => first.clone(),
        None => person::first(rng),
    };
    let last = match &options.last {
        Some(last) => last.clone(),
        None => person::last(rng),
    };
    let birthday = match options.birthday {
        Some(birthday) => birthday,
        None => date(rng, DateOptions::default())?,
    };
    let city = match &options.city {
        Some(city) => validate_city(city)?,
        None => random_city(rng)?,
    };

    let (year, month, day) = date_parts(birthday);
    let month_letter = MONTH_LETTERS
        .get(month as usize - 1)
        .copied()
        .ok_or_else(|| ChanceError::InvalidOptions {
            generator: "cf".to_owned(),
            message: format!("birthday {birthday} has no month letter"),
        })?;
    let encoded_day = match encoded_gender {
        Gender::Male => day,
        Gender::Female => day + FEMALE_DAY_OFFSET,
    };

    let mut code = format!(
        "{}{}{year:02}{month_letter}{encoded_day:02}{city}",
        surname_code(&last),
        name_code(&first)
    );
    let check = check_char(&code).ok_or_else(|| ChanceError::ChecksumMismatch {
        identifier: "codice fiscale",
        value: code.clone(),
    })?;
    code.push(check);

    verified("codice fiscale", code, cf_check)
}

/// Returns whether `value` has the codice fiscale layout and a correct
/// check character.
#[must_use]
pub fn cf_check(value: &str) -> bool {
    const LAYOUT: &str = "LLLLLLDDLDDLDDDL";
    if value.chars().count() != LAYOUT.len() {
        return false;
    }
    let shaped = value.chars().zip(LAYOUT.chars()).all(|(c, kind)| match kind {
        'D' => c.is_ascii_digit(),
        _ => c.is_ascii_uppercase(),
    });
    let Some((body, check)) = value.split_at_checked(LAYOUT.len() - 1) else {
        return false;
    };
    shaped && check_char(body).is_some_and(|expected| check.starts_with(expected))
}

/// Consonants first, then vowels, padded with `X`.
fn surname_code(surname: &str) -> String {
    let (consonants, vowels) = letters(surname);
    consonants
        .into_iter()
        .chain(vowels)
        .chain(std::iter::repeat('X'))
        .take(3)
        .collect()
}

/// Like the surname, except four or more consonants keep the first, third
/// and fourth.
fn name_code(name: &str) -> String {
    let (consonants, _) = letters(name);
    if consonants.len() >= 4 {
        consonants
            .into_iter()
            .enumerate()
            .filter(|(index, _)| *index != 1)
            .map(|(_, c)| c)
            .take(3)
            .collect()
    } else {
        surname_code(name)
    }
}

fn letters(name: &str) -> (Vec<char>, Vec<char>) {
    name.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .partition(|c| !VOWELS.contains(*c))
}

fn check_char(body: &str) -> Option<char> {
    let mut sum = 0_u32;
    for (index, c) in body.chars().enumerate() {
        let value = ordinal(c)?;
        sum += if index % 2 == 0 {
            *ODD_VALUES.get(value)?
        } else {
            value as u32
        };
    }
    char::from_u32(u32::from(b'A') + sum % 26)
}

/// Digits map to their value, letters to their alphabet index.
fn ordinal(c: char) -> Option<usize> {
    if c.is_ascii_digit() {
        c.to_digit(10).map(|digit| digit as usize)
    } else if c.is_ascii_uppercase() {
        Some(c as usize - 'A' as usize)
    } else {
        None
    }
}

fn validate_city(city: &str) -> Result<String, ChanceError> {
    let upper = city.to_ascii_uppercase();
    let mut chars = upper.chars();
    let well_formed = chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.clone().count() == 3
        && chars.all(|c| c.is_ascii_digit());
    if well_formed {
        Ok(upper)
    } else {
        Err(ChanceError::InvalidOptions {
            generator: "cf".to_owned(),
            message: format!("city '{city}' must be one letter followed by three digits"),
        })
    }
}

fn random_city<R: RngCore + ?Sized>(rng: &mut R) -> Result<String, ChanceError> {
    let letter = character(rng, &CharacterOptions::from_pool(CITY_LETTERS))?;
    let number = natural(rng, NaturalRange::new(1, 999))?;
    Ok(format!("{letter}{}", pad(number, 3, '0')))
}
