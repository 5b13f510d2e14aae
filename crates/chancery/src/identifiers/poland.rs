//! Polish identifiers: PESEL (people), NIP (tax) and REGON (business).

use chrono::{Datelike, NaiveDate};
use rand::RngCore;
use serde::Deserialize;

use super::{regenerate, verified};
use crate::checksum::{parse_digits, random_digits, render_digits, weighted_sum};
use crate::error::ChanceError;
use crate::person::{Gender, gender};
use crate::sampling::{IntegerRange, integer, pickone};
use crate::time::{DateOptions, date, date_parts};

const PESEL_WEIGHTS: [u32; 10] = [1, 3, 7, 9, 1, 3, 7, 9, 1, 3];
const NIP_WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];
const REGON_WEIGHTS: [u32; 8] = [8, 9, 2, 3, 4, 5, 6, 7];

const PESEL_FIRST_YEAR: i32 = 1800;
const PESEL_LAST_YEAR: i32 = 2299;

const MALE_DIGITS: [u8; 5] = [1, 3, 5, 7, 9];
const FEMALE_DIGITS: [u8; 5] = [0, 2, 4, 6, 8];

/// Options for [`pl_pesel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PeselOptions {
    /// Birth date to encode; random between 1800 and 2299 when absent.
    pub birthday: Option<NaiveDate>,
    /// Gender encoded in the serial; random when absent.
    pub gender: Option<Gender>,
}

/// Returns a PESEL encoding a birth date and gender.
///
/// The month carries the century: +80 for the 1800s, +0 for the 1900s, and
/// +20, +40, +60 for each later century.
///
/// # Errors
///
/// Returns [`ChanceError::InvalidOptions`] when the birthday falls outside
/// the years a PESEL can encode.
///
/// # Example
///
/// ```
/// use chancery::{Engine, identifiers::{PeselOptions, pl_pesel, pl_pesel_check}};
/// use chancery::person::Gender;
/// use chrono::NaiveDate;
///
/// let mut engine = Engine::seeded(42_u32);
/// let options = PeselOptions {
///     birthday: NaiveDate::from_ymd_opt(2004, 7, 15),
///     gender: Some(Gender::Female),
/// };
///
/// let value = pl_pesel(&mut engine, options).expect("encodable birthday");
/// assert!(value.starts_with("042715"));
/// assert!(pl_pesel_check(&value));
/// ```
pub fn pl_pesel<R: RngCore + ?Sized>(rng: &mut R, options: PeselOptions) -> Result<String, ChanceError> {
    let birthday = match options.birthday {
        Some(birthday) => birthday,
        None => date(rng, pesel_dates())?,
    };
    let offset = century_offset(birthday.year()).ok_or_else(|| ChanceError::InvalidOptions {
        generator: "pl_pesel".to_owned(),
        message: format!(
            "birthday {birthday} must fall between {PESEL_FIRST_YEAR} and {PESEL_LAST_YEAR}"
        ),
    })?;
    let encoded_gender = options.gender.unwrap_or_else(|| gender(rng));

    let (year, month, day) = date_parts(birthday);
    let mut body = parse_digits(&format!("{year:02}{:02}{day:02}", month + offset))?;
    body.extend(random_digits(rng, 3)?);
    let gender_digits = match encoded_gender {
        Gender::Male => &MALE_DIGITS,
        Gender::Female => &FEMALE_DIGITS,
    };
    body.push(*pickone(rng, gender_digits)?);
    body.push(pesel_digit(&body));

    verified("PESEL", render_digits(&body), pl_pesel_check)
}

/// Returns whether `value` is a PESEL with a valid date and check digit.
#[must_use]
pub fn pl_pesel_check(value: &str) -> bool {
    let Ok(digits) = parse_digits(value) else {
        return false;
    };
    let Some((check, body)) = digits.split_last() else {
        return false;
    };
    body.len() == 10 && pesel_digit(body) == *check && decode_birthday(body).is_some()
}

/// Returns a NIP tax number.
///
/// # Errors
///
/// Returns [`ChanceError::ChecksumRetriesExhausted`] if every drawn body
/// produced the unissuable checksum 10.
pub fn pl_nip<R: RngCore + ?Sized>(rng: &mut R) -> Result<String, ChanceError> {
    let digits = regenerate(rng, "NIP", |source| {
        let office = integer(source, IntegerRange::new(1, 9))?;
        let mut body = vec![office as u8];
        body.extend(random_digits(source, 8)?);
        let check = weighted_sum(&body, &NIP_WEIGHTS) % 11;
        if check == 10 {
            return Ok(None);
        }
        body.push(check as u8);
        Ok(Some(body))
    })?;

    verified("NIP", render_digits(&digits), pl_nip_check)
}

/// Returns whether `value` is a ten-digit NIP with a valid check digit.
#[must_use]
pub fn pl_nip_check(value: &str) -> bool {
    let Ok(digits) = parse_digits(value) else {
        return false;
    };
    let Some((check, body)) = digits.split_last() else {
        return false;
    };
    let sum = weighted_sum(body, &NIP_WEIGHTS) % 11;
    body.len() == 9 && sum != 10 && sum == u32::from(*check)
}

/// Returns a nine-digit REGON.
///
/// # Errors
///
/// Propagates digit sampling failures.
pub fn pl_regon<R: RngCore + ?Sized>(rng: &mut R) -> Result<String, ChanceError> {
    let mut body = random_digits(rng, 8)?;
    body.push(regon_digit(&body));
    verified("REGON", render_digits(&body), pl_regon_check)
}

/// Returns whether `value` is a nine-digit REGON with a valid check digit.
#[must_use]
pub fn pl_regon_check(value: &str) -> bool {
    let Ok(digits) = parse_digits(value) else {
        return false;
    };
    match digits.split_last() {
        Some((check, body)) => body.len() == 8 && regon_digit(body) == *check,
        None => false,
    }
}

fn pesel_dates() -> DateOptions {
    let min = NaiveDate::from_ymd_opt(PESEL_FIRST_YEAR, 1, 1).unwrap_or(NaiveDate::MIN);
    let max = NaiveDate::from_ymd_opt(PESEL_LAST_YEAR, 12, 31).unwrap_or(NaiveDate::MAX);
    DateOptions::new(min, max)
}

const fn century_offset(year: i32) -> Option<u32> {
    match year {
        1800..=1899 => Some(80),
        1900..=1999 => Some(0),
        2000..=2099 => Some(20),
        2100..=2199 => Some(40),
        2200..=2299 => Some(60),
        _ => None,
    }
}

fn decode_birthday(body: &[u8]) -> Option<NaiveDate> {
    let pair = |index: usize| -> Option<u32> {
        let tens = u32::from(*body.get(index)?);
        let units = u32::from(*body.get(index + 1)?);
        Some(tens * 10 + units)
    };
    let (year, encoded_month, day) = (pair(0)?, pair(2)?, pair(4)?);
    let (century, month) = match encoded_month {
        81..=92 => (1800, encoded_month - 80),
        1..=12 => (1900, encoded_month),
        21..=32 => (2000, encoded_month - 20),
        41..=52 => (2100, encoded_month - 40),
        61..=72 => (2200, encoded_month - 60),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(century + year as i32, month, day)
}

fn pesel_digit(body: &[u8]) -> u8 {
    ((10 - weighted_sum(body, &PESEL_WEIGHTS) % 10) % 10) as u8
}

/// A checksum of 10 maps to 0.
fn regon_digit(body: &[u8]) -> u8 {
    (weighted_sum(body, &REGON_WEIGHTS) % 11 % 10) as u8
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::engine::Engine;

    #[fixture]
    fn engine() -> Engine {
        Engine::seeded("poland")
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[rstest]
    #[case("44051401359", true)]
    #[case("02070803628", true)]
    #[case("44051401358", false)]
    #[case("44135401351", false)]
    #[case("4405140135", false)]
    fn checks_known_pesels(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(pl_pesel_check(value), expected);
    }

    #[rstest]
    #[case(ymd(1899, 12, 31), "999231")]
    #[case(ymd(1985, 1, 2), "850102")]
    #[case(ymd(2004, 7, 15), "042715")]
    #[case(ymd(2150, 3, 1), "504301")]
    #[case(ymd(2299, 11, 30), "997130")]
    fn pesel_encodes_the_century_in_the_month(
        mut engine: Engine,
        #[case] birthday: NaiveDate,
        #[case] prefix: &str,
    ) {
        let options = PeselOptions {
            birthday: Some(birthday),
            gender: None,
        };
        let value = pl_pesel(&mut engine, options).expect("encodable birthday");
        assert!(value.starts_with(prefix), "{value} lacks {prefix}");
        let digits = parse_digits(&value).expect("digits only");
        assert_eq!(decode_birthday(&digits), Some(birthday));
    }

    #[rstest]
    #[case(Gender::Male, 1)]
    #[case(Gender::Female, 0)]
    fn pesel_encodes_gender_parity(mut engine: Engine, #[case] gender: Gender, #[case] parity: u8) {
        for _ in 0..50 {
            let options = PeselOptions {
                birthday: None,
                gender: Some(gender),
            };
            let value = pl_pesel(&mut engine, options).expect("valid");
            let digits = parse_digits(&value).expect("digits only");
            assert_eq!(digits.get(9).map(|digit| digit % 2), Some(parity));
            assert!(pl_pesel_check(&value));
        }
    }

    #[rstest]
    fn pesel_rejects_unencodable_birthdays(mut engine: Engine) {
        let options = PeselOptions {
            birthday: Some(ymd(1799, 12, 31)),
            gender: None,
        };
        assert!(matches!(
            pl_pesel(&mut engine, options),
            Err(ChanceError::InvalidOptions { .. })
        ));
    }

    #[rstest]
    #[case("1234563218", true)]
    #[case("5260250995", true)]
    #[case("1234563217", false)]
    #[case("123456321", false)]
    fn checks_known_nips(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(pl_nip_check(value), expected);
    }

    #[rstest]
    fn generated_nips_never_carry_a_checksum_of_ten(mut engine: Engine) {
        for _ in 0..300 {
            let value = pl_nip(&mut engine).expect("valid");
            assert_eq!(value.len(), 10);
            assert!(pl_nip_check(&value), "{value} failed");
        }
    }

    #[rstest]
    #[case("123456785", true)]
    #[case("123456784", false)]
    fn checks_known_regons(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(pl_regon_check(value), expected);
    }

    #[test]
    fn regon_maps_a_checksum_of_ten_to_zero() {
        assert_eq!(regon_digit(&[0, 0, 0, 0, 0, 0, 0, 8]), 1);
        // 2 * 5 = 10
        assert_eq!(regon_digit(&[0, 0, 5, 0, 0, 0, 0, 0]), 0);
        assert!(pl_regon_check("005000000"));
    }

    #[rstest]
    fn generated_regons_validate(mut engine: Engine) {
        for _ in 0..300 {
            let value = pl_regon(&mut engine).expect("valid");
            assert_eq!(value.len(), 9);
            assert!(pl_regon_check(&value), "{value} failed");
        }
    }
}
