//! United States Social Security numbers.

use rand::RngCore;
use serde::Deserialize;

use super::{punctuate, verified};
use crate::checksum::parse_digits;
use crate::error::ChanceError;
use crate::sampling::{IntegerRange, integer, pad};

/// Area number never issued.
const RESERVED_AREA: i64 = 666;
/// Areas from 900 up are reserved for taxpayer numbers.
const LAST_AREA: i64 = 899;

const SSN_SEPARATORS: [(usize, char); 2] = [(3, '-'), (5, '-')];

/// Options for [`ssn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SsnOptions {
    /// Return only the four-digit serial.
    pub ssn_four: bool,
    /// Separate the area, group and serial with dashes.
    pub dashes: bool,
}

impl Default for SsnOptions {
    fn default() -> Self {
        Self {
            ssn_four: false,
            dashes: true,
        }
    }
}

/// Returns a Social Security number drawn only from issuable ranges: area
/// 001 to 899 except 666, group 01 to 99, serial 0001 to 9999.
///
/// # Errors
///
/// Propagates integer sampling failures.
///
/// # Example
///
/// ```
/// use chancery::{Engine, identifiers::{SsnOptions, ssn, ssn_check}};
///
/// let mut engine = Engine::seeded(42_u32);
/// let value = ssn(&mut engine, SsnOptions::default()).expect("valid");
///
/// assert_eq!(value.len(), 11);
/// assert!(ssn_check(&value));
/// ```
pub fn ssn<R: RngCore + ?Sized>(rng: &mut R, options: SsnOptions) -> Result<String, ChanceError> {
    let serial = integer(rng, IntegerRange::new(1, 9999))?;
    if options.ssn_four {
        return Ok(pad(serial, 4, '0'));
    }

    // Draw from one fewer area and step over the reserved one.
    let mut area = integer(rng, IntegerRange::new(1, LAST_AREA - 1))?;
    if area >= RESERVED_AREA {
        area += 1;
    }
    let group = integer(rng, IntegerRange::new(1, 99))?;

    let raw = format!("{}{}{}", pad(area, 3, '0'), pad(group, 2, '0'), pad(serial, 4, '0'));
    let value = if options.dashes {
        punctuate(&raw, &SSN_SEPARATORS)
    } else {
        raw
    };
    verified("SSN", value, ssn_check)
}

/// Returns whether `value` is an issuable SSN, written either as nine
/// digits or as `AAA-GG-SSSS`.
#[must_use]
pub fn ssn_check(value: &str) -> bool {
    let compact = value.replace('-', "");
    if compact.len() != value.len() && punctuate(&compact, &SSN_SEPARATORS) != value {
        return false;
    }
    let Ok(digits) = parse_digits(&compact) else {
        return false;
    };
    if digits.len() != 9 {
        return false;
    }
    let area = number(digits.get(..3));
    let group = number(digits.get(3..5));
    let serial = number(digits.get(5..));
    (1..=LAST_AREA).contains(&area) && area != RESERVED_AREA && group != 0 && serial != 0
}

fn number(digits: Option<&[u8]>) -> i64 {
    digits
        .unwrap_or_default()
        .iter()
        .fold(0, |acc, digit| acc * 10 + i64::from(*digit))
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::engine::Engine;

    #[fixture]
    fn engine() -> Engine {
        Engine::seeded("ssn")
    }

    #[rstest]
    #[case("123-45-6789", true)]
    #[case("123456789", true)]
    #[case("899-99-9999", true)]
    #[case("666-45-6789", false)]
    #[case("000-45-6789", false)]
    #[case("900-45-6789", false)]
    #[case("123-00-6789", false)]
    #[case("123-45-0000", false)]
    #[case("12-345-6789", false)]
    #[case("1234-5-6789", false)]
    fn checks_ssns(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(ssn_check(value), expected);
    }

    #[rstest]
    #[case(SsnOptions { ssn_four: false, dashes: true }, 11)]
    #[case(SsnOptions { ssn_four: false, dashes: false }, 9)]
    fn generated_ssns_are_issuable(
        mut engine: Engine,
        #[case] options: SsnOptions,
        #[case] length: usize,
    ) {
        for _ in 0..500 {
            let value = ssn(&mut engine, options).expect("valid");
            assert_eq!(value.len(), length);
            assert!(ssn_check(&value), "{value} failed");
        }
    }

    #[rstest]
    fn last_four_is_a_padded_serial(mut engine: Engine) {
        let options = SsnOptions {
            ssn_four: true,
            dashes: true,
        };
        for _ in 0..100 {
            let value = ssn(&mut engine, options).expect("valid");
            assert_eq!(value.len(), 4);
            assert_ne!(value, "0000");
            assert!(value.bytes().all(|b| b.is_ascii_digit()));
        }
    }
}
