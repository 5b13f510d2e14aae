//! Character and string sampling from pools.

use rand::RngCore;
use serde::Deserialize;
use uuid::Uuid;

use super::collection::pickone;
use super::numeric::{IntegerRange, integer};
use crate::error::ChanceError;

/// Lowercase ASCII letters.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Uppercase ASCII letters.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// ASCII digits.
pub const DIGITS: &str = "0123456789";

/// Symbols included in the default character pool.
pub const SYMBOLS: &str = "!@#$%^&*()[]";

const CONSONANTS: &str = "bcdfghjklmnprstvwz";
const VOWELS: &str = "aeiou";
const SYLLABLE_LETTERS: &str = "bcdfghjklmnprstvwzaeiou";

const DEFAULT_STRING_LENGTH: IntegerRange = IntegerRange::new(5, 20);
const DEFAULT_SYLLABLE_LENGTH: IntegerRange = IntegerRange::new(2, 3);
const DEFAULT_SYLLABLE_COUNT: IntegerRange = IntegerRange::new(1, 3);

/// Letter casing restriction for generated characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Casing {
    /// Lowercase letters only.
    Lower,
    /// Uppercase letters only.
    Upper,
}

/// Options for [`character`].
///
/// An explicit `pool` wins over the class flags. With no pool and no flags
/// the pool is letters, digits and [`SYMBOLS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CharacterOptions {
    /// Explicit pool of candidate characters.
    pub pool: Option<String>,
    /// Include letters.
    pub alpha: bool,
    /// Include digits.
    pub numeric: bool,
    /// Include symbols.
    pub symbols: bool,
    /// Restrict letters to one case.
    pub casing: Option<Casing>,
}

impl CharacterOptions {
    /// Options drawing from exactly the characters of `pool`.
    #[must_use]
    pub fn from_pool(pool: &str) -> Self {
        Self {
            pool: Some(pool.to_owned()),
            ..Self::default()
        }
    }

    fn resolve_pool(&self) -> Result<Vec<char>, ChanceError> {
        if self.alpha && self.symbols {
            return Err(ChanceError::ConflictingOptions {
                first: "alpha",
                second: "symbols",
            });
        }
        if let Some(pool) = &self.pool {
            return if pool.is_empty() {
                Err(ChanceError::EmptyPool {
                    operation: "draw a character",
                })
            } else {
                Ok(pool.chars().collect())
            };
        }

        let letters = match self.casing {
            Some(Casing::Lower) => LOWERCASE.to_owned(),
            Some(Casing::Upper) => UPPERCASE.to_owned(),
            None => format!("{LOWERCASE}{UPPERCASE}"),
        };
        let mut pool = String::new();
        if self.alpha {
            pool.push_str(&letters);
        }
        if self.numeric {
            pool.push_str(DIGITS);
        }
        if self.symbols {
            pool.push_str(SYMBOLS);
        }
        if pool.is_empty() {
            pool = format!("{letters}{DIGITS}{SYMBOLS}");
        }
        Ok(pool.chars().collect())
    }
}

/// Options for [`string`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StringOptions {
    /// Number of characters; defaults to a draw from 5 to 20.
    pub length: Option<i64>,
    /// Pool selection shared with [`character`].
    #[serde(flatten)]
    pub characters: CharacterOptions,
}

/// Options for [`syllable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyllableOptions {
    /// Number of letters; defaults to 2 or 3.
    pub length: Option<usize>,
    /// Uppercase the first letter.
    pub capitalize: bool,
}

/// Options for [`word`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WordOptions {
    /// Number of syllables; defaults to 1 to 3.
    pub syllables: Option<usize>,
    /// Exact number of letters.
    pub length: Option<usize>,
    /// Uppercase the first letter.
    pub capitalize: bool,
}

/// Draws one character from the resolved pool.
///
/// # Errors
///
/// Returns [`ChanceError::EmptyPool`] for an empty explicit pool, or
/// [`ChanceError::ConflictingOptions`] when `alpha` and `symbols` are both
/// set.
pub fn character<R: RngCore + ?Sized>(
    rng: &mut R,
    options: &CharacterOptions,
) -> Result<char, ChanceError> {
    let pool = options.resolve_pool()?;
    pickone(rng, &pool).copied()
}

/// Draws `length` independent characters from the resolved pool.
///
/// # Errors
///
/// Returns [`ChanceError::NegativeLength`] for a negative length, or any
/// error [`character`] reports for the pool.
///
/// # Example
///
/// ```
/// use chancery::Engine;
/// use chancery::sampling::{CharacterOptions, StringOptions, string};
///
/// let mut engine = Engine::seeded(7_u32);
/// let options = StringOptions {
///     length: Some(6),
///     characters: CharacterOptions::from_pool("ab"),
/// };
/// let value = string(&mut engine, &options).expect("valid options");
///
/// assert_eq!(value.len(), 6);
/// assert!(value.chars().all(|c| c == 'a' || c == 'b'));
/// ```
pub fn string<R: RngCore + ?Sized>(
    rng: &mut R,
    options: &StringOptions,
) -> Result<String, ChanceError> {
    let length = match options.length {
        Some(length) if length < 0 => return Err(ChanceError::NegativeLength { length }),
        Some(length) => length,
        None => integer(rng, DEFAULT_STRING_LENGTH)?,
    };
    let pool = options.characters.resolve_pool()?;

    let mut out = String::new();
    for _ in 0..length {
        out.push(*pickone(rng, &pool)?);
    }
    Ok(out)
}

/// Builds a pronounceable syllable, alternating consonants and vowels.
///
/// # Errors
///
/// Propagates sampling errors; none occur with the built-in pools.
pub fn syllable<R: RngCore + ?Sized>(
    rng: &mut R,
    options: SyllableOptions,
) -> Result<String, ChanceError> {
    let length = match options.length {
        Some(length) => length,
        None => usize::try_from(integer(rng, DEFAULT_SYLLABLE_LENGTH)?).unwrap_or(2),
    };

    let mut text = String::with_capacity(length);
    let mut previous: Option<char> = None;
    for _ in 0..length {
        let pool = match previous {
            None => SYLLABLE_LETTERS,
            Some(c) if CONSONANTS.contains(c) => VOWELS,
            Some(_) => CONSONANTS,
        };
        let chars: Vec<char> = pool.chars().collect();
        let next = *pickone(rng, &chars)?;
        text.push(next);
        previous = Some(next);
    }

    Ok(if options.capitalize {
        capitalize(&text)
    } else {
        text
    })
}

/// Builds a word from syllables, or cut to an exact letter count.
///
/// # Errors
///
/// Returns [`ChanceError::ConflictingOptions`] when both `syllables` and
/// `length` are supplied.
pub fn word<R: RngCore + ?Sized>(rng: &mut R, options: WordOptions) -> Result<String, ChanceError> {
    let mut text = String::new();
    match (options.syllables, options.length) {
        (Some(_), Some(_)) => {
            return Err(ChanceError::ConflictingOptions {
                first: "syllables",
                second: "length",
            });
        }
        (None, Some(length)) => {
            while text.chars().count() < length {
                text.push_str(&syllable(rng, SyllableOptions::default())?);
            }
            text = text.chars().take(length).collect();
        }
        (syllables, None) => {
            let count = match syllables {
                Some(count) => count,
                None => usize::try_from(integer(rng, DEFAULT_SYLLABLE_COUNT)?).unwrap_or(1),
            };
            for _ in 0..count {
                text.push_str(&syllable(rng, SyllableOptions::default())?);
            }
        }
    }

    Ok(if options.capitalize {
        capitalize(&text)
    } else {
        text
    })
}

/// Returns a version 4 UUID built from engine bytes.
pub fn guid<R: RngCore + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

/// Uppercases the first character of `text`.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::engine::Engine;

    #[fixture]
    fn engine() -> Engine {
        Engine::seeded(2026_u32)
    }

    #[rstest]
    fn default_character_comes_from_default_pool(mut engine: Engine) {
        let pool = format!("{LOWERCASE}{UPPERCASE}{DIGITS}{SYMBOLS}");
        for _ in 0..500 {
            let c = character(&mut engine, &CharacterOptions::default()).expect("valid");
            assert!(pool.contains(c), "unexpected character {c}");
        }
    }

    #[rstest]
    fn casing_restricts_letters(mut engine: Engine) {
        let options = CharacterOptions {
            alpha: true,
            casing: Some(Casing::Upper),
            ..CharacterOptions::default()
        };
        for _ in 0..200 {
            let c = character(&mut engine, &options).expect("valid");
            assert!(c.is_ascii_uppercase(), "expected uppercase, got {c}");
        }
    }

    #[rstest]
    fn numeric_flag_yields_digits(mut engine: Engine) {
        let options = CharacterOptions {
            numeric: true,
            ..CharacterOptions::default()
        };
        for _ in 0..200 {
            assert!(character(&mut engine, &options).expect("valid").is_ascii_digit());
        }
    }

    #[rstest]
    fn alpha_with_symbols_conflicts(mut engine: Engine) {
        let options = CharacterOptions {
            alpha: true,
            symbols: true,
            ..CharacterOptions::default()
        };
        assert_eq!(
            character(&mut engine, &options),
            Err(ChanceError::ConflictingOptions {
                first: "alpha",
                second: "symbols"
            })
        );
    }

    #[rstest]
    fn empty_explicit_pool_is_rejected(mut engine: Engine) {
        let options = StringOptions {
            length: Some(3),
            characters: CharacterOptions::from_pool(""),
        };
        assert!(matches!(
            string(&mut engine, &options),
            Err(ChanceError::EmptyPool { .. })
        ));
    }

    #[rstest]
    fn negative_length_is_rejected(mut engine: Engine) {
        let options = StringOptions {
            length: Some(-1),
            ..StringOptions::default()
        };
        assert_eq!(
            string(&mut engine, &options),
            Err(ChanceError::NegativeLength { length: -1 })
        );
    }

    #[rstest]
    fn default_string_length_is_between_5_and_20(mut engine: Engine) {
        for _ in 0..200 {
            let value = string(&mut engine, &StringOptions::default()).expect("valid");
            assert!((5..=20).contains(&value.chars().count()));
        }
    }

    #[rstest]
    fn zero_length_string_is_empty(mut engine: Engine) {
        let options = StringOptions {
            length: Some(0),
            ..StringOptions::default()
        };
        assert_eq!(string(&mut engine, &options), Ok(String::new()));
    }

    #[rstest]
    fn syllables_alternate_consonants_and_vowels(mut engine: Engine) {
        for _ in 0..200 {
            let text = syllable(&mut engine, SyllableOptions::default()).expect("valid");
            let chars: Vec<char> = text.chars().collect();
            assert!((2..=3).contains(&chars.len()));
            for pair in chars.windows(2) {
                if let [first, second] = pair {
                    assert_ne!(
                        CONSONANTS.contains(*first),
                        CONSONANTS.contains(*second),
                        "letters did not alternate in {text}"
                    );
                }
            }
        }
    }

    #[rstest]
    #[case(1)]
    #[case(7)]
    #[case(12)]
    fn word_honours_exact_length(mut engine: Engine, #[case] length: usize) {
        let options = WordOptions {
            length: Some(length),
            ..WordOptions::default()
        };
        let text = word(&mut engine, options).expect("valid");
        assert_eq!(text.chars().count(), length);
    }

    #[rstest]
    fn word_rejects_syllables_with_length(mut engine: Engine) {
        let options = WordOptions {
            syllables: Some(2),
            length: Some(4),
            capitalize: false,
        };
        assert!(matches!(
            word(&mut engine, options),
            Err(ChanceError::ConflictingOptions { .. })
        ));
    }

    #[rstest]
    fn capitalized_word_starts_uppercase(mut engine: Engine) {
        let options = WordOptions {
            capitalize: true,
            ..WordOptions::default()
        };
        let text = word(&mut engine, options).expect("valid");
        assert!(text.chars().next().is_some_and(char::is_uppercase));
    }

    #[rstest]
    fn guid_is_version_4(mut engine: Engine) {
        let id = guid(&mut engine);
        assert_eq!(id.get_version_num(), 4);
    }

    #[test]
    fn guid_is_reproducible() {
        let mut first = Engine::seeded(1_u32);
        let mut second = Engine::seeded(1_u32);
        assert_eq!(guid(&mut first), guid(&mut second));
    }
}
