//! Personal name and gender generators.
//!
//! Name tables come from `fake`, drawn through the caller's random source
//! so a seeded engine yields the same people every run.

use std::fmt;

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::RngCore;
use serde::Deserialize;

use crate::engine::unit;

/// Binary gender used by identifier encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl Gender {
    /// Returns the lowercase name of the gender.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`name`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NameOptions {
    /// Insert a middle name between first and last.
    pub middle: bool,
}

/// Returns either gender with equal probability.
pub fn gender<R: RngCore + ?Sized>(rng: &mut R) -> Gender {
    if unit(rng) < 0.5 {
        Gender::Male
    } else {
        Gender::Female
    }
}

/// Returns a first name.
pub fn first<R: RngCore + ?Sized>(rng: &mut R) -> String {
    FirstName(EN).fake_with_rng(rng)
}

/// Returns a last name.
pub fn last<R: RngCore + ?Sized>(rng: &mut R) -> String {
    LastName(EN).fake_with_rng(rng)
}

/// Returns a full name.
///
/// # Example
///
/// ```
/// use chancery::{Engine, person::{NameOptions, name}};
///
/// let mut engine = Engine::seeded("people");
/// let full = name(&mut engine, NameOptions { middle: true });
///
/// assert_eq!(full.split(' ').count(), 3);
/// ```
pub fn name<R: RngCore + ?Sized>(rng: &mut R, options: NameOptions) -> String {
    let first_name = first(rng);
    let middle = options.middle.then(|| first(rng));
    let last_name = last(rng);
    match middle {
        Some(middle_name) => format!("{first_name} {middle_name} {last_name}"),
        None => format!("{first_name} {last_name}"),
    }
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
    fn names_are_deterministic_for_a_seed() {
        let mut left = Engine::seeded("names");
        let mut right = Engine::seeded("names");

        let a: Vec<String> = (0..5).map(|_| name(&mut left, NameOptions::default())).collect();
        let b: Vec<String> = (0..5).map(|_| name(&mut right, NameOptions::default())).collect();

        assert_eq!(a, b);
    }

    #[rstest]
    fn names_are_never_blank(mut engine: Engine) {
        for _ in 0..50 {
            assert!(!first(&mut engine).trim().is_empty());
            assert!(!last(&mut engine).trim().is_empty());
        }
    }

    #[rstest]
    fn gender_produces_both_values(mut engine: Engine) {
        let draws: Vec<Gender> = (0..200).map(|_| gender(&mut engine)).collect();
        assert!(draws.contains(&Gender::Male));
        assert!(draws.contains(&Gender::Female));
    }

    #[rstest]
    #[case(Gender::Male, "male")]
    #[case(Gender::Female, "female")]
    fn gender_displays_lowercase(#[case] value: Gender, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }
}
