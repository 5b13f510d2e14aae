//! Generic sampling primitives.
//!
//! Every primitive takes the random source as its first argument, so any
//! [`rand::RngCore`] (normally an [`crate::Engine`]) can drive it and tests
//! can substitute a scripted source. None of them hold state of their own.

mod collection;
mod normal;
mod numeric;
mod text;

pub use collection::{
    DUPLICATE_FACTOR, MAX_DUPLICATES, n, pick, pickone, pickset, shuffle, shuffle_in_place,
    unique, unique_by, weighted,
};
pub use normal::{NORMAL_POOL_ATTEMPTS, NormalOptions, normal, normal_pool};
pub use numeric::{
    BoolOptions, DEFAULT_FIXED, FloatOptions, IntegerRange, MAX_FIXED, MAX_SAFE_INTEGER,
    NaturalRange, boolean, floating, integer, natural, pad, random,
};
pub use text::{
    Casing, CharacterOptions, DIGITS, LOWERCASE, StringOptions, SYMBOLS, SyllableOptions,
    UPPERCASE, WordOptions, capitalize, character, guid, string, syllable, word,
};
