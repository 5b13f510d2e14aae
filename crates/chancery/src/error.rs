//! Error types for the chancery crate.
//!
//! This module defines semantic error enums for generation and data table
//! loading, following the project's error handling conventions with
//! `thiserror`. Generation failures are further classified by
//! [`ErrorKind`] so callers can tell an impossible request (range) from a
//! malformed one (type).

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use thiserror::Error;

/// Broad classification of a [`ChanceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An input constraint makes a valid result impossible to construct.
    Range,
    /// Structural input has the wrong shape.
    Type,
    /// Invalid state not covered by the other kinds.
    Generic,
}

/// Errors that can occur while generating values.
///
/// Every variant names the violated constraint and, where one exists, the
/// set of legal values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChanceError {
    /// Integer bounds were supplied in the wrong order.
    #[error("min ({min}) cannot be greater than max ({max})")]
    MinGreaterThanMax {
        /// Requested lower bound.
        min: i64,
        /// Requested upper bound.
        max: i64,
    },

    /// Floating point bounds were supplied in the wrong order.
    #[error("min ({min}) cannot be greater than max ({max})")]
    FloatMinGreaterThanMax {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },

    /// A natural number was requested with a negative lower bound.
    #[error("natural min ({min}) cannot be negative")]
    NegativeMinimum {
        /// Requested lower bound.
        min: i64,
    },

    /// The decimal precision is outside the supported range.
    #[error("fixed ({fixed}) must be between 0 and {max_fixed}")]
    FixedOutOfRange {
        /// Requested number of decimal places.
        fixed: i32,
        /// Largest supported number of decimal places.
        max_fixed: i32,
    },

    /// A bound cannot be represented once scaled by the decimal precision.
    #[error("bound ({bound}) is out of range with fixed {fixed}")]
    ScaledRangeOverflow {
        /// Offending bound.
        bound: f64,
        /// Requested number of decimal places.
        fixed: i32,
    },

    /// No representable value lies between the bounds at this precision.
    #[error("no value with {fixed} decimal places lies between {min} and {max}")]
    EmptyScaledRange {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
        /// Requested number of decimal places.
        fixed: i32,
    },

    /// A boolean likelihood fell outside the percentage range.
    #[error("likelihood ({likelihood}) must be between 0 and 100")]
    LikelihoodOutOfRange {
        /// Requested likelihood.
        likelihood: f64,
    },

    /// A length was negative.
    #[error("length ({length}) cannot be less than zero")]
    NegativeLength {
        /// Requested length.
        length: i64,
    },

    /// Sampling was attempted from an empty pool.
    #[error("cannot {operation} from an empty pool")]
    EmptyPool {
        /// Operation that required a non-empty pool.
        operation: &'static str,
    },

    /// More distinct elements were requested than the pool holds.
    #[error("count ({count}) exceeds the pool size ({available})")]
    CountExceedsPool {
        /// Requested number of elements.
        count: usize,
        /// Number of elements in the pool.
        available: usize,
    },

    /// The weights do not line up with the pool.
    #[error("length of pool ({pool}) and weights ({weights}) must match")]
    WeightsLengthMismatch {
        /// Number of pool entries.
        pool: usize,
        /// Number of weights.
        weights: usize,
    },

    /// A weight was negative or not finite.
    #[error("weight at index {index} ({weight}) must be a finite, non-negative number")]
    InvalidWeight {
        /// Index of the offending weight.
        index: usize,
        /// Offending weight.
        weight: f64,
    },

    /// Every weight was zero.
    #[error("weights must contain at least one positive entry")]
    NoPositiveWeights,

    /// `unique` ran out of attempts before collecting enough values.
    #[error(
        "count ({requested}) is likely too large for the sample set: \
         {collected} unique values found before {max_duplicates} consecutive duplicates"
    )]
    UniqueExhausted {
        /// Number of unique values requested.
        requested: usize,
        /// Number of unique values collected before giving up.
        collected: usize,
        /// Consecutive duplicate budget that was exhausted.
        max_duplicates: usize,
    },

    /// `normal_pool` kept landing outside the pool.
    #[error(
        "pool of {pool_size} is too small for the given mean and standard deviation \
         after {attempts} attempts"
    )]
    NormalPoolExhausted {
        /// Number of draws made.
        attempts: usize,
        /// Number of pool entries.
        pool_size: usize,
    },

    /// A distribution parameter was NaN or infinite.
    #[error("{name} ({value}) must be a finite number")]
    NonFiniteParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Two mutually exclusive options were supplied together.
    #[error("cannot specify both {first} and {second}")]
    ConflictingOptions {
        /// First option name.
        first: &'static str,
        /// Second option name.
        second: &'static str,
    },

    /// A file category is not present in the extension table.
    #[error("unknown file type '{category}'; expected one of: {}", .permitted.join(", "))]
    UnknownFileCategory {
        /// Requested category.
        category: String,
        /// Categories known to the extension table.
        permitted: Vec<String>,
    },

    /// A credit card type is not present in the card table.
    #[error("credit card type '{name}' is not supported; expected one of: {}", .permitted.join(", "))]
    UnsupportedCardType {
        /// Requested card name.
        name: String,
        /// Short names known to the card table.
        permitted: Vec<String>,
    },

    /// An IBAN country is not present in the IBAN format table.
    #[error("IBAN country '{country}' is not supported; expected one of: {}", .permitted.join(", "))]
    UnsupportedIbanCountry {
        /// Requested country code.
        country: String,
        /// Country codes known to the format table.
        permitted: Vec<String>,
    },

    /// Date bounds were supplied in the wrong order.
    #[error("min date ({min}) cannot be after max date ({max})")]
    InvalidDateRange {
        /// Requested lower bound.
        min: NaiveDate,
        /// Requested upper bound.
        max: NaiveDate,
    },

    /// A checksum-bearing identifier kept landing on an unissuable value.
    #[error("failed to generate a valid {identifier} after {attempts} attempts")]
    ChecksumRetriesExhausted {
        /// Identifier being generated.
        identifier: &'static str,
        /// Number of attempts made.
        attempts: usize,
    },

    /// A generated identifier failed its own checksum.
    #[error("generated {identifier} '{value}' failed checksum verification")]
    ChecksumMismatch {
        /// Identifier being generated.
        identifier: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The extension pool was neither a list nor a keyed object of lists.
    #[error("extensions must be an array of strings or an object of string arrays")]
    InvalidExtensions,

    /// A numeric string contained something other than ASCII digits.
    #[error("'{input}' must contain only ASCII digits")]
    InvalidDigits {
        /// Offending input.
        input: String,
    },

    /// Options supplied to a named generator could not be decoded.
    #[error("invalid options for '{generator}': {message}")]
    InvalidOptions {
        /// Generator name.
        generator: String,
        /// Decoder message.
        message: String,
    },

    /// No generator is registered under the requested name.
    #[error("no generator named '{name}' is registered")]
    UnknownGenerator {
        /// Requested generator name.
        name: String,
    },

    /// A generated value could not be encoded as JSON.
    #[error("failed to encode generated value: {message}")]
    Serialization {
        /// Encoder message.
        message: String,
    },
}

impl ChanceError {
    /// Returns the broad classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MinGreaterThanMax { .. }
            | Self::FloatMinGreaterThanMax { .. }
            | Self::NegativeMinimum { .. }
            | Self::FixedOutOfRange { .. }
            | Self::ScaledRangeOverflow { .. }
            | Self::EmptyScaledRange { .. }
            | Self::LikelihoodOutOfRange { .. }
            | Self::NegativeLength { .. }
            | Self::EmptyPool { .. }
            | Self::CountExceedsPool { .. }
            | Self::WeightsLengthMismatch { .. }
            | Self::InvalidWeight { .. }
            | Self::NoPositiveWeights
            | Self::UniqueExhausted { .. }
            | Self::NormalPoolExhausted { .. }
            | Self::NonFiniteParameter { .. }
            | Self::ConflictingOptions { .. }
            | Self::UnknownFileCategory { .. }
            | Self::UnsupportedCardType { .. }
            | Self::UnsupportedIbanCountry { .. }
            | Self::InvalidDateRange { .. }
            | Self::ChecksumRetriesExhausted { .. } => ErrorKind::Range,
            Self::InvalidExtensions | Self::InvalidDigits { .. } | Self::InvalidOptions { .. } => {
                ErrorKind::Type
            }
            Self::ChecksumMismatch { .. }
            | Self::UnknownGenerator { .. }
            | Self::Serialization { .. } => ErrorKind::Generic,
        }
    }
}

/// Errors that can occur when parsing or validating data tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TablesError {
    /// The tables file could not be read.
    #[error("failed to read tables file at '{path}': {message}")]
    IoError {
        /// Path to the tables file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The tables JSON is malformed or missing required fields.
    #[error("invalid tables JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The tables version is not supported.
    #[error("unsupported tables version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the document.
        actual: u32,
    },

    /// The document lists no credit card types.
    #[error("tables contain no credit card types")]
    EmptyCardTypes,

    /// A card prefix is empty or not numeric.
    #[error("credit card type '{name}' has an invalid prefix '{prefix}'")]
    InvalidCardPrefix {
        /// Card short name.
        name: String,
        /// Offending prefix.
        prefix: String,
    },

    /// A card length leaves no room for a body and a check digit.
    #[error("credit card type '{name}' has length {length}, too short for prefix '{prefix}'")]
    CardLengthTooShort {
        /// Card short name.
        name: String,
        /// Declared total length.
        length: usize,
        /// Declared prefix.
        prefix: String,
    },

    /// The document lists no file categories.
    #[error("tables contain no file extension categories")]
    EmptyFileCategories,

    /// A file category has no extensions.
    #[error("file category '{category}' has no extensions")]
    EmptyFileCategory {
        /// Category name.
        category: String,
    },

    /// A file category appears twice.
    #[error("file category '{category}' is declared more than once")]
    DuplicateFileCategory {
        /// Category name.
        category: String,
    },

    /// The document lists no IBAN formats.
    #[error("tables contain no IBAN formats")]
    EmptyIbanFormats,

    /// An IBAN country code or BBAN pattern is malformed.
    #[error("IBAN format for '{country}' has an invalid pattern '{pattern}'")]
    InvalidIbanFormat {
        /// Country code.
        country: String,
        /// Offending BBAN pattern.
        pattern: String,
    },
}
