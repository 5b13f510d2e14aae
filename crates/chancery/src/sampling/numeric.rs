//! Bounded numeric sampling.

use rand::RngCore;
use serde::Deserialize;

use crate::engine::unit;
use crate::error::ChanceError;

/// Largest integer magnitude every `f64` can represent exactly.
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Default number of decimal places for [`floating`].
pub const DEFAULT_FIXED: i32 = 4;

/// Largest supported number of decimal places for [`floating`].
pub const MAX_FIXED: i32 = 15;

/// Default magnitude bound for [`floating`], leaving room for four
/// decimal places below [`MAX_SAFE_INTEGER`].
const DEFAULT_FLOAT_BOUND: f64 = 900_719_925_474.0;

/// Inclusive integer bounds.
///
/// # Example
///
/// ```
/// use chancery::{Engine, sampling::{IntegerRange, integer}};
///
/// let mut engine = Engine::seeded(42_u32);
/// let value = integer(&mut engine, IntegerRange::new(1, 10)).expect("valid range");
///
/// assert!((1..=10).contains(&value));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntegerRange {
    /// Smallest value that may be returned.
    pub min: i64,
    /// Largest value that may be returned.
    pub max: i64,
}

impl IntegerRange {
    /// Creates an inclusive range.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

impl Default for IntegerRange {
    fn default() -> Self {
        Self::new(-MAX_SAFE_INTEGER, MAX_SAFE_INTEGER)
    }
}

/// Inclusive bounds for [`natural`]; the minimum defaults to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NaturalRange {
    /// Smallest value that may be returned; must not be negative.
    pub min: i64,
    /// Largest value that may be returned.
    pub max: i64,
}

impl NaturalRange {
    /// Creates an inclusive range.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

impl Default for NaturalRange {
    fn default() -> Self {
        Self::new(0, MAX_SAFE_INTEGER)
    }
}

/// Options for [`floating`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FloatOptions {
    /// Smallest value that may be returned.
    pub min: f64,
    /// Largest value that may be returned.
    pub max: f64,
    /// Number of decimal places kept.
    pub fixed: i32,
}

impl Default for FloatOptions {
    fn default() -> Self {
        Self {
            min: -DEFAULT_FLOAT_BOUND,
            max: DEFAULT_FLOAT_BOUND,
            fixed: DEFAULT_FIXED,
        }
    }
}

/// Options for [`boolean`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoolOptions {
    /// Percentage chance of returning `true`.
    pub likelihood: f64,
}

impl Default for BoolOptions {
    fn default() -> Self {
        Self { likelihood: 50.0 }
    }
}

/// Returns a uniform double in `[0, 1)`.
pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    unit(rng)
}

/// Returns `true` with the configured percentage likelihood.
///
/// # Errors
///
/// Returns [`ChanceError::LikelihoodOutOfRange`] unless the likelihood is
/// between 0 and 100.
pub fn boolean<R: RngCore + ?Sized>(rng: &mut R, options: BoolOptions) -> Result<bool, ChanceError> {
    let likelihood = options.likelihood;
    if !(0.0..=100.0).contains(&likelihood) {
        return Err(ChanceError::LikelihoodOutOfRange { likelihood });
    }
    Ok(unit(rng) * 100.0 < likelihood)
}

/// Returns `min + floor(u * (max - min + 1))` for a uniform `u`.
///
/// # Errors
///
/// Returns [`ChanceError::MinGreaterThanMax`] when the bounds are reversed.
pub fn integer<R: RngCore + ?Sized>(rng: &mut R, range: IntegerRange) -> Result<i64, ChanceError> {
    let IntegerRange { min, max } = range;
    if min > max {
        return Err(ChanceError::MinGreaterThanMax { min, max });
    }

    let span = i128::from(max) - i128::from(min) + 1;
    // The product can round up to `span` itself for very wide ranges.
    let offset = ((unit(rng) * span as f64).floor() as i128).min(span - 1);
    Ok(i64::try_from(i128::from(min) + offset).unwrap_or(max))
}

/// Like [`integer`], restricted to non-negative values.
///
/// # Errors
///
/// Returns [`ChanceError::NegativeMinimum`] for a negative minimum, or
/// [`ChanceError::MinGreaterThanMax`] when the bounds are reversed.
pub fn natural<R: RngCore + ?Sized>(rng: &mut R, range: NaturalRange) -> Result<i64, ChanceError> {
    if range.min < 0 {
        return Err(ChanceError::NegativeMinimum { min: range.min });
    }
    integer(rng, IntegerRange::new(range.min, range.max))
}

/// Returns a value in `[min, max]` with exactly `fixed` decimal places.
///
/// An integer is drawn over the range scaled by `10^fixed` and divided back
/// down, so every representable value is equally likely.
///
/// # Errors
///
/// Returns a range error when `fixed` is outside `0..=15`, a bound is not
/// finite, the bounds are reversed, or the scaled bounds do not fit the
/// safe integer range.
pub fn floating<R: RngCore + ?Sized>(rng: &mut R, options: FloatOptions) -> Result<f64, ChanceError> {
    let FloatOptions { min, max, fixed } = options;
    if !(0..=MAX_FIXED).contains(&fixed) {
        return Err(ChanceError::FixedOutOfRange {
            fixed,
            max_fixed: MAX_FIXED,
        });
    }
    ensure_finite("min", min)?;
    ensure_finite("max", max)?;
    if min > max {
        return Err(ChanceError::FloatMinGreaterThanMax { min, max });
    }

    let scale = 10_f64.powi(fixed);
    let low = (min * scale).ceil();
    let high = (max * scale).floor();
    let limit = MAX_SAFE_INTEGER as f64;
    if low.abs() > limit {
        return Err(ChanceError::ScaledRangeOverflow { bound: min, fixed });
    }
    if high.abs() > limit {
        return Err(ChanceError::ScaledRangeOverflow { bound: max, fixed });
    }
    if low > high {
        return Err(ChanceError::EmptyScaledRange { min, max, fixed });
    }

    let scaled = integer(rng, IntegerRange::new(low as i64, high as i64))?;
    Ok(scaled as f64 / scale)
}

/// Left-pads the decimal form of `number` to `width` with `fill`.
///
/// The sign stays in front of the padding.
///
/// # Example
///
/// ```
/// use chancery::sampling::pad;
///
/// assert_eq!(pad(42, 5, '0'), "00042");
/// assert_eq!(pad(-7, 3, '0'), "-07");
/// assert_eq!(pad(12345, 3, '0'), "12345");
/// ```
#[must_use]
pub fn pad(number: i64, width: usize, fill: char) -> String {
    let digits = number.unsigned_abs().to_string();
    let sign = if number < 0 { "-" } else { "" };
    let padding = width
        .saturating_sub(sign.len())
        .saturating_sub(digits.len());
    let mut out = String::with_capacity(width.max(sign.len() + digits.len()));
    out.push_str(sign);
    out.extend(std::iter::repeat_n(fill, padding));
    out.push_str(&digits);
    out
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<(), ChanceError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ChanceError::NonFiniteParameter { name, value })
    }
}
