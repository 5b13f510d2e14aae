//! Calendar generators.

use chrono::{Datelike, Days, Month, NaiveDate};
use rand::RngCore;
use serde::Deserialize;

use crate::error::ChanceError;
use crate::sampling::{IntegerRange, integer};

const DEFAULT_MIN_YEAR: i32 = 1900;
const DEFAULT_MAX_YEAR: i32 = 2100;

fn default_min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(DEFAULT_MIN_YEAR, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(DEFAULT_MAX_YEAR, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Inclusive bounds for [`date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateOptions {
    /// Earliest date that may be returned.
    pub min: NaiveDate,
    /// Latest date that may be returned.
    pub max: NaiveDate,
}

impl DateOptions {
    /// Creates inclusive date bounds.
    #[must_use]
    pub const fn new(min: NaiveDate, max: NaiveDate) -> Self {
        Self { min, max }
    }
}

impl Default for DateOptions {
    fn default() -> Self {
        Self::new(default_min_date(), default_max_date())
    }
}

/// Inclusive bounds for [`year`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YearOptions {
    /// Earliest year that may be returned.
    pub min: i32,
    /// Latest year that may be returned.
    pub max: i32,
}

impl Default for YearOptions {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_YEAR,
            max: DEFAULT_MAX_YEAR,
        }
    }
}

/// Returns a date uniformly drawn from the inclusive bounds.
///
/// # Errors
///
/// Returns [`ChanceError::InvalidDateRange`] when `min` is after `max`.
///
/// # Example
///
/// ```
/// use chancery::{Engine, time::{DateOptions, date}};
/// use chrono::NaiveDate;
///
/// let min = NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date");
/// let max = NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date");
/// let mut engine = Engine::seeded(7_u32);
///
/// let drawn = date(&mut engine, DateOptions::new(min, max)).expect("ordered bounds");
/// assert!(drawn >= min && drawn <= max);
/// ```
pub fn date<R: RngCore + ?Sized>(rng: &mut R, options: DateOptions) -> Result<NaiveDate, ChanceError> {
    let DateOptions { min, max } = options;
    let invalid = || ChanceError::InvalidDateRange { min, max };
    if min > max {
        return Err(invalid());
    }
    let span = (max - min).num_days();
    let offset = integer(rng, IntegerRange::new(0, span))?;
    let days = u64::try_from(offset).map_err(|_| invalid())?;
    min.checked_add_days(Days::new(days)).ok_or_else(invalid)
}

/// Returns a year drawn from the inclusive bounds.
///
/// # Errors
///
/// Returns [`ChanceError::MinGreaterThanMax`] when `min` exceeds `max`.
pub fn year<R: RngCore + ?Sized>(rng: &mut R, options: YearOptions) -> Result<i32, ChanceError> {
    let drawn = integer(
        rng,
        IntegerRange::new(i64::from(options.min), i64::from(options.max)),
    )?;
    Ok(i32::try_from(drawn).unwrap_or(options.min))
}

/// Returns a calendar month.
pub fn month<R: RngCore + ?Sized>(rng: &mut R) -> Month {
    let index = integer(rng, IntegerRange::new(1, 12)).unwrap_or(1);
    u8::try_from(index)
        .ok()
        .and_then(|value| Month::try_from(value).ok())
        .unwrap_or(Month::January)
}

/// Returns the two-digit year, month and day of `date`.
pub(crate) fn date_parts(date: NaiveDate) -> (u32, u32, u32) {
    (date.year().rem_euclid(100) as u32, date.month(), date.day())
}
