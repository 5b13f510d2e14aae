//! Selection, permutation and repetition over pools.
//!
//! Every function here samples an index from the engine and never the value
//! itself, so the output depends only on the seed and the pool order.

use rand::RngCore;
use tracing::debug;

use crate::engine::unit;
use crate::error::ChanceError;

/// Consecutive duplicates allowed per requested value in [`unique`].
pub const DUPLICATE_FACTOR: usize = 50;

/// Ceiling on the consecutive duplicates [`unique`] tolerates, whatever
/// the requested count.
pub const MAX_DUPLICATES: usize = 1_000_000;

/// Draws an index in `0..=last` using the same floor mapping as `integer`.
fn index_upto<R: RngCore + ?Sized>(rng: &mut R, last: usize) -> usize {
    let span = last as f64 + 1.0;
    ((unit(rng) * span).floor() as usize).min(last)
}

/// Selects one element uniformly.
///
/// # Errors
///
/// Returns [`ChanceError::EmptyPool`] when the pool is empty.
///
/// # Example
///
/// ```
/// use chancery::{Engine, sampling::pickone};
///
/// let mut engine = Engine::seeded(3_u32);
/// let pool = ["red", "green", "blue"];
/// let colour = pickone(&mut engine, &pool).expect("non-empty pool");
///
/// assert!(pool.contains(colour));
/// ```
pub fn pickone<'a, R, T>(rng: &mut R, pool: &'a [T]) -> Result<&'a T, ChanceError>
where
    R: RngCore + ?Sized,
{
    let last = pool
        .len()
        .checked_sub(1)
        .ok_or(ChanceError::EmptyPool {
            operation: "pick one",
        })?;
    pool.get(index_upto(rng, last)).ok_or(ChanceError::EmptyPool {
        operation: "pick one",
    })
}

/// Selects `count` distinct positions of the pool, without replacement.
///
/// # Errors
///
/// Returns [`ChanceError::CountExceedsPool`] when `count` is larger than
/// the pool.
pub fn pickset<R, T>(rng: &mut R, pool: &[T], count: usize) -> Result<Vec<T>, ChanceError>
where
    R: RngCore + ?Sized,
    T: Clone,
{
    if count > pool.len() {
        return Err(ChanceError::CountExceedsPool {
            count,
            available: pool.len(),
        });
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut shuffled = shuffle(rng, pool);
    shuffled.truncate(count);
    Ok(shuffled)
}

/// Selects one element when `count` is 1, otherwise defers to [`pickset`].
///
/// # Errors
///
/// Returns [`ChanceError::EmptyPool`] for an empty pool, or the errors of
/// [`pickset`].
pub fn pick<R, T>(rng: &mut R, pool: &[T], count: usize) -> Result<Vec<T>, ChanceError>
where
    R: RngCore + ?Sized,
    T: Clone,
{
    if pool.is_empty() {
        return Err(ChanceError::EmptyPool { operation: "pick" });
    }
    if count == 1 {
        return pickone(rng, pool).map(|value| vec![value.clone()]);
    }
    pickset(rng, pool, count)
}

/// Fisher-Yates shuffle: walking down from the last index, swap each slot
/// with a uniformly drawn slot at or below it.
pub fn shuffle_in_place<R, T>(rng: &mut R, items: &mut [T])
where
    R: RngCore + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = index_upto(rng, i);
        items.swap(i, j);
    }
}

/// Returns a shuffled copy of the pool.
pub fn shuffle<R, T>(rng: &mut R, pool: &[T]) -> Vec<T>
where
    R: RngCore + ?Sized,
    T: Clone,
{
    let mut items = pool.to_vec();
    shuffle_in_place(rng, &mut items);
    items
}

/// Selects one element with probability proportional to its weight.
///
/// Zero weights are allowed and never selected.
///
/// # Errors
///
/// Returns a range error when the lengths differ, the pool is empty, a
/// weight is negative or not finite, or no weight is positive.
pub fn weighted<'a, R, T>(
    rng: &mut R,
    pool: &'a [T],
    weights: &[f64],
) -> Result<&'a T, ChanceError>
where
    R: RngCore + ?Sized,
{
    if pool.len() != weights.len() {
        return Err(ChanceError::WeightsLengthMismatch {
            pool: pool.len(),
            weights: weights.len(),
        });
    }
    if pool.is_empty() {
        return Err(ChanceError::EmptyPool {
            operation: "pick a weighted entry",
        });
    }
    if let Some((index, weight)) = weights
        .iter()
        .enumerate()
        .find(|(_, weight)| !weight.is_finite() || **weight < 0.0)
    {
        return Err(ChanceError::InvalidWeight {
            index,
            weight: *weight,
        });
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(ChanceError::NoPositiveWeights);
    }

    let target = unit(rng) * total;
    let mut cumulative = 0.0;
    let mut chosen = None;
    for (item, weight) in pool.iter().zip(weights) {
        if *weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        chosen = Some(item);
        if target < cumulative {
            break;
        }
    }
    chosen.ok_or(ChanceError::NoPositiveWeights)
}

/// Collects `count` distinct values from repeated calls to `generate`.
///
/// # Errors
///
/// Returns [`ChanceError::UniqueExhausted`] once `count * 50` consecutive
/// duplicates (at most [`MAX_DUPLICATES`]) have been drawn, and propagates
/// errors from `generate`.
pub fn unique<R, T, F>(rng: &mut R, count: usize, generate: F) -> Result<Vec<T>, ChanceError>
where
    R: RngCore + ?Sized,
    T: PartialEq,
    F: FnMut(&mut R) -> Result<T, ChanceError>,
{
    unique_by(rng, count, generate, |existing, candidate| {
        existing.contains(candidate)
    })
}

/// Like [`unique`], with a caller-supplied duplicate test.
///
/// `is_duplicate` receives the values collected so far and the candidate.
///
/// # Errors
///
/// See [`unique`].
pub fn unique_by<R, T, F, C>(
    rng: &mut R,
    count: usize,
    mut generate: F,
    mut is_duplicate: C,
) -> Result<Vec<T>, ChanceError>
where
    R: RngCore + ?Sized,
    F: FnMut(&mut R) -> Result<T, ChanceError>,
    C: FnMut(&[T], &T) -> bool,
{
    let max_duplicates = count.saturating_mul(DUPLICATE_FACTOR).min(MAX_DUPLICATES);
    let mut values = Vec::new();
    let mut duplicates = 0_usize;

    while values.len() < count {
        let candidate = generate(rng)?;
        if is_duplicate(&values, &candidate) {
            duplicates += 1;
            if duplicates > max_duplicates {
                debug!(
                    requested = count,
                    collected = values.len(),
                    max_duplicates,
                    "unique sampling exhausted"
                );
                return Err(ChanceError::UniqueExhausted {
                    requested: count,
                    collected: values.len(),
                    max_duplicates,
                });
            }
        } else {
            values.push(candidate);
            duplicates = 0;
        }
    }

    Ok(values)
}

/// Calls `generate` `count` times and collects the results.
///
/// # Errors
///
/// Propagates the first error from `generate`.
pub fn n<R, T, F>(rng: &mut R, count: usize, mut generate: F) -> Result<Vec<T>, ChanceError>
where
    R: RngCore + ?Sized,
    F: FnMut(&mut R) -> Result<T, ChanceError>,
{
    (0..count).map(|_| generate(rng)).collect()
}
