//! Normally distributed sampling.

use rand::RngCore;
use serde::Deserialize;
use tracing::debug;

use super::numeric::ensure_finite;
use crate::engine::unit;
use crate::error::ChanceError;

/// Draws allowed before [`normal_pool`] gives up.
pub const NORMAL_POOL_ATTEMPTS: usize = 100;

/// Parameters of a normal distribution.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalOptions {
    /// Distribution mean.
    pub mean: f64,
    /// Standard deviation.
    pub dev: f64,
}

impl NormalOptions {
    /// Creates options for the given mean and standard deviation.
    #[must_use]
    pub const fn new(mean: f64, dev: f64) -> Self {
        Self { mean, dev }
    }

    fn validate(self) -> Result<Self, ChanceError> {
        ensure_finite("mean", self.mean)?;
        ensure_finite("dev", self.dev)?;
        Ok(self)
    }
}

impl Default for NormalOptions {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Returns a normal deviate using the Marsaglia polar method.
///
/// # Errors
///
/// Returns [`ChanceError::NonFiniteParameter`] when `mean` or `dev` is NaN
/// or infinite.
pub fn normal<R: RngCore + ?Sized>(rng: &mut R, options: NormalOptions) -> Result<f64, ChanceError> {
    let NormalOptions { mean, dev } = options.validate()?;
    Ok(dev.mul_add(standard_normal(rng), mean))
}

/// Maps a rounded normal deviate onto a pool index.
///
/// Draws landing outside the pool are retried up to
/// [`NORMAL_POOL_ATTEMPTS`] times.
///
/// # Errors
///
/// Returns [`ChanceError::NormalPoolExhausted`] when every draw misses the
/// pool, which is guaranteed for an empty pool.
///
/// # Example
///
/// ```
/// use chancery::{Engine, sampling::{NormalOptions, normal_pool}};
///
/// let mut engine = Engine::seeded(42_u32);
/// let pool = ["low", "middle", "high"];
/// let value = normal_pool(&mut engine, NormalOptions::new(1.0, 0.5), &pool)
///     .expect("pool covers the distribution");
///
/// assert!(pool.contains(value));
/// ```
pub fn normal_pool<'a, R, T>(
    rng: &mut R,
    options: NormalOptions,
    pool: &'a [T],
) -> Result<&'a T, ChanceError>
where
    R: RngCore + ?Sized,
{
    let validated = options.validate()?;
    let upper = pool.len() as f64;
    for _ in 0..NORMAL_POOL_ATTEMPTS {
        let index = normal(rng, validated)?.round();
        if index >= 0.0 && index < upper {
            if let Some(value) = pool.get(index as usize) {
                return Ok(value);
            }
        }
    }

    debug!(
        attempts = NORMAL_POOL_ATTEMPTS,
        pool_size = pool.len(),
        "normal pool sampling exhausted"
    );
    Err(ChanceError::NormalPoolExhausted {
        attempts: NORMAL_POOL_ATTEMPTS,
        pool_size: pool.len(),
    })
}

/// Rejection loop of the polar method: draw `u, v` in `(-1, 1)` until the
/// point falls strictly inside the unit circle, excluding the origin.
fn standard_normal<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u = unit(rng).mul_add(2.0, -1.0);
        let v = unit(rng).mul_add(2.0, -1.0);
        let s = u.mul_add(u, v * v);
        if s > 0.0 && s < 1.0 {
            return u * (-2.0 * s.ln() / s).sqrt();
        }
    }
}
