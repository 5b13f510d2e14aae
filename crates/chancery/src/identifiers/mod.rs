//! Checksum-valid identifier generators.
//!
//! Every generator here builds a random body, derives its check digits and
//! confirms the result with the matching public validator before returning.
//! Bodies whose checksum is unissuable are regenerated, at most
//! [`MAX_CHECKSUM_ATTEMPTS`] times.

mod brazil;
mod iban;
mod israel;
mod italy;
mod payment;
mod poland;
mod united_states;

use rand::RngCore;
use tracing::debug;

use crate::error::ChanceError;

pub use brazil::{BrazilOptions, cnpj, cnpj_check, cpf, cpf_check};
pub use iban::{IbanOptions, iban, iban_check};
pub use israel::{israel_id, israel_id_check};
pub use italy::{CfOptions, cf, cf_check};
pub use payment::{CardOptions, CardTypeOptions, cc, cc_type};
pub use poland::{PeselOptions, pl_nip, pl_nip_check, pl_pesel, pl_pesel_check, pl_regon, pl_regon_check};
pub use united_states::{SsnOptions, ssn, ssn_check};

/// Bodies drawn before a generator reports that it cannot produce a valid
/// identifier.
pub const MAX_CHECKSUM_ATTEMPTS: usize = 100;

/// Runs `attempt` until it yields a value, giving up after
/// [`MAX_CHECKSUM_ATTEMPTS`] rejected bodies.
fn regenerate<R, T, F>(rng: &mut R, identifier: &'static str, mut attempt: F) -> Result<T, ChanceError>
where
    R: RngCore + ?Sized,
    F: FnMut(&mut R) -> Result<Option<T>, ChanceError>,
{
    for _ in 0..MAX_CHECKSUM_ATTEMPTS {
        if let Some(value) = attempt(rng)? {
            return Ok(value);
        }
    }

    debug!(
        identifier,
        attempts = MAX_CHECKSUM_ATTEMPTS,
        "checksum regeneration exhausted"
    );
    Err(ChanceError::ChecksumRetriesExhausted {
        identifier,
        attempts: MAX_CHECKSUM_ATTEMPTS,
    })
}

/// Returns `value` once `check` accepts it.
fn verified(
    identifier: &'static str,
    value: String,
    check: impl FnOnce(&str) -> bool,
) -> Result<String, ChanceError> {
    if check(&value) {
        Ok(value)
    } else {
        Err(ChanceError::ChecksumMismatch { identifier, value })
    }
}

/// Inserts each separator before the character at its index.
fn punctuate(raw: &str, separators: &[(usize, char)]) -> String {
    let mut formatted = String::with_capacity(raw.len() + separators.len());
    for (index, c) in raw.chars().enumerate() {
        if let Some((_, separator)) = separators.iter().find(|(at, _)| *at == index) {
            formatted.push(*separator);
        }
        formatted.push(c);
    }
    formatted
}

/// Strips the separators used by formatted identifiers.
fn strip_separators(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | '/' | ' '))
        .collect()
}
