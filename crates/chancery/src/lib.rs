//! Seedable, reproducible fake data generation.
//!
//! Every value comes from a single deterministic engine: two instances
//! seeded alike and driven through the same calls produce identical output.
//! Generators range from bounded numbers and strings to identifiers whose
//! check digits validate (card numbers, IBANs and national ID numbers).
//!
//! # Overview
//!
//! The crate supports:
//!
//! - A seedable 32-bit engine implementing [`rand::RngCore`]
//! - Sampling primitives that take any random source as their first argument
//! - Checksum-valid identifiers with matching validators
//! - Swappable data tables loaded from JSON
//! - A name-keyed generator registry with runtime extension
//!
//! # Example
//!
//! ```
//! use chancery::{Chance, identifiers::CardOptions, luhn_check};
//! use chancery::sampling::IntegerRange;
//!
//! let mut first = Chance::seeded(42_u32);
//! let mut second = Chance::seeded(42_u32);
//!
//! let rolls: Vec<i64> = (0..3)
//!     .map(|_| first.integer(IntegerRange::new(1, 10)).expect("valid range"))
//!     .collect();
//! let replayed: Vec<i64> = (0..3)
//!     .map(|_| second.integer(IntegerRange::new(1, 10)).expect("valid range"))
//!     .collect();
//! assert_eq!(rolls, replayed);
//!
//! let card = first.cc(&CardOptions::default()).expect("built-in issuers");
//! assert!(luhn_check(&card));
//! ```

mod chance;
mod checksum;
pub mod cli;
pub mod config;
pub mod engine;
mod error;
pub mod file;
pub mod identifiers;
pub mod person;
mod registry;
pub mod sampling;
pub mod tables;
pub mod time;

pub use chance::Chance;
pub use checksum::{luhn_calculate, luhn_check};
pub use engine::{Engine, Seed};
pub use error::{ChanceError, ErrorKind, TablesError};
pub use registry::{Generator, GeneratorRegistry};
pub use tables::DataTables;
