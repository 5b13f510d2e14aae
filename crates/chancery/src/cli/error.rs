//! Error types for the `chancery` command.

use std::path::PathBuf;

use thiserror::Error;

use crate::error::{ChanceError, TablesError};

/// Errors surfaced by argument parsing and generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CliError {
    /// The arguments did not parse.
    #[error("{message}")]
    Usage {
        /// Rendered parser diagnostic.
        message: String,
    },
    /// No generator was named and `--list` was not given.
    #[error("missing generator name; use --list to see the available generators")]
    MissingGenerator,
    /// `--options` was not a JSON document.
    #[error("invalid --options JSON: {message}")]
    InvalidOptionsJson {
        /// Parser error message.
        message: String,
    },
    /// The tables path is not valid UTF-8 or names no file.
    #[error("invalid tables path: {}", path.display())]
    InvalidTablesPath {
        /// Offending path.
        path: PathBuf,
    },
    /// The data tables could not be loaded.
    #[error("tables error: {source}")]
    Tables {
        /// Underlying tables error.
        #[from]
        #[source]
        source: TablesError,
    },
    /// A generator failed.
    #[error("generation failed: {source}")]
    Generation {
        /// Underlying generation error.
        #[from]
        #[source]
        source: ChanceError,
    },
}
