//! Command-line surface for invoking generators by name.
//!
//! The binary delegates to [`parse_args`] and [`run`] so both can be
//! exercised in tests without spawning a process.

mod error;

#[cfg(test)]
mod tests;

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use serde_json::Value;
use tracing::info;

pub use error::CliError;

use crate::chance::Chance;
use crate::config::ChancerySettings;
use crate::engine::Seed;
use crate::error::TablesError;
use crate::registry::GeneratorRegistry;
use crate::tables::DataTables;

/// `chancery` command arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(
    name = "chancery",
    about = "Generate reproducible fake data, one JSON value per line",
    version
)]
pub struct CliArgs {
    /// Generator to invoke, for example `integer`, `cc` or `pl_nip`.
    pub generator: Option<String>,
    /// Seed for reproducible output; numeric strings are numeric seeds.
    #[arg(long, value_name = "seed")]
    pub seed: Option<String>,
    /// Number of values to generate.
    #[arg(long, value_name = "n")]
    pub count: Option<usize>,
    /// Generator options as a JSON object.
    #[arg(long, value_name = "json")]
    pub options: Option<String>,
    /// JSON data tables replacing the built-in ones.
    #[arg(long = "tables", value_name = "path")]
    pub tables_path: Option<PathBuf>,
    /// List the available generators and exit.
    #[arg(long)]
    pub list: bool,
}

/// Outcome of parsing command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Print this text (help or version) and exit successfully.
    Info(String),
    /// Run with the parsed arguments.
    Args(CliArgs),
}

/// Parses arguments, program name first.
///
/// # Errors
///
/// Returns [`CliError::Usage`] with the rendered diagnostic when the
/// arguments do not parse.
///
/// # Example
///
/// ```
/// use chancery::cli::{ParseOutcome, parse_args};
///
/// let outcome = parse_args(["chancery", "integer", "--seed", "42"]).expect("parse");
/// let ParseOutcome::Args(args) = outcome else {
///     panic!("expected arguments");
/// };
/// assert_eq!(args.generator.as_deref(), Some("integer"));
/// assert_eq!(args.seed.as_deref(), Some("42"));
/// ```
pub fn parse_args<I, T>(args: I) -> Result<ParseOutcome, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match CliArgs::try_parse_from(args) {
        Ok(parsed) => Ok(ParseOutcome::Args(parsed)),
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                Ok(ParseOutcome::Info(err.to_string()))
            }
            _ => Err(CliError::Usage {
                message: err.to_string(),
            }),
        },
    }
}

/// Runs one invocation and returns the output lines.
///
/// Flags take precedence over `settings`. With `--list` the lines are the
/// generator names; otherwise each line is one generated JSON value.
///
/// # Errors
///
/// Returns [`CliError`] when no generator is named, the options or tables
/// cannot be read, or generation fails.
///
/// # Example
///
/// ```
/// use chancery::cli::{CliArgs, run};
/// use chancery::config::ChancerySettings;
///
/// let args = CliArgs {
///     generator: Some("integer".to_owned()),
///     seed: Some("42".to_owned()),
///     count: Some(3),
///     options: Some(r#"{"min": 1, "max": 10}"#.to_owned()),
///     ..CliArgs::default()
/// };
///
/// let first = run(&args, &ChancerySettings::default()).expect("run");
/// let second = run(&args, &ChancerySettings::default()).expect("run");
/// assert_eq!(first.len(), 3);
/// assert_eq!(first, second);
/// ```
pub fn run(args: &CliArgs, settings: &ChancerySettings) -> Result<Vec<String>, CliError> {
    if args.list {
        return Ok(GeneratorRegistry::with_builtins()
            .names()
            .map(str::to_owned)
            .collect());
    }

    let generator = args.generator.as_deref().ok_or(CliError::MissingGenerator)?;
    let options = parse_options(args.options.as_deref())?;
    let seed = args.seed.as_deref().map(Seed::parse).or_else(|| settings.seed());
    let count = args.count.unwrap_or_else(|| settings.count());

    let mut chance = Chance::new(seed);
    if let Some(path) = args.tables_path.as_ref().or(settings.tables_path.as_ref()) {
        let tables = load_tables(path)?;
        chance = chance.with_tables(Arc::new(tables));
    }

    info!(generator, count, seed = chance.seed(), "generating values");
    let lines = (0..count)
        .map(|_| chance.call(generator, &options).map(|value| value.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines)
}

fn parse_options(raw: Option<&str>) -> Result<Value, CliError> {
    raw.map_or(Ok(Value::Null), |json| {
        serde_json::from_str(json).map_err(|err| CliError::InvalidOptionsJson {
            message: err.to_string(),
        })
    })
}

/// Loads tables from `path` through a capability on its parent directory.
fn load_tables(path: &std::path::Path) -> Result<DataTables, CliError> {
    let invalid = || CliError::InvalidTablesPath {
        path: path.to_path_buf(),
    };
    let utf8 = Utf8PathBuf::from_path_buf(path.to_path_buf()).map_err(|_| invalid())?;
    let file_name = utf8.file_name().ok_or_else(invalid)?;
    let parent = utf8
        .parent()
        .filter(|candidate| !candidate.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| {
        TablesError::IoError {
            path: utf8.clone(),
            message: err.to_string(),
        }
    })?;
    Ok(DataTables::from_file(&dir, Utf8Path::new(file_name))?)
}
