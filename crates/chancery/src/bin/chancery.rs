//! Generate fake data from the command line.
//!
//! This binary delegates to `chancery::cli` for parsing and generation,
//! keeping the behaviour testable without spawning a process.

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use chancery::cli::{CliError, ParseOutcome, parse_args, run};
use chancery::config::ChancerySettings;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();
    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init();
    if let Err(err) = result {
        warn!(error = %err, "tracing subscriber already initialised");
    }
}

fn execute() -> Result<(), CliError> {
    let args = match parse_args(env::args_os())? {
        ParseOutcome::Info(text) => {
            write_lines(&[text]);
            return Ok(());
        }
        ParseOutcome::Args(args) => args,
    };

    // Flags are parsed above; settings come from the environment and files only.
    let settings = ChancerySettings::load_from_iter([OsString::from("chancery")]).unwrap_or_else(
        |err| {
            warn!(error = %err, "failed to load settings; using defaults");
            ChancerySettings::default()
        },
    );

    let lines = run(&args, &settings)?;
    write_lines(&lines);
    Ok(())
}

fn write_lines(lines: &[String]) {
    let mut out = io::stdout().lock();
    for line in lines {
        if let Err(err) = writeln!(out, "{line}") {
            drop(err);
            return;
        }
    }
}
