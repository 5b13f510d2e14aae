//! Unit tests for the command-line helpers.

use std::sync::atomic::{AtomicUsize, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use rstest::{fixture, rstest};

use super::*;
use crate::error::ChanceError;

const TABLES_JSON: &str = r#"{
    "version": 1,
    "cardTypes": [{"name": "House Card", "shortName": "house", "prefix": "77", "length": 12}]
}"#;

struct TablesFixture {
    path: Utf8PathBuf,
}

impl Drop for TablesFixture {
    fn drop(&mut self) {
        cleanup_path(&self.path);
    }
}

#[fixture]
fn tables_fixture() -> TablesFixture {
    TablesFixture {
        path: write_tables(TABLES_JSON),
    }
}

fn args(generator: &str) -> CliArgs {
    CliArgs {
        generator: Some(generator.to_owned()),
        seed: Some("42".to_owned()),
        ..CliArgs::default()
    }
}

#[test]
fn parse_args_reads_every_flag() {
    let outcome = parse_args([
        "chancery",
        "cc",
        "--seed",
        "mossy-owl",
        "--count",
        "4",
        "--options",
        r#"{"type": "visa"}"#,
        "--tables",
        "tables.json",
    ])
    .expect("parse args");

    assert_eq!(
        outcome,
        ParseOutcome::Args(CliArgs {
            generator: Some("cc".to_owned()),
            seed: Some("mossy-owl".to_owned()),
            count: Some(4),
            options: Some(r#"{"type": "visa"}"#.to_owned()),
            tables_path: Some(PathBuf::from("tables.json")),
            list: false,
        })
    );
}

#[rstest]
#[case("--help")]
#[case("--version")]
fn parse_args_returns_info_text(#[case] flag: &str) {
    let outcome = parse_args(["chancery", flag]).expect("parse args");
    assert!(matches!(outcome, ParseOutcome::Info(text) if text.contains("chancery")));
}

#[rstest]
#[case(&["chancery", "--bogus"])]
#[case(&["chancery", "integer", "--count", "many"])]
fn parse_args_reports_usage_errors(#[case] argv: &[&str]) {
    let err = parse_args(argv.iter().copied()).expect_err("expected error");
    assert!(matches!(err, CliError::Usage { .. }));
}

#[test]
fn run_requires_a_generator() {
    let err = run(&CliArgs::default(), &ChancerySettings::default()).expect_err("no generator");
    assert_eq!(err, CliError::MissingGenerator);
}

#[test]
fn run_lists_generators() {
    let list = CliArgs {
        list: true,
        ..CliArgs::default()
    };
    let names = run(&list, &ChancerySettings::default()).expect("list");
    assert!(names.iter().any(|name| name == "pl_regon"));
    assert!(names.iter().any(|name| name == "file"));
}

#[test]
fn run_is_reproducible_for_a_seed() {
    let invocation = CliArgs {
        count: Some(5),
        ..args("guid")
    };
    let first = run(&invocation, &ChancerySettings::default()).expect("run");
    let second = run(&invocation, &ChancerySettings::default()).expect("run");
    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
}

#[test]
fn flags_override_settings() {
    let settings = ChancerySettings {
        seed: Some("7".to_owned()),
        count: Some(2),
        tables_path: None,
    };
    let from_settings = run(
        &CliArgs {
            generator: Some("natural".to_owned()),
            ..CliArgs::default()
        },
        &settings,
    )
    .expect("run");
    let from_flags = run(
        &CliArgs {
            count: Some(2),
            seed: Some("7".to_owned()),
            ..args("natural")
        },
        &ChancerySettings::default(),
    )
    .expect("run");

    assert_eq!(from_settings.len(), 2);
    assert_eq!(from_settings, from_flags);

    let overridden = run(
        &CliArgs {
            count: Some(1),
            ..args("natural")
        },
        &settings,
    )
    .expect("run");
    assert_eq!(overridden.len(), 1);
}

#[test]
fn options_must_be_json() {
    let invocation = CliArgs {
        options: Some("{min: 1}".to_owned()),
        ..args("integer")
    };
    let err = run(&invocation, &ChancerySettings::default()).expect_err("bad json");
    assert!(matches!(err, CliError::InvalidOptionsJson { .. }));
}

#[test]
fn generation_errors_are_wrapped() {
    let invocation = CliArgs {
        options: Some(r#"{"min": 3, "max": 1}"#.to_owned()),
        ..args("integer")
    };
    assert_eq!(
        run(&invocation, &ChancerySettings::default()),
        Err(CliError::Generation {
            source: ChanceError::MinGreaterThanMax { min: 3, max: 1 }
        })
    );
}

#[test]
fn unknown_generators_are_reported() {
    let err = run(&args("unicorn"), &ChancerySettings::default()).expect_err("unknown");
    assert_eq!(err.to_string(), "generation failed: no generator named 'unicorn' is registered");
}

#[test]
fn the_largest_count_still_reports_unknown_generators() {
    let invocation = CliArgs {
        count: Some(usize::MAX),
        ..args("unicorn")
    };
    assert_eq!(
        run(&invocation, &ChancerySettings::default()),
        Err(CliError::Generation {
            source: ChanceError::UnknownGenerator {
                name: "unicorn".to_owned()
            }
        })
    );
}

#[test]
fn the_largest_count_from_settings_stops_at_the_first_failure() {
    let settings = ChancerySettings {
        count: Some(usize::MAX),
        ..ChancerySettings::default()
    };
    let invocation = CliArgs {
        options: Some(r#"{"min": 3, "max": 1}"#.to_owned()),
        ..args("integer")
    };
    assert_eq!(
        run(&invocation, &settings),
        Err(CliError::Generation {
            source: ChanceError::MinGreaterThanMax { min: 3, max: 1 }
        })
    );
}

#[rstest]
fn tables_file_replaces_card_types(tables_fixture: TablesFixture) {
    let invocation = CliArgs {
        count: Some(10),
        tables_path: Some(tables_fixture.path.clone().into_std_path_buf()),
        ..args("cc")
    };
    let lines = run(&invocation, &ChancerySettings::default()).expect("run");

    for line in lines {
        let number: String = serde_json::from_str(&line).expect("json string");
        assert!(number.starts_with("77"), "{number}");
        assert_eq!(number.len(), 12);
    }
}

#[test]
fn missing_tables_file_is_an_io_error() {
    let invocation = CliArgs {
        tables_path: Some(PathBuf::from("target/chancery-tests/absent/tables.json")),
        ..args("cc")
    };
    let err = run(&invocation, &ChancerySettings::default()).expect_err("missing file");
    assert!(matches!(
        err,
        CliError::Tables {
            source: TablesError::IoError { .. }
        }
    ));
}

fn write_tables(json: &str) -> Utf8PathBuf {
    let path = unique_temp_path("tables.json");
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).expect("open tables dir");
    let file_name = path.file_name().expect("tables file name");
    dir.write(file_name, json).expect("write tables");
    path
}

fn cleanup_path(path: &Utf8Path) {
    if let Some(parent) = path.parent() {
        let root = Dir::open_ambient_dir(".", ambient_authority()).expect("open workspace dir");
        drop(root.remove_dir_all(parent));
    }
}

fn unique_temp_path(file_name: &str) -> Utf8PathBuf {
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let process_id = std::process::id();
    let dir = Utf8PathBuf::from("target")
        .join("chancery-tests")
        .join(format!("cli-{process_id}-{counter}"));
    let root = Dir::open_ambient_dir(".", ambient_authority()).expect("open workspace dir");
    root.create_dir_all(&dir).expect("create temp dir");
    dir.join(file_name)
}
