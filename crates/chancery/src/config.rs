//! Command-line defaults loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Deserializer};

use crate::engine::Seed;

/// Values per invocation when neither a flag nor a setting supplies one.
pub const DEFAULT_COUNT: usize = 1;

/// Defaults for the `chancery` command, read from `CHANCERY_*` environment
/// variables and configuration files. Command-line flags override each
/// field.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CHANCERY")]
pub struct ChancerySettings {
    /// Seed for reproducible output; numeric strings are numeric seeds.
    #[serde(default, deserialize_with = "seed_text")]
    pub seed: Option<String>,
    /// Number of values to generate.
    pub count: Option<usize>,
    /// JSON data tables replacing the built-in ones.
    pub tables_path: Option<PathBuf>,
}

/// Environment values that look numeric arrive as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeed {
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

fn seed_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<RawSeed>::deserialize(deserializer)?;
    Ok(raw.map(|seed| match seed {
        RawSeed::Unsigned(value) => value.to_string(),
        RawSeed::Signed(value) => value.to_string(),
        RawSeed::Text(text) => text,
    }))
}

impl ChancerySettings {
    /// Returns the configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<Seed> {
        self.seed.as_deref().map(Seed::parse)
    }

    /// Returns the configured count, falling back to [`DEFAULT_COUNT`].
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.unwrap_or(DEFAULT_COUNT)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings loading.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ChancerySettings {
        ChancerySettings::load_from_iter([OsString::from("chancery")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("CHANCERY_SEED", None::<String>),
            ("CHANCERY_COUNT", None::<String>),
            ("CHANCERY_TABLES_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.seed(), None);
        assert_eq!(settings.count(), DEFAULT_COUNT);
        assert!(settings.tables_path.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CHANCERY_SEED", Some("42".to_owned())),
            ("CHANCERY_COUNT", Some("3".to_owned())),
            ("CHANCERY_TABLES_PATH", Some("/tmp/tables.json".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.seed(), Some(Seed::Number(42)));
        assert_eq!(settings.count(), 3);
        assert_eq!(settings.tables_path, Some(PathBuf::from("/tmp/tables.json")));
    }

    #[rstest]
    fn text_seeds_are_kept_as_text() {
        let _guard = lock_env([("CHANCERY_SEED", Some("mossy-owl".to_owned()))]);

        let settings = load_from_empty_args();
        assert_eq!(settings.seed(), Some(Seed::Text("mossy-owl".to_owned())));
    }

    #[rstest]
    fn negative_seeds_are_kept_as_text() {
        let _guard = lock_env([("CHANCERY_SEED", Some("-1".to_owned()))]);

        let settings = load_from_empty_args();
        assert_eq!(settings.seed(), Some(Seed::Text("-1".to_owned())));
    }
}
