//! Name-keyed generator registry.
//!
//! The registry maps generator names to functions that take the owning
//! [`Chance`] and a JSON options object and return a JSON value. It backs
//! [`Chance::call`] and [`Chance::mixin`], and is what the command-line
//! surface dispatches through.

mod builtins;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::chance::Chance;
use crate::error::ChanceError;

/// A generator invocable by name.
pub type Generator = Arc<dyn Fn(&mut Chance, &Value) -> Result<Value, ChanceError> + Send + Sync>;

/// Generators keyed by name.
///
/// # Example
///
/// ```
/// use chancery::GeneratorRegistry;
///
/// let registry = GeneratorRegistry::with_builtins();
/// assert!(registry.contains("integer"));
/// assert!(registry.contains("pl_nip"));
/// assert!(!registry.contains("unicorn"));
/// ```
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    generators: BTreeMap<String, Generator>,
}

impl GeneratorRegistry {
    /// Creates a registry with no generators.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in generator.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        builtins::register_all(&mut registry);
        registry
    }

    /// Registers `generator` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, generator: F)
    where
        F: Fn(&mut Chance, &Value) -> Result<Value, ChanceError> + Send + Sync + 'static,
    {
        let key = name.into();
        let replaced = self
            .generators
            .insert(key.clone(), Arc::new(generator))
            .is_some();
        debug!(generator = %key, replaced, "generator registered");
    }

    /// Looks up the generator registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ChanceError::UnknownGenerator`] when nothing is registered
    /// under `name`.
    pub fn get(&self, name: &str) -> Result<Generator, ChanceError> {
        self.generators
            .get(name)
            .cloned()
            .ok_or_else(|| ChanceError::UnknownGenerator {
                name: name.to_owned(),
            })
    }

    /// Returns whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.generators.contains_key(name)
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }

    /// Returns the number of registered generators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Returns whether the registry holds no generators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_registry_reports_unknown_names() {
        let registry = GeneratorRegistry::empty();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.get("integer"),
            Err(ChanceError::UnknownGenerator { name }) if name == "integer"
        ));
    }

    #[test]
    fn registering_replaces_existing_entries() {
        let mut registry = GeneratorRegistry::with_builtins();
        let before = registry.len();
        registry.register("integer", |_, _| Ok(json!(7)));

        assert_eq!(registry.len(), before);
        let generator = registry.get("integer").expect("registered");
        let mut chance = Chance::seeded(1_u32);
        assert_eq!(generator(&mut chance, &Value::Null), Ok(json!(7)));
    }

    #[rstest]
    #[case("random")]
    #[case("bool")]
    #[case("integer")]
    #[case("natural")]
    #[case("floating")]
    #[case("character")]
    #[case("string")]
    #[case("word")]
    #[case("guid")]
    #[case("unique")]
    #[case("n")]
    #[case("normal")]
    #[case("cc")]
    #[case("cc_type")]
    #[case("iban")]
    #[case("cpf")]
    #[case("cnpj")]
    #[case("pl_pesel")]
    #[case("pl_nip")]
    #[case("pl_regon")]
    #[case("cf")]
    #[case("israel_id")]
    #[case("ssn")]
    #[case("file")]
    #[case("file_extension")]
    #[case("name")]
    #[case("date")]
    fn builtins_are_registered(#[case] name: &str) {
        assert!(GeneratorRegistry::with_builtins().contains(name));
    }

    #[test]
    fn names_are_sorted() {
        let registry = GeneratorRegistry::with_builtins();
        let names: Vec<&str> = registry.names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn debug_lists_names() {
        let mut registry = GeneratorRegistry::empty();
        registry.register("dice", |_, _| Ok(json!(4)));
        assert_eq!(format!("{registry:?}"), r#"{"dice"}"#);
    }
}
