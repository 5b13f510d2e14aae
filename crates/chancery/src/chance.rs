//! The `Chance` facade: one engine, one set of tables, one registry.

use std::sync::Arc;

use chrono::{Month, NaiveDate};
use rand::RngCore;
use serde_json::Value;
use uuid::Uuid;

use crate::engine::{Engine, Seed};
use crate::error::ChanceError;
use crate::file::{self, FileOptions};
use crate::identifiers::{
    self, BrazilOptions, CardOptions, CardTypeOptions, CfOptions, IbanOptions, PeselOptions,
    SsnOptions,
};
use crate::person::{self, Gender, NameOptions};
use crate::registry::GeneratorRegistry;
use crate::sampling::{
    self, BoolOptions, CharacterOptions, FloatOptions, IntegerRange, NaturalRange, NormalOptions,
    StringOptions, SyllableOptions, WordOptions,
};
use crate::tables::{CardType, DataTables};
use crate::time::{self, DateOptions, YearOptions};

/// A seeded generator instance.
///
/// `Chance` owns its [`Engine`], shares an immutable [`DataTables`] value
/// and carries a [`GeneratorRegistry`] so generators can be added with
/// [`Chance::mixin`] and invoked by name with [`Chance::call`]. It also
/// implements [`RngCore`], so any free function in this crate accepts it
/// as the random source.
///
/// # Example
///
/// ```
/// use chancery::{Chance, sampling::IntegerRange};
/// use serde_json::json;
///
/// let mut chance = Chance::seeded("demo");
/// let direct = chance.integer(IntegerRange::new(1, 6)).expect("valid range");
///
/// chance.reseed("demo");
/// let by_name = chance.call("integer", &json!({"min": 1, "max": 6})).expect("registered");
///
/// assert_eq!(by_name, json!(direct));
/// ```
#[derive(Debug, Clone)]
pub struct Chance {
    engine: Engine,
    tables: Arc<DataTables>,
    registry: GeneratorRegistry,
}

impl Chance {
    /// Creates an instance with the built-in tables, seeded from `seed` or
    /// from entropy when `None`.
    #[must_use]
    pub fn new(seed: Option<Seed>) -> Self {
        Self::from_engine(Engine::new(seed))
    }

    /// Creates a reproducible instance.
    #[must_use]
    pub fn seeded(seed: impl Into<Seed>) -> Self {
        Self::from_engine(Engine::seeded(seed))
    }

    /// Creates a non-reproducible instance.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::from_engine(Engine::from_entropy())
    }

    fn from_engine(engine: Engine) -> Self {
        Self {
            engine,
            tables: Arc::new(DataTables::builtin()),
            registry: GeneratorRegistry::with_builtins(),
        }
    }

    /// Replaces the data tables.
    #[must_use]
    pub fn with_tables(mut self, tables: Arc<DataTables>) -> Self {
        self.tables = tables;
        self
    }

    /// Returns the data tables in use.
    #[must_use]
    pub fn tables(&self) -> &DataTables {
        &self.tables
    }

    /// Returns the folded 32-bit seed.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.engine.seed()
    }

    /// Restarts the sequence for `seed`. Registered generators are kept.
    pub fn reseed(&mut self, seed: impl Into<Seed>) {
        self.engine.reseed(seed);
    }

    /// Registers `generator` under `name`, replacing any generator of that
    /// name, built-ins included.
    ///
    /// # Example
    ///
    /// ```
    /// use chancery::{Chance, sampling::IntegerRange};
    /// use serde_json::{Value, json};
    ///
    /// let mut chance = Chance::seeded(1_u32);
    /// chance.mixin("dice", |instance, _options: &Value| {
    ///     let roll = instance.integer(IntegerRange::new(1, 6))?;
    ///     Ok(json!(roll))
    /// });
    ///
    /// let value = chance.call("dice", &Value::Null).expect("registered");
    /// assert!((1..=6).contains(&value.as_i64().expect("integer")));
    /// ```
    pub fn mixin<F>(&mut self, name: impl Into<String>, generator: F)
    where
        F: Fn(&mut Self, &Value) -> Result<Value, ChanceError> + Send + Sync + 'static,
    {
        self.registry.register(name, generator);
    }

    /// Invokes the generator registered under `name`.
    ///
    /// `options` is a JSON object of the generator's options; `null` means
    /// all defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ChanceError::UnknownGenerator`] for an unregistered name,
    /// [`ChanceError::InvalidOptions`] when the options do not fit the
    /// generator, and any error the generator itself raises.
    pub fn call(&mut self, name: &str, options: &Value) -> Result<Value, ChanceError> {
        let generator = self.registry.get(name)?;
        generator(self, options)
    }

    /// Returns the registered generator names in sorted order.
    #[must_use]
    pub fn generator_names(&self) -> Vec<&str> {
        self.registry.names().collect()
    }

    /// See [`sampling::random`].
    pub fn random(&mut self) -> f64 {
        sampling::random(self)
    }

    /// See [`sampling::boolean`].
    ///
    /// # Errors
    ///
    /// See [`sampling::boolean`].
    pub fn boolean(&mut self, options: BoolOptions) -> Result<bool, ChanceError> {
        sampling::boolean(self, options)
    }

    /// See [`sampling::integer`].
    ///
    /// # Errors
    ///
    /// See [`sampling::integer`].
    pub fn integer(&mut self, range: IntegerRange) -> Result<i64, ChanceError> {
        sampling::integer(self, range)
    }

    /// See [`sampling::natural`].
    ///
    /// # Errors
    ///
    /// See [`sampling::natural`].
    pub fn natural(&mut self, range: NaturalRange) -> Result<i64, ChanceError> {
        sampling::natural(self, range)
    }

    /// See [`sampling::floating`].
    ///
    /// # Errors
    ///
    /// See [`sampling::floating`].
    pub fn floating(&mut self, options: FloatOptions) -> Result<f64, ChanceError> {
        sampling::floating(self, options)
    }

    /// See [`sampling::character`].
    ///
    /// # Errors
    ///
    /// See [`sampling::character`].
    pub fn character(&mut self, options: &CharacterOptions) -> Result<char, ChanceError> {
        sampling::character(self, options)
    }

    /// See [`sampling::string`].
    ///
    /// # Errors
    ///
    /// See [`sampling::string`].
    pub fn string(&mut self, options: &StringOptions) -> Result<String, ChanceError> {
        sampling::string(self, options)
    }

    /// See [`sampling::syllable`].
    ///
    /// # Errors
    ///
    /// See [`sampling::syllable`].
    pub fn syllable(&mut self, options: SyllableOptions) -> Result<String, ChanceError> {
        sampling::syllable(self, options)
    }

    /// See [`sampling::word`].
    ///
    /// # Errors
    ///
    /// See [`sampling::word`].
    pub fn word(&mut self, options: WordOptions) -> Result<String, ChanceError> {
        sampling::word(self, options)
    }

    /// See [`sampling::guid`].
    pub fn guid(&mut self) -> Uuid {
        sampling::guid(self)
    }

    /// See [`sampling::pickone`].
    ///
    /// # Errors
    ///
    /// See [`sampling::pickone`].
    pub fn pickone<'a, T>(&mut self, pool: &'a [T]) -> Result<&'a T, ChanceError> {
        sampling::pickone(self, pool)
    }

    /// See [`sampling::pickset`].
    ///
    /// # Errors
    ///
    /// See [`sampling::pickset`].
    pub fn pickset<T: Clone>(&mut self, pool: &[T], count: usize) -> Result<Vec<T>, ChanceError> {
        sampling::pickset(self, pool, count)
    }

    /// See [`sampling::pick`].
    ///
    /// # Errors
    ///
    /// See [`sampling::pick`].
    pub fn pick<T: Clone>(&mut self, pool: &[T], count: usize) -> Result<Vec<T>, ChanceError> {
        sampling::pick(self, pool, count)
    }

    /// See [`sampling::shuffle`].
    pub fn shuffle<T: Clone>(&mut self, pool: &[T]) -> Vec<T> {
        sampling::shuffle(self, pool)
    }

    /// See [`sampling::weighted`].
    ///
    /// # Errors
    ///
    /// See [`sampling::weighted`].
    pub fn weighted<'a, T>(&mut self, pool: &'a [T], weights: &[f64]) -> Result<&'a T, ChanceError> {
        sampling::weighted(self, pool, weights)
    }

    /// See [`sampling::unique`]; `generate` receives this instance.
    ///
    /// # Errors
    ///
    /// See [`sampling::unique`].
    pub fn unique<T, F>(&mut self, count: usize, generate: F) -> Result<Vec<T>, ChanceError>
    where
        T: PartialEq,
        F: FnMut(&mut Self) -> Result<T, ChanceError>,
    {
        sampling::unique(self, count, generate)
    }

    /// See [`sampling::n`]; `generate` receives this instance.
    ///
    /// # Errors
    ///
    /// Propagates the first error from `generate`.
    pub fn n<T, F>(&mut self, count: usize, generate: F) -> Result<Vec<T>, ChanceError>
    where
        F: FnMut(&mut Self) -> Result<T, ChanceError>,
    {
        sampling::n(self, count, generate)
    }

    /// See [`sampling::normal`].
    ///
    /// # Errors
    ///
    /// See [`sampling::normal`].
    pub fn normal(&mut self, options: NormalOptions) -> Result<f64, ChanceError> {
        sampling::normal(self, options)
    }

    /// See [`sampling::normal_pool`].
    ///
    /// # Errors
    ///
    /// See [`sampling::normal_pool`].
    pub fn normal_pool<'a, T>(
        &mut self,
        options: NormalOptions,
        pool: &'a [T],
    ) -> Result<&'a T, ChanceError> {
        sampling::normal_pool(self, options, pool)
    }

    /// See [`identifiers::cc_type`].
    ///
    /// # Errors
    ///
    /// See [`identifiers::cc_type`].
    pub fn cc_type(&mut self, options: &CardTypeOptions) -> Result<CardType, ChanceError> {
        let tables = Arc::clone(&self.tables);
        identifiers::cc_type(self, &tables, options).cloned()
    }

    /// See [`identifiers::cc`].
    ///
    /// # Errors
    ///
    /// See [`identifiers::cc`].
    pub fn cc(&mut self, options: &CardOptions) -> Result<String, ChanceError> {
        let tables = Arc::clone(&self.tables);
        identifiers::cc(self, &tables, options)
    }

    /// See [`identifiers::iban`].
    ///
    /// # Errors
    ///
    /// See [`identifiers::iban`].
    pub fn iban(&mut self, options: &IbanOptions) -> Result<String, ChanceError> {
        let tables = Arc::clone(&self.tables);
        identifiers::iban(self, &tables, options)
    }

    /// See [`identifiers::cpf`].
    ///
    /// # Errors
    ///
    /// See [`identifiers::cpf`].
    pub fn cpf(&mut self, options: BrazilOptions) -> Result<String, ChanceError> {
        identifiers::cpf(self, options)
    }

    /// See [`identifiers::cnpj`].
    ///
    /// # Errors
    ///
    /// See [`identifiers::cnpj`].
    pub fn cnpj(&mut self, options: BrazilOptions) -> Result<String, ChanceError> {
        identifiers::cnpj(self, options)
    }

    /// See [`identifiers::pl_pesel`].
    ///
    /// # Errors
    ///
    /// See [`identifiers::pl_pesel`].
    pub fn pl_pesel(&mut self, options: PeselOptions) -> Result<String, ChanceError> {
        identifiers::pl_pesel(self, options)
    }

    /// See [`identifiers::pl_nip`].
    ///
    /// # Errors
    ///
    /// See [`identifiers::pl_nip`].
    pub fn pl_nip(&mut self) -> Result<String, ChanceError> {
        identifiers::pl_nip(self)
    }

    /// See [`identifiers::pl_regon`].
    ///
    /// # Errors
    ///
    /// See [`identifiers::pl_regon`].
    pub fn pl_regon(&mut self) -> Result<String, ChanceError> {
        identifiers::pl_regon(self)
    }

    /// See [`identifiers::cf`].
    ///
    /// # Errors
    ///
    /// See [`identifiers::cf`].
    pub fn cf(&mut self, options: &CfOptions) -> Result<String, ChanceError> {
        identifiers::cf(self, options)
    }

    /// See [`identifiers::israel_id`].
    ///
    /// # Errors
    ///
    /// See [`identifiers::israel_id`].
    pub fn israel_id(&mut self) -> Result<String, ChanceError> {
        identifiers::israel_id(self)
    }

    /// See [`identifiers::ssn`].
    ///
    /// # Errors
    ///
    /// See [`identifiers::ssn`].
    pub fn ssn(&mut self, options: SsnOptions) -> Result<String, ChanceError> {
        identifiers::ssn(self, options)
    }

    /// See [`file::file`].
    ///
    /// # Errors
    ///
    /// See [`file::file`].
    pub fn file(&mut self, options: &FileOptions) -> Result<String, ChanceError> {
        let tables = Arc::clone(&self.tables);
        file::file(self, &tables, options)
    }

    /// See [`file::file_extension`].
    ///
    /// # Errors
    ///
    /// See [`file::file_extension`].
    pub fn file_extension(&mut self, file_type: Option<&str>) -> Result<String, ChanceError> {
        let tables = Arc::clone(&self.tables);
        file::file_extension(self, &tables, file_type).map(str::to_owned)
    }

    /// See [`person::first`].
    pub fn first(&mut self) -> String {
        person::first(self)
    }

    /// See [`person::last`].
    pub fn last(&mut self) -> String {
        person::last(self)
    }

    /// See [`person::name`].
    pub fn name(&mut self, options: NameOptions) -> String {
        person::name(self, options)
    }

    /// See [`person::gender`].
    pub fn gender(&mut self) -> Gender {
        person::gender(self)
    }

    /// See [`time::date`].
    ///
    /// # Errors
    ///
    /// See [`time::date`].
    pub fn date(&mut self, options: DateOptions) -> Result<NaiveDate, ChanceError> {
        time::date(self, options)
    }

    /// See [`time::year`].
    ///
    /// # Errors
    ///
    /// See [`time::year`].
    pub fn year(&mut self, options: YearOptions) -> Result<i32, ChanceError> {
        time::year(self, options)
    }

    /// See [`time::month`].
    pub fn month(&mut self) -> Month {
        time::month(self)
    }
}

impl RngCore for Chance {
    fn next_u32(&mut self) -> u32 {
        self.engine.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.engine.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.engine.fill_bytes(dst);
    }
}
