//! Built-in generators, invocable by name with JSON options.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::GeneratorRegistry;
use crate::checksum::{luhn_calculate, luhn_check};
use crate::error::ChanceError;
use crate::file::FileOptions;
use crate::identifiers::{
    BrazilOptions, CardOptions, CardTypeOptions, CfOptions, IbanOptions, PeselOptions, SsnOptions,
};
use crate::person::NameOptions;
use crate::sampling::{
    BoolOptions, CharacterOptions, FloatOptions, IntegerRange, NaturalRange, NormalOptions,
    StringOptions, SyllableOptions, WordOptions,
};
use crate::tables::CardType;
use crate::time::{DateOptions, YearOptions};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PadOptions {
    number: i64,
    width: usize,
    #[serde(default = "zero")]
    pad: char,
}

const fn zero() -> char {
    '0'
}

const fn one() -> usize {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoolOptions {
    pool: Vec<Value>,
    #[serde(default = "one")]
    count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeightedOptions {
    pool: Vec<Value>,
    weights: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NormalPoolOptions {
    #[serde(flatten)]
    normal: NormalOptions,
    pool: Vec<Value>,
}

/// Options for `n` and `unique`: which generator to repeat, how often and
/// with what options.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepeatOptions {
    generator: String,
    #[serde(default = "one")]
    count: usize,
    #[serde(default)]
    options: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DigitsOptions {
    number: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ExtensionOptions {
    #[serde(alias = "category")]
    file_type: Option<String>,
}

/// Decodes `options` for `generator`; `null` stands for all defaults.
fn parse<T: DeserializeOwned>(generator: &str, options: &Value) -> Result<T, ChanceError> {
    let source = if options.is_null() {
        Value::Object(Map::new())
    } else {
        options.clone()
    };
    serde_json::from_value(source).map_err(|err| ChanceError::InvalidOptions {
        generator: generator.to_owned(),
        message: err.to_string(),
    })
}

fn encode<T: Serialize>(value: T) -> Result<Value, ChanceError> {
    serde_json::to_value(value).map_err(|err| ChanceError::Serialization {
        message: err.to_string(),
    })
}

fn card_type_value(card: &CardType) -> Value {
    let mut map = Map::new();
    map.insert("name".to_owned(), Value::from(card.name()));
    map.insert("shortName".to_owned(), Value::from(card.short_name()));
    map.insert("prefix".to_owned(), Value::from(card.prefix()));
    map.insert("length".to_owned(), Value::from(card.length()));
    Value::Object(map)
}

pub(super) fn register_all(registry: &mut GeneratorRegistry) {
    register_sampling(registry);
    register_collections(registry);
    register_identifiers(registry);
    register_peripheral(registry);
}

fn register_sampling(registry: &mut GeneratorRegistry) {
    registry.register("random", |chance, _| encode(chance.random()));
    registry.register("bool", |chance, options| {
        encode(chance.boolean(parse::<BoolOptions>("bool", options)?)?)
    });
    registry.register("integer", |chance, options| {
        encode(chance.integer(parse::<IntegerRange>("integer", options)?)?)
    });
    registry.register("natural", |chance, options| {
        encode(chance.natural(parse::<NaturalRange>("natural", options)?)?)
    });
    registry.register("floating", |chance, options| {
        encode(chance.floating(parse::<FloatOptions>("floating", options)?)?)
    });
    registry.register("pad", |_, options| {
        let PadOptions { number, width, pad } = parse("pad", options)?;
        Ok(Value::String(crate::sampling::pad(number, width, pad)))
    });
    registry.register("character", |chance, options| {
        let character = chance.character(&parse::<CharacterOptions>("character", options)?)?;
        Ok(Value::String(character.to_string()))
    });
    registry.register("string", |chance, options| {
        encode(chance.string(&parse::<StringOptions>("string", options)?)?)
    });
    registry.register("syllable", |chance, options| {
        encode(chance.syllable(parse::<SyllableOptions>("syllable", options)?)?)
    });
    registry.register("word", |chance, options| {
        encode(chance.word(parse::<WordOptions>("word", options)?)?)
    });
    registry.register("guid", |chance, _| encode(chance.guid()));
    registry.register("normal", |chance, options| {
        encode(chance.normal(parse::<NormalOptions>("normal", options)?)?)
    });
}

fn register_collections(registry: &mut GeneratorRegistry) {
    registry.register("pickone", |chance, options| {
        let PoolOptions { pool, .. } = parse("pickone", options)?;
        chance.pickone(&pool).cloned()
    });
    registry.register("pickset", |chance, options| {
        let PoolOptions { pool, count } = parse("pickset", options)?;
        Ok(Value::Array(chance.pickset(&pool, count)?))
    });
    registry.register("pick", |chance, options| {
        let PoolOptions { pool, count } = parse("pick", options)?;
        Ok(Value::Array(chance.pick(&pool, count)?))
    });
    registry.register("shuffle", |chance, options| {
        let PoolOptions { pool, .. } = parse("shuffle", options)?;
        Ok(Value::Array(chance.shuffle(&pool)))
    });
    registry.register("weighted", |chance, options| {
        let WeightedOptions { pool, weights } = parse("weighted", options)?;
        chance.weighted(&pool, &weights).cloned()
    });
    registry.register("normal_pool", |chance, options| {
        let NormalPoolOptions { normal, pool } = parse("normal_pool", options)?;
        chance.normal_pool(normal, &pool).cloned()
    });
    registry.register("n", |chance, raw| {
        let RepeatOptions {
            generator,
            count,
            options,
        } = parse("n", raw)?;
        let values = chance.n(count, |inner| inner.call(&generator, &options))?;
        Ok(Value::Array(values))
    });
    registry.register("unique", |chance, raw| {
        let RepeatOptions {
            generator,
            count,
            options,
        } = parse("unique", raw)?;
        let values = chance.unique(count, |inner| inner.call(&generator, &options))?;
        Ok(Value::Array(values))
    });
}

fn register_identifiers(registry: &mut GeneratorRegistry) {
    registry.register("luhn_calculate", |_, options| {
        let DigitsOptions { number } = parse("luhn_calculate", options)?;
        encode(luhn_calculate(&number)?)
    });
    registry.register("luhn_check", |_, options| {
        let DigitsOptions { number } = parse("luhn_check", options)?;
        Ok(Value::Bool(luhn_check(&number)))
    });
    registry.register("cc_type", |chance, options| {
        let card = chance.cc_type(&parse::<CardTypeOptions>("cc_type", options)?)?;
        Ok(card_type_value(&card))
    });
    registry.register("cc", |chance, options| {
        encode(chance.cc(&parse::<CardOptions>("cc", options)?)?)
    });
    registry.register("iban", |chance, options| {
        encode(chance.iban(&parse::<IbanOptions>("iban", options)?)?)
    });
    registry.register("cpf", |chance, options| {
        encode(chance.cpf(parse::<BrazilOptions>("cpf", options)?)?)
    });
    registry.register("cnpj", |chance, options| {
        encode(chance.cnpj(parse::<BrazilOptions>("cnpj", options)?)?)
    });
    registry.register("pl_pesel", |chance, options| {
        encode(chance.pl_pesel(parse::<PeselOptions>("pl_pesel", options)?)?)
    });
    registry.register("pl_nip", |chance, _| encode(chance.pl_nip()?));
    registry.register("pl_regon", |chance, _| encode(chance.pl_regon()?));
    registry.register("cf", |chance, options| {
        encode(chance.cf(&parse::<CfOptions>("cf", options)?)?)
    });
    registry.register("israel_id", |chance, _| encode(chance.israel_id()?));
    registry.register("ssn", |chance, options| {
        encode(chance.ssn(parse::<SsnOptions>("ssn", options)?)?)
    });
    registry.register("file", |chance, options| {
        encode(chance.file(&parse::<FileOptions>("file", options)?)?)
    });
    registry.register("file_extension", |chance, options| {
        let ExtensionOptions { file_type } = parse("file_extension", options)?;
        encode(chance.file_extension(file_type.as_deref())?)
    });
}

fn register_peripheral(registry: &mut GeneratorRegistry) {
    registry.register("first", |chance, _| encode(chance.first()));
    registry.register("last", |chance, _| encode(chance.last()));
    registry.register("name", |chance, options| {
        encode(chance.name(parse::<NameOptions>("name", options)?))
    });
    registry.register("gender", |chance, _| {
        Ok(Value::from(chance.gender().as_str()))
    });
    registry.register("date", |chance, options| {
        encode(chance.date(parse::<DateOptions>("date", options)?)?)
    });
    registry.register("year", |chance, options| {
        encode(chance.year(parse::<YearOptions>("year", options)?)?)
    });
    registry.register("month", |chance, _| Ok(Value::from(chance.month().name())));
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::chance::Chance;
    use crate::error::ErrorKind;
    use crate::sampling::MAX_DUPLICATES;
    use crate::identifiers::{cnpj_check, cpf_check, iban_check, pl_nip_check, ssn_check};

    #[fixture]
    fn chance() -> Chance {
        Chance::seeded("registry")
    }

    fn call_str(chance: &mut Chance, name: &str, options: &Value) -> String {
        chance
            .call(name, options)
            .expect("generator succeeds")
            .as_str()
            .expect("string result")
            .to_owned()
    }

    #[rstest]
    fn integer_honours_json_bounds(mut chance: Chance) {
        for _ in 0..100 {
            let value = chance
                .call("integer", &json!({"min": -3, "max": 3}))
                .expect("valid range");
            let number = value.as_i64().expect("integer result");
            assert!((-3..=3).contains(&number));
        }
    }

    #[rstest]
    fn range_errors_surface_unchanged(mut chance: Chance) {
        let err = chance
            .call("integer", &json!({"min": 5, "max": 1}))
            .expect_err("inverted range");
        assert_eq!(err, ChanceError::MinGreaterThanMax { min: 5, max: 1 });
    }

    #[rstest]
    #[case("integer", json!({"min": "low"}))]
    #[case("pad", Value::Null)]
    #[case("pickone", json!({"items": [1]}))]
    #[case("ssn", json!({"dashes": "yes"}))]
    fn malformed_options_are_type_errors(
        mut chance: Chance,
        #[case] name: &str,
        #[case] options: Value,
    ) {
        let err = chance.call(name, &options).expect_err("bad options");
        assert!(
            matches!(&err, ChanceError::InvalidOptions { generator, .. } if generator == name),
            "{err:?}"
        );
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[rstest]
    fn pad_fills_to_width(mut chance: Chance) {
        assert_eq!(
            chance.call("pad", &json!({"number": 45, "width": 5})),
            Ok(json!("00045"))
        );
    }

    #[rstest]
    fn identifiers_validate(mut chance: Chance) {
        assert!(cpf_check(&call_str(&mut chance, "cpf", &Value::Null)));
        assert!(cnpj_check(&call_str(&mut chance, "cnpj", &Value::Null)));
        assert!(pl_nip_check(&call_str(&mut chance, "pl_nip", &Value::Null)));
        assert!(ssn_check(&call_str(&mut chance, "ssn", &Value::Null)));
        assert!(iban_check(&call_str(&mut chance, "iban", &json!({"country": "DE"}))));
        assert!(luhn_check(&call_str(&mut chance, "cc", &json!({"type": "visa"}))));
    }

    #[rstest]
    fn cc_type_returns_the_issuer(mut chance: Chance) {
        let card = chance
            .call("cc_type", &json!({"name": "amex"}))
            .expect("known issuer");
        assert_eq!(card.get("name"), Some(&json!("American Express")));
        assert_eq!(card.get("length"), Some(&json!(15)));
    }

    #[rstest]
    fn n_repeats_a_named_generator(mut chance: Chance) {
        let result = chance
            .call(
                "n",
                &json!({"generator": "natural", "count": 4, "options": {"max": 9}}),
            )
            .expect("valid options");
        let values = result.as_array().expect("array result");
        assert_eq!(values.len(), 4);
        assert!(values.iter().all(Value::is_i64));
    }

    #[rstest]
    fn unique_exhausts_on_small_domains(mut chance: Chance) {
        let err = chance
            .call(
                "unique",
                &json!({"generator": "integer", "count": 3, "options": {"min": 1, "max": 2}}),
            )
            .expect_err("only two values exist");
        assert!(matches!(err, ChanceError::UniqueExhausted { requested: 3, .. }));
    }

    #[rstest]
    fn unique_exhausts_for_the_largest_count(mut chance: Chance) {
        let err = chance
            .call("unique", &json!({"generator": "bool", "count": u64::MAX}))
            .expect_err("only two values exist");
        assert!(matches!(
            err,
            ChanceError::UniqueExhausted {
                collected: 2,
                max_duplicates: MAX_DUPLICATES,
                ..
            }
        ));
    }

    #[rstest]
    fn n_with_the_largest_count_surfaces_generator_errors(mut chance: Chance) {
        assert_eq!(
            chance.call("n", &json!({"generator": "unicorn", "count": u64::MAX})),
            Err(ChanceError::UnknownGenerator {
                name: "unicorn".to_owned()
            })
        );
    }

    #[rstest]
    fn unknown_nested_generators_propagate(mut chance: Chance) {
        assert_eq!(
            chance.call("n", &json!({"generator": "unicorn", "count": 2})),
            Err(ChanceError::UnknownGenerator {
                name: "unicorn".to_owned()
            })
        );
    }

    #[rstest]
    fn weighted_selects_only_positive_weights(mut chance: Chance) {
        for _ in 0..20 {
            assert_eq!(
                chance.call(
                    "weighted",
                    &json!({"pool": ["a", "b", "c"], "weights": [0, 1, 0]})
                ),
                Ok(json!("b"))
            );
        }
    }

    #[rstest]
    fn file_extension_accepts_a_category(mut chance: Chance) {
        let extension = call_str(&mut chance, "file_extension", &json!({"category": "3d"}));
        let tables = chance.tables();
        let category = tables.file_category("3d").expect("builtin");
        assert!(category.extensions().contains(&extension));
    }

    #[rstest]
    fn dates_are_iso_strings(mut chance: Chance) {
        let value = call_str(
            &mut chance,
            "date",
            &json!({"min": "2020-02-01", "max": "2020-02-29"}),
        );
        assert!(value.starts_with("2020-02-"), "{value}");
    }

    #[rstest]
    fn months_are_named(mut chance: Chance) {
        let month = call_str(&mut chance, "month", &Value::Null);
        assert!(month.parse::<chrono::Month>().is_ok(), "{month}");
    }
}
