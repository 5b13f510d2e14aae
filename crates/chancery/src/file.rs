//! File names and the extension taxonomy.

use rand::RngCore;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ChanceError;
use crate::sampling::{WordOptions, pickone, word};
use crate::tables::DataTables;

/// A caller-supplied set of extensions, validated once into one of two
/// shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionPool {
    /// A flat list of extensions.
    List(Vec<String>),
    /// Extensions grouped under category names.
    Categorised(Vec<(String, Vec<String>)>),
}

impl ExtensionPool {
    /// Validates a JSON array of strings or an object whose values are
    /// arrays of strings.
    ///
    /// Object categories are kept in the map's key order.
    ///
    /// # Errors
    ///
    /// Returns [`ChanceError::InvalidExtensions`] for any other shape.
    ///
    /// # Example
    ///
    /// ```
    /// use chancery::file::ExtensionPool;
    /// use serde_json::json;
    ///
    /// let pool = ExtensionPool::from_value(&json!(["txt", "md"])).expect("array");
    /// assert_eq!(pool, ExtensionPool::List(vec!["txt".to_owned(), "md".to_owned()]));
    ///
    /// assert!(ExtensionPool::from_value(&json!("txt")).is_err());
    /// ```
    pub fn from_value(value: &Value) -> Result<Self, ChanceError> {
        match value {
            Value::Array(items) => string_list(items).map(Self::List),
            Value::Object(map) => map
                .iter()
                .map(|(category, entry)| match entry {
                    Value::Array(items) => Ok((category.clone(), string_list(items)?)),
                    _ => Err(ChanceError::InvalidExtensions),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Categorised),
            _ => Err(ChanceError::InvalidExtensions),
        }
    }

    /// Picks one extension, restricted to `category` when the pool is
    /// categorised. A flat list ignores `category`.
    ///
    /// # Errors
    ///
    /// Returns [`ChanceError::UnknownFileCategory`] listing the pool's
    /// categories when `category` is not one of them, or
    /// [`ChanceError::EmptyPool`] when the selected list is empty.
    pub fn pick<'a, R: RngCore + ?Sized>(
        &'a self,
        rng: &mut R,
        category: Option<&str>,
    ) -> Result<&'a str, ChanceError> {
        let extensions = match self {
            Self::List(extensions) => extensions,
            Self::Categorised(categories) => {
                let (_, extensions) = match category {
                    Some(name) => categories
                        .iter()
                        .find(|(candidate, _)| candidate == name)
                        .ok_or_else(|| ChanceError::UnknownFileCategory {
                            category: name.to_owned(),
                            permitted: categories.iter().map(|(key, _)| key.clone()).collect(),
                        })?,
                    None => pickone(rng, categories)?,
                };
                extensions
            }
        };
        pickone(rng, extensions).map(String::as_str)
    }
}

fn string_list(items: &[Value]) -> Result<Vec<String>, ChanceError> {
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_owned)
                .ok_or(ChanceError::InvalidExtensions)
        })
        .collect()
}

/// Options for [`file`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileOptions {
    /// Use exactly this extension.
    pub extension: Option<String>,
    /// Draw the extension from this pool; see [`ExtensionPool`].
    pub extensions: Option<Value>,
    /// Restrict the extension to one category.
    #[serde(alias = "category")]
    pub file_type: Option<String>,
    /// Exact length of the base name.
    pub length: Option<usize>,
}

/// Returns a file name: a pronounceable word, a dot and an extension.
///
/// # Errors
///
/// Returns [`ChanceError::ConflictingOptions`] when both `extension` and
/// `extensions` are supplied, [`ChanceError::InvalidExtensions`] for a
/// malformed pool and [`ChanceError::UnknownFileCategory`] for an unknown
/// `file_type`.
///
/// # Example
///
/// ```
/// use chancery::{DataTables, Engine, file::{FileOptions, file}};
///
/// let tables = DataTables::builtin();
/// let mut engine = Engine::seeded(42_u32);
/// let options = FileOptions {
///     file_type: Some("raster".to_owned()),
///     length: Some(8),
///     ..FileOptions::default()
/// };
///
/// let name = file(&mut engine, &tables, &options).expect("known category");
/// let (stem, extension) = name.split_once('.').expect("has an extension");
/// assert_eq!(stem.len(), 8);
/// assert!(tables.file_category("raster").expect("builtin").extensions().iter().any(|e| e == extension));
/// ```
pub fn file<R: RngCore + ?Sized>(
    rng: &mut R,
    tables: &DataTables,
    options: &FileOptions,
) -> Result<String, ChanceError> {
    if options.extension.is_some() && options.extensions.is_some() {
        return Err(ChanceError::ConflictingOptions {
            first: "extension",
            second: "extensions",
        });
    }

    let stem = word(
        rng,
        WordOptions {
            length: options.length,
            ..WordOptions::default()
        },
    )?;

    let file_type = options.file_type.as_deref();
    let extension = match (&options.extension, &options.extensions) {
        (Some(extension), _) => extension.clone(),
        (None, Some(value)) => ExtensionPool::from_value(value)?
            .pick(rng, file_type)?
            .to_owned(),
        (None, None) => file_extension(rng, tables, file_type)?.to_owned(),
    };

    Ok(format!("{stem}.{extension}"))
}

/// Picks an extension from the tables, optionally from one category.
///
/// # Errors
///
/// Returns [`ChanceError::UnknownFileCategory`] listing the table's
/// categories in order when `file_type` is not one of them.
pub fn file_extension<'a, R: RngCore + ?Sized>(
    rng: &mut R,
    tables: &'a DataTables,
    file_type: Option<&str>,
) -> Result<&'a str, ChanceError> {
    let category = match file_type {
        Some(name) => tables
            .file_category(name)
            .ok_or_else(|| ChanceError::UnknownFileCategory {
                category: name.to_owned(),
                permitted: tables.file_category_names(),
            })?,
        None => pickone(rng, tables.file_categories())?,
    };
    pickone(rng, category.extensions()).map(String::as_str)
}
