//! Swappable data tables.
//!
//! Generators that depend on reference data (credit card issuers, file
//! extension categories, IBAN layouts) read it from an immutable
//! [`DataTables`] value. The built-in tables are always available; a JSON
//! document can replace any of the three sections.

mod builtin;

use camino::Utf8Path;
use cap_std::fs::Dir;
use serde::Deserialize;

use crate::error::TablesError;

/// Current supported tables document version.
const SUPPORTED_VERSION: u32 = 1;

/// Longest BBAN ISO 13616 permits.
pub const MAX_BBAN_LENGTH: usize = 30;

/// A credit card issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardType {
    name: String,
    short_name: String,
    prefix: String,
    length: usize,
}

impl CardType {
    /// Creates a card type, validating the prefix against the length.
    ///
    /// # Errors
    ///
    /// Returns [`TablesError::InvalidCardPrefix`] when the prefix is empty or
    /// holds non-digits, and [`TablesError::CardLengthTooShort`] when the
    /// length leaves no room for the check digit.
    pub fn new(
        name: impl Into<String>,
        short_name: impl Into<String>,
        prefix: impl Into<String>,
        length: usize,
    ) -> Result<Self, TablesError> {
        let card_name = name.into();
        let digits = prefix.into();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TablesError::InvalidCardPrefix {
                name: card_name,
                prefix: digits,
            });
        }
        if length <= digits.len() {
            return Err(TablesError::CardLengthTooShort {
                name: card_name,
                length,
                prefix: digits,
            });
        }
        Ok(Self {
            name: card_name,
            short_name: short_name.into(),
            prefix: digits,
            length,
        })
    }

    /// Returns the issuer's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the issuer's short name, as accepted by `cc`.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Returns the leading digits every number of this type carries.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the total number length, check digit included.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) || self.short_name.eq_ignore_ascii_case(name)
    }
}

/// A named group of file extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCategory {
    name: String,
    extensions: Vec<String>,
}

impl FileCategory {
    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns [`TablesError::EmptyFileCategory`] when `extensions` is empty.
    pub fn new(name: impl Into<String>, extensions: Vec<String>) -> Result<Self, TablesError> {
        let category = name.into();
        if extensions.is_empty() {
            return Err(TablesError::EmptyFileCategory { category });
        }
        Ok(Self {
            name: category,
            extensions,
        })
    }

    /// Returns the category name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the extensions in this category.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

/// Character class of a BBAN segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BbanClass {
    /// `n`: decimal digits.
    Digit,
    /// `a`: upper-case letters.
    Upper,
    /// `c`: digits and upper-case letters.
    Alphanumeric,
}

impl BbanClass {
    /// Characters a segment of this class draws from.
    #[must_use]
    pub const fn pool(self) -> &'static str {
        match self {
            Self::Digit => "0123456789",
            Self::Upper => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            Self::Alphanumeric => "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ",
        }
    }

    const fn code(self) -> char {
        match self {
            Self::Digit => 'n',
            Self::Upper => 'a',
            Self::Alphanumeric => 'c',
        }
    }

    const fn from_code(code: char) -> Option<Self> {
        match code {
            'n' => Some(Self::Digit),
            'a' => Some(Self::Upper),
            'c' => Some(Self::Alphanumeric),
            _ => None,
        }
    }
}

/// A run of `count` characters of one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BbanSegment {
    /// Number of characters in the run.
    pub count: usize,
    /// Character class of the run.
    pub class: BbanClass,
}

/// The BBAN layout of one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IbanFormat {
    country: String,
    segments: Vec<BbanSegment>,
}

impl IbanFormat {
    /// Parses a compact pattern such as `4a14n`.
    ///
    /// # Errors
    ///
    /// Returns [`TablesError::InvalidIbanFormat`] when the country is not two
    /// upper-case letters, the pattern is empty or malformed, or the BBAN
    /// would exceed [`MAX_BBAN_LENGTH`] characters.
    ///
    /// # Example
    ///
    /// ```
    /// use chancery::tables::IbanFormat;
    ///
    /// let format = IbanFormat::parse("GB", "4a14n").expect("valid pattern");
    /// assert_eq!(format.bban_length(), 18);
    /// assert_eq!(format.pattern(), "4a14n");
    /// ```
    pub fn parse(country: &str, pattern: &str) -> Result<Self, TablesError> {
        let invalid = || TablesError::InvalidIbanFormat {
            country: country.to_owned(),
            pattern: pattern.to_owned(),
        };
        if country.len() != 2 || !country.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(invalid());
        }

        let mut segments = Vec::new();
        let mut count = 0_usize;
        let mut total = 0_usize;
        for c in pattern.chars() {
            if let Some(digit) = c.to_digit(10) {
                count = count
                    .checked_mul(10)
                    .and_then(|value| value.checked_add(digit as usize))
                    .ok_or_else(invalid)?;
            } else {
                let class = BbanClass::from_code(c).ok_or_else(invalid)?;
                if count == 0 {
                    return Err(invalid());
                }
                total = total
                    .checked_add(count)
                    .filter(|length| *length <= MAX_BBAN_LENGTH)
                    .ok_or_else(invalid)?;
                segments.push(BbanSegment { count, class });
                count = 0;
            }
        }
        if count != 0 || segments.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            country: country.to_owned(),
            segments,
        })
    }

    /// Returns the ISO 3166 country code.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the BBAN segments in order.
    #[must_use]
    pub fn segments(&self) -> &[BbanSegment] {
        &self.segments
    }

    /// Returns the BBAN length in characters.
    #[must_use]
    pub fn bban_length(&self) -> usize {
        self.segments.iter().map(|segment| segment.count).sum()
    }

    /// Renders the compact pattern this format was parsed from.
    #[must_use]
    pub fn pattern(&self) -> String {
        self.segments
            .iter()
            .map(|segment| format!("{}{}", segment.count, segment.class.code()))
            .collect()
    }
}

/// Reference data consulted by the generators.
///
/// # Example
///
/// ```
/// use chancery::DataTables;
///
/// let json = r#"{
///     "version": 1,
///     "fileExtensions": [{"category": "audio", "extensions": ["mp3", "ogg"]}]
/// }"#;
///
/// let tables = DataTables::from_json(json).expect("valid tables");
/// assert_eq!(tables.file_category_names(), vec!["audio".to_owned()]);
/// assert!(tables.card_type("visa").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTables {
    card_types: Vec<CardType>,
    file_categories: Vec<FileCategory>,
    iban_formats: Vec<IbanFormat>,
}

impl Default for DataTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DataTables {
    /// Returns the built-in tables.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            card_types: builtin::card_types(),
            file_categories: builtin::file_categories(),
            iban_formats: builtin::iban_formats(),
        }
    }

    /// Parses a tables document, falling back to the built-in table for any
    /// section the document omits.
    ///
    /// # Errors
    ///
    /// Returns [`TablesError`] if:
    /// - The JSON is malformed
    /// - The version is unsupported
    /// - A supplied section is empty or holds an invalid entry
    pub fn from_json(json: &str) -> Result<Self, TablesError> {
        let raw: RawTables = serde_json::from_str(json).map_err(|e| TablesError::ParseError {
            message: e.to_string(),
        })?;

        Self::from_raw(raw)
    }

    /// Loads a tables document relative to a directory capability.
    ///
    /// # Errors
    ///
    /// Returns [`TablesError::IoError`] if the file cannot be read, or any
    /// error from [`DataTables::from_json`].
    pub fn from_file(dir: &Dir, path: &Utf8Path) -> Result<Self, TablesError> {
        let contents = dir
            .read_to_string(path)
            .map_err(|e| TablesError::IoError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawTables) -> Result<Self, TablesError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(TablesError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let mut tables = Self::builtin();

        if let Some(raw_cards) = raw.card_types {
            let cards = raw_cards
                .into_iter()
                .map(|card| CardType::new(card.name, card.short_name, card.prefix, card.length))
                .collect::<Result<Vec<_>, _>>()?;
            tables = tables.with_card_types(cards)?;
        }

        if let Some(raw_categories) = raw.file_extensions {
            let categories = raw_categories
                .into_iter()
                .map(|category| FileCategory::new(category.category, category.extensions))
                .collect::<Result<Vec<_>, _>>()?;
            tables = tables.with_file_extensions(categories)?;
        }

        if let Some(raw_formats) = raw.iban_formats {
            let formats = raw_formats
                .iter()
                .map(|format| IbanFormat::parse(&format.country, &format.pattern))
                .collect::<Result<Vec<_>, _>>()?;
            tables = tables.with_iban_formats(formats)?;
        }

        Ok(tables)
    }

    /// Returns a copy with the card types replaced.
    ///
    /// # Errors
    ///
    /// Returns [`TablesError::EmptyCardTypes`] when `card_types` is empty.
    pub fn with_card_types(&self, card_types: Vec<CardType>) -> Result<Self, TablesError> {
        if card_types.is_empty() {
            return Err(TablesError::EmptyCardTypes);
        }
        Ok(Self {
            card_types,
            ..self.clone()
        })
    }

    /// Returns a copy with the file extension categories replaced.
    ///
    /// # Errors
    ///
    /// Returns [`TablesError::EmptyFileCategories`] when `categories` is
    /// empty and [`TablesError::DuplicateFileCategory`] when a name repeats.
    pub fn with_file_extensions(
        &self,
        categories: Vec<FileCategory>,
    ) -> Result<Self, TablesError> {
        if categories.is_empty() {
            return Err(TablesError::EmptyFileCategories);
        }
        for (index, category) in categories.iter().enumerate() {
            let repeated = categories
                .iter()
                .take(index)
                .any(|earlier| earlier.name == category.name);
            if repeated {
                return Err(TablesError::DuplicateFileCategory {
                    category: category.name.clone(),
                });
            }
        }
        Ok(Self {
            file_categories: categories,
            ..self.clone()
        })
    }

    /// Returns a copy with the IBAN formats replaced.
    ///
    /// # Errors
    ///
    /// Returns [`TablesError::EmptyIbanFormats`] when `formats` is empty.
    pub fn with_iban_formats(&self, formats: Vec<IbanFormat>) -> Result<Self, TablesError> {
        if formats.is_empty() {
            return Err(TablesError::EmptyIbanFormats);
        }
        Ok(Self {
            iban_formats: formats,
            ..self.clone()
        })
    }

    /// Returns every card type in table order.
    #[must_use]
    pub fn card_types(&self) -> &[CardType] {
        &self.card_types
    }

    /// Finds a card type by display or short name, ignoring ASCII case.
    #[must_use]
    pub fn card_type(&self, name: &str) -> Option<&CardType> {
        self.card_types.iter().find(|card| card.matches(name))
    }

    /// Returns every file category in table order.
    #[must_use]
    pub fn file_categories(&self) -> &[FileCategory] {
        &self.file_categories
    }

    /// Finds a file category by exact name.
    #[must_use]
    pub fn file_category(&self, name: &str) -> Option<&FileCategory> {
        self.file_categories
            .iter()
            .find(|category| category.name == name)
    }

    /// Returns the file category names in table order.
    #[must_use]
    pub fn file_category_names(&self) -> Vec<String> {
        self.file_categories
            .iter()
            .map(|category| category.name.clone())
            .collect()
    }

    /// Returns every IBAN format in table order.
    #[must_use]
    pub fn iban_formats(&self) -> &[IbanFormat] {
        &self.iban_formats
    }

    /// Finds the IBAN format for a country code, ignoring ASCII case.
    #[must_use]
    pub fn iban_format(&self, country: &str) -> Option<&IbanFormat> {
        self.iban_formats
            .iter()
            .find(|format| format.country.eq_ignore_ascii_case(country))
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTables {
    version: u32,
    #[serde(default)]
    card_types: Option<Vec<RawCardType>>,
    #[serde(default)]
    file_extensions: Option<Vec<RawFileCategory>>,
    #[serde(default)]
    iban_formats: Option<Vec<RawIbanFormat>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCardType {
    name: String,
    short_name: String,
    prefix: String,
    length: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFileCategory {
    category: String,
    extensions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIbanFormat {
    country: String,
    pattern: String,
}
