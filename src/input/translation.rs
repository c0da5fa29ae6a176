//! Translation file input definitions

use std::collections::BTreeMap;
use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;

use crate::store::LoadError;

/// Extension of package translation files.
pub const TRANSLATION_FILE_EXTENSION: &str = "json";

/// A node of a translation tree.
///
/// Translation files are nested maps with string leaves; lists are kept for
/// grouped values such as option labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationValue {
    Text(String),
    Group(BTreeMap<String, TranslationValue>),
    List(Vec<TranslationValue>),
}

impl TranslationValue {
    /// Returns the text of a leaf node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Group(_) | Self::List(_) => None,
        }
    }

    /// Returns the entries of a group node.
    #[must_use]
    pub const fn as_group(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Group(map) => Some(map),
            Self::Text(_) | Self::List(_) => None,
        }
    }

    /// Looks up a dot-separated path.
    ///
    /// A key containing the literal path wins over walking the segments, so
    /// `{"a.b": "x"}` resolves `a.b` as well as `{"a": {"b": "x"}}` does.
    /// Numeric segments index into lists.
    ///
    /// # Examples
    /// ```
    /// use package_i18n_resolver::input::translation::TranslationValue;
    /// use serde_json::json;
    ///
    /// let tree = TranslationValue::from(json!({"cart": {"empty": "Your cart is empty"}}));
    /// let found = tree.lookup("cart.empty").and_then(TranslationValue::as_text);
    /// assert_eq!(found, Some("Your cart is empty"));
    /// assert!(tree.lookup("cart.missing").is_none());
    /// ```
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Self> {
        if let Self::Group(map) = self
            && let Some(value) = map.get(path)
        {
            return Some(value);
        }

        path.split('.').try_fold(self, |node, segment| match node {
            Self::Group(map) => map.get(segment),
            Self::List(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
            Self::Text(_) => None,
        })
    }

    /// Adds the top-level entries of `other` to `self`, overwriting duplicates.
    ///
    /// Nested groups are replaced wholesale, not merged.
    pub fn merge_shallow(&mut self, other: Self) {
        match (self, other) {
            (Self::Group(current), Self::Group(incoming)) => current.extend(incoming),
            (current, incoming) => *current = incoming,
        }
    }
}

impl From<Value> for TranslationValue {
    fn from(json: Value) -> Self {
        match json {
            Value::Object(map) => {
                Self::Group(map.into_iter().map(|(key, value)| (key, Self::from(value))).collect())
            }
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::String(s) => Self::Text(s),
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<&TranslationValue> for Value {
    fn from(value: &TranslationValue) -> Self {
        match value {
            TranslationValue::Text(text) => Self::String(text.clone()),
            TranslationValue::Group(map) => {
                Self::Object(map.iter().map(|(key, value)| (key.clone(), Self::from(value))).collect())
            }
            TranslationValue::List(items) => Self::Array(items.iter().map(Self::from).collect()),
        }
    }
}

/// Leaves print as-is; groups and lists print as compact JSON.
impl fmt::Display for TranslationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Group(_) | Self::List(_) => write!(f, "{}", Value::from(self)),
        }
    }
}

/// Returns true if a directory name looks like a locale code (`en`, `en_US`).
#[must_use]
pub const fn is_locale_dir_name(name: &str) -> bool {
    matches!(name.len(), 2 | 5)
}

/// Builds `{base}/{locale}/{package}.json`.
#[must_use]
pub fn translation_file_path(base_lang_path: &Path, locale: &str, package: &str) -> PathBuf {
    base_lang_path.join(locale).join(format!("{package}.{TRANSLATION_FILE_EXTENSION}"))
}

/// Load a translation file into a tree.
///
/// Files are parsed as JSONC, so comments and trailing commas are accepted.
/// The top level is returned as-is; callers decide whether a non-mapping
/// document is acceptable.
///
/// # Errors
/// Returns error if the file cannot be read or parsed, or contains no value.
pub fn load_translation_file(file_path: &Path) -> Result<TranslationValue, LoadError> {
    let content = std::fs::read_to_string(file_path)?;

    let json = jsonc_parser::parse_to_serde_value(&content, &jsonc_parser::ParseOptions::default())
        .map_err(|e| LoadError::Parse(e.to_string()))?
        .ok_or(LoadError::Empty)?;

    Ok(TranslationValue::from(json))
}
