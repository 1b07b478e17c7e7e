#![forbid(unsafe_code)]

//! Language tables and the dictionary set.
//!
//! A [`DictionarySet`] maps a language identifier (e.g. `"en-US"`) to a
//! [`LanguageTable`], which maps a translation key to a template string.
//! Keys are unique within a table; inserting an existing key replaces the
//! previous template.

use std::collections::HashMap;

use serde_json::Value;

use crate::format::placeholder_indices;

/// Key → template mapping for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTable {
    entries: HashMap<String, String>,
}

impl LanguageTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a template, replacing any previous template for `key`.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }

    /// Look up the template for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over `(key, template)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Highest placeholder index used by the template for `key`, if any.
    #[must_use]
    pub fn arity(&self, key: &str) -> Option<usize> {
        self.get(key)
            .and_then(|template| placeholder_indices(template).into_iter().max())
            .map(|max| max + 1)
    }

    fn from_json_object(object: &serde_json::Map<String, Value>) -> Self {
        let mut table = Self::new();
        for (key, value) in object {
            if let Value::String(template) = value {
                table.insert(key.clone(), template.clone());
            } else {
                tracing::debug!(key = %key, "skipping non-string template");
            }
        }
        table
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LanguageTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, template) in iter {
            table.insert(key, template);
        }
        table
    }
}

/// Language id → [`LanguageTable`] mapping.
///
/// # Example
///
/// ```
/// use localizable::{DictionarySet, LanguageTable};
///
/// let mut set = DictionarySet::new();
/// set.insert_language("en-US", LanguageTable::from_iter([("WelcomeMessage", "Welcome, {0}!")]));
/// set.insert_language("sv-SE", LanguageTable::from_iter([("WelcomeMessage", "Välkommen, {0}!")]));
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(
///     set.language("sv-SE").and_then(|t| t.get("WelcomeMessage")),
///     Some("Välkommen, {0}!")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionarySet {
    languages: HashMap<String, LanguageTable>,
}

impl DictionarySet {
    /// Create an empty dictionary set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the table for `language`.
    pub fn insert_language(&mut self, language: impl Into<String>, table: LanguageTable) {
        self.languages.insert(language.into(), table);
    }

    /// Mutable access to the table for `language`, creating it if absent.
    pub fn language_mut(&mut self, language: impl Into<String>) -> &mut LanguageTable {
        self.languages.entry(language.into()).or_default()
    }

    /// Look up the table for `language`.
    #[must_use]
    pub fn language(&self, language: &str) -> Option<&LanguageTable> {
        self.languages.get(language)
    }

    /// Whether a table exists for `language`.
    #[must_use]
    pub fn contains_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Look up `key` in `language`. Both lookups are explicit; a miss on
    /// either returns `None`.
    #[must_use]
    pub fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        self.language(language).and_then(|table| table.get(key))
    }

    /// All language ids, sorted for deterministic output.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Whether no languages are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Total number of translations across every language.
    #[must_use]
    pub fn translation_count(&self) -> usize {
        self.languages.values().map(LanguageTable::len).sum()
    }

    /// Build a set from the in-memory JSON form
    /// `{ "<language>": { "<key>": "<template>" } }`.
    ///
    /// Returns `None` when `value` is not an object or when any language
    /// entry is not an object. Non-string templates inside a well-formed
    /// table are skipped.
    #[must_use]
    pub fn from_json_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut set = Self::new();
        for (language, table) in object {
            let table = table.as_object()?;
            set.insert_language(language.clone(), LanguageTable::from_json_object(table));
        }
        Some(set)
    }

    /// Sorted, deduplicated union of keys across all languages.
    #[must_use]
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .languages
            .values()
            .flat_map(|table| table.keys().map(String::from))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Keys present in some language but missing from `language`, sorted.
    ///
    /// An unknown language is missing every key.
    #[must_use]
    pub fn missing_keys(&self, language: &str) -> Vec<String> {
        let table = self.language(language);
        self.all_keys()
            .into_iter()
            .filter(|key| !table.is_some_and(|t| t.contains_key(key)))
            .collect()
    }
}

impl FromIterator<(String, LanguageTable)> for DictionarySet {
    fn from_iter<I: IntoIterator<Item = (String, LanguageTable)>>(iter: I) -> Self {
        Self {
            languages: iter.into_iter().collect(),
        }
    }
}
