#![forbid(unsafe_code)]

//! Localizer configuration.
//!
//! [`LocalizerConfig`] gathers the tunables a host usually keeps in a file:
//! the start-up language, the element attribute names used by attribute
//! sync, and the optional "translate once, then freeze" behavior.
//!
//! ```toml
//! default_language = "sv-SE"
//!
//! [selectors]
//! key_attribute = "data-translate-key"
//! params_attribute = "data-translate-params"
//!
//! [sync]
//! freeze_after_translate = true
//! ```
//!
//! Every field has a default, so a partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LocalizableError, Result};

/// Default key attribute name.
pub const DEFAULT_KEY_ATTRIBUTE: &str = "data-translate-key";
/// Default parameters attribute name.
pub const DEFAULT_PARAMS_ATTRIBUTE: &str = "data-translate-params";
/// Default start-up language.
pub const DEFAULT_LANGUAGE: &str = "en-US";

// ---------------------------------------------------------------------------
// Top-level LocalizerConfig
// ---------------------------------------------------------------------------

/// Top-level configuration for a localizer and its attribute sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizerConfig {
    /// Language made active at start-up.
    pub default_language: String,

    /// Element attribute names read by attribute sync.
    pub selectors: Selectors,

    /// Freeze behavior for attribute sync.
    pub sync: SyncConfig,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.into(),
            selectors: Selectors::default(),
            sync: SyncConfig::default(),
        }
    }
}

impl LocalizerConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Validate all fields.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.default_language.trim().is_empty() {
            errors.push("default_language must not be empty".into());
        }

        let names = [
            ("selectors.key_attribute", &self.selectors.key_attribute),
            ("selectors.params_attribute", &self.selectors.params_attribute),
            ("sync.freeze_flag_attribute", &self.sync.freeze_flag_attribute),
            ("sync.frozen_attribute", &self.sync.frozen_attribute),
        ];

        for (field, value) in names {
            if value.is_empty() {
                errors.push(format!("{field} must not be empty"));
            } else if value.chars().any(char::is_whitespace) {
                errors.push(format!("{field} must not contain whitespace, got {value:?}"));
            }
        }

        for (i, (field_a, a)) in names.iter().enumerate() {
            for (field_b, b) in &names[i + 1..] {
                if !a.is_empty() && a == b {
                    errors.push(format!("{field_a} and {field_b} must differ, both are {a:?}"));
                }
            }
        }

        errors
    }

    /// Like [`validate`](Self::validate), but as a `Result`.
    pub fn validated(self) -> Result<Self> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(LocalizableError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// Attribute names that mark translatable elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Attribute holding the translation key.
    pub key_attribute: String,

    /// Attribute holding comma-separated parameters.
    pub params_attribute: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            key_attribute: DEFAULT_KEY_ATTRIBUTE.into(),
            params_attribute: DEFAULT_PARAMS_ATTRIBUTE.into(),
        }
    }
}

impl Selectors {
    /// Replace the attribute names.
    ///
    /// An empty `key` leaves both names unchanged. An empty or absent
    /// `params` keeps the current params attribute.
    pub fn set(&mut self, key: &str, params: Option<&str>) -> &Self {
        if key.is_empty() {
            return self;
        }
        self.key_attribute = key.to_owned();
        if let Some(params) = params.filter(|p| !p.is_empty()) {
            self.params_attribute = params.to_owned();
        }
        self
    }
}

// ---------------------------------------------------------------------------
// SyncConfig
// ---------------------------------------------------------------------------

/// "Translate once, then freeze" behavior for attribute sync.
///
/// Off by default. When on, an element carrying a non-empty
/// `freeze_flag_attribute` is translated once; its key attribute is then
/// removed and `frozen_attribute` records the key so a forced pass can
/// restore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub freeze_after_translate: bool,
    pub freeze_flag_attribute: String,
    pub frozen_attribute: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            freeze_after_translate: false,
            freeze_flag_attribute: "data-translation-no-reoccurances".into(),
            frozen_attribute: "data-translated".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates_clean() {
        let errors = LocalizerConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn defaults_match_documented_names() {
        let config = LocalizerConfig::default();
        assert_eq!(config.default_language, "en-US");
        assert_eq!(config.selectors.key_attribute, "data-translate-key");
        assert_eq!(config.selectors.params_attribute, "data-translate-params");
        assert!(!config.sync.freeze_after_translate);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = LocalizerConfig::from_toml_str(
            r#"
            default_language = "sv-SE"

            [sync]
            freeze_after_translate = true
            "#,
        )
        .unwrap();
        assert_eq!(config.default_language, "sv-SE");
        assert!(config.sync.freeze_after_translate);
        assert_eq!(config.sync.frozen_attribute, "data-translated");
        assert_eq!(config.selectors, Selectors::default());
    }

    #[test]
    fn json_round_trip() {
        let mut config = LocalizerConfig::default();
        config.selectors.set("data-i18n", Some("data-i18n-args"));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(LocalizerConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn file_loaders() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("localizable.toml");
        std::fs::write(&toml_path, "default_language = \"es-ES\"\n").unwrap();
        let json_path = dir.path().join("localizable.json");
        std::fs::write(&json_path, r#"{"default_language":"de-DE"}"#).unwrap();

        assert_eq!(
            LocalizerConfig::from_toml_file(&toml_path).unwrap().default_language,
            "es-ES"
        );
        assert_eq!(
            LocalizerConfig::from_json_file(&json_path).unwrap().default_language,
            "de-DE"
        );
        assert!(matches!(
            LocalizerConfig::from_toml_file(dir.path().join("missing.toml")),
            Err(LocalizableError::Io(_))
        ));
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(matches!(
            LocalizerConfig::from_toml_str("default_language = ["),
            Err(LocalizableError::Toml(_))
        ));
    }

    #[test]
    fn validate_catches_empty_language() {
        let mut config = LocalizerConfig::default();
        config.default_language = "  ".into();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("default_language")));
    }

    #[test]
    fn validate_catches_whitespace_attribute() {
        let mut config = LocalizerConfig::default();
        config.selectors.params_attribute = "data params".into();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("selectors.params_attribute")));
    }

    #[test]
    fn validate_catches_colliding_attributes() {
        let mut config = LocalizerConfig::default();
        config.sync.frozen_attribute = config.selectors.key_attribute.clone();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("must differ")));
        assert!(matches!(
            config.validated(),
            Err(LocalizableError::Validation(_))
        ));
    }

    #[test]
    fn selectors_set_rules() {
        let mut selectors = Selectors::default();
        selectors.set("", Some("ignored"));
        assert_eq!(selectors, Selectors::default());

        selectors.set("data-k", None);
        assert_eq!(selectors.key_attribute, "data-k");
        assert_eq!(selectors.params_attribute, DEFAULT_PARAMS_ATTRIBUTE);

        selectors.set("data-k2", Some(""));
        assert_eq!(selectors.params_attribute, DEFAULT_PARAMS_ATTRIBUTE);

        selectors.set("data-k3", Some("data-p3"));
        assert_eq!(selectors.key_attribute, "data-k3");
        assert_eq!(selectors.params_attribute, "data-p3");
    }
}
