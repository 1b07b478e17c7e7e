#![forbid(unsafe_code)]

//! Small client-side localization core.
//!
//! Stores language dictionaries, tracks the active language, formats
//! templates with positional `{N}` placeholders and tells listeners when the
//! language or the dictionaries change.
//!
//! # How it fits together
//!
//! [`Localizer`] owns a [`DictionarySet`] (language → [`LanguageTable`]) and
//! the active language. [`Localizer::translate`] resolves a key and hands the
//! template to [`format`]. Mutations notify every [`ChangeListener`] with a
//! [`ChangeKind`]. Dictionaries come from host code, from the JSON in-memory
//! form, or from an XML document fetched through a [`DocumentSource`].
//!
//! Attribute-driven translation of element trees lives in the
//! `localizable-dom` crate and only uses the public API of this one.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod format;
pub mod localizer;
pub mod notify;
pub mod source;
pub mod xml;

pub use config::{LocalizerConfig, Selectors, SyncConfig};
pub use dictionary::{DictionarySet, LanguageTable};
pub use error::{LocalizableError, Result};
pub use format::{format, placeholder_indices};
pub use localizer::Localizer;
pub use notify::{ChangeKind, ChangeListener, ListenerHandle, Notifier};
pub use source::{Completion, DocumentSource, FileSource, StaticSource};
pub use xml::parse_dictionary_document;
