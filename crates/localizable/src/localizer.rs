#![forbid(unsafe_code)]

//! The localizer: dictionary store, translator and change notifier.
//!
//! # Design
//!
//! [`Localizer`] is a cheap-to-clone handle to one shared state
//! (`Rc<..>`): the dictionary set, the active language and the listener
//! list. Clones see the same state and the same listeners. The handle is
//! `!Send`; it belongs to the thread that runs the host's UI loop. A
//! multi-threaded host should keep it on one owning thread.
//!
//! # Invariants
//!
//! 1. The dictionary set is only ever replaced wholesale, never merged.
//! 2. A mutation that leaves the value unchanged fires no notification:
//!    an empty or identical language, or the very same `Rc` set.
//! 3. No state borrow is held while listeners run, so listeners may read
//!    the localizer, translate, subscribe, unsubscribe or even mutate it.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing translation | Unknown language, unknown key, empty template | `translate` returns `""` |
//! | Malformed JSON dictionary | Not an object of objects | Ignored, no notification |
//! | Active language absent from new set | Configuration mismatch | `warn` log, table lookup returns `None` |
//! | Document fetch/parse failure | Source error or bad XML | `warn` log, no notification |

use std::cell::RefCell;
use std::fmt::{self, Display};
use std::rc::{Rc, Weak};

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::LocalizerConfig;
use crate::dictionary::{DictionarySet, LanguageTable};
use crate::error::Result;
use crate::format::format;
use crate::notify::{ChangeKind, ListenerHandle, Notifier};
use crate::source::DocumentSource;
use crate::xml::parse_dictionary_document;

struct State {
    dictionaries: Rc<DictionarySet>,
    language: Option<String>,
}

impl State {
    fn active_table(&self) -> Option<&LanguageTable> {
        let language = self.language.as_deref()?;
        self.dictionaries.language(language)
    }

    fn template(&self, key: &str) -> Option<&str> {
        self.active_table()
            .and_then(|table| table.get(key))
            .filter(|template| !template.is_empty())
    }
}

struct Inner {
    state: RefCell<State>,
    notifier: Notifier,
}

/// Shared handle to dictionaries, the active language and change listeners.
///
/// # Example
///
/// ```
/// use localizable::{DictionarySet, LanguageTable, Localizer};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let mut set = DictionarySet::new();
/// set.insert_language("en-US", LanguageTable::from_iter([("Hi", "Hello, {0}!")]));
/// set.insert_language("sv-SE", LanguageTable::from_iter([("Hi", "Hej, {0}!")]));
///
/// let localizer = Localizer::new(set, "en-US");
/// assert_eq!(localizer.translate("Hi", &[&"World"]), "Hello, World!");
///
/// let changes = Rc::new(Cell::new(0));
/// let seen = Rc::clone(&changes);
/// localizer.subscribe_fn(move |_| seen.set(seen.get() + 1));
///
/// localizer.set_language("sv-SE");
/// localizer.set_language("sv-SE");
/// assert_eq!(changes.get(), 1);
/// assert_eq!(localizer.translate("Hi", &[&"Världen"]), "Hej, Världen!");
/// assert_eq!(localizer.translate("Unknown", &[]), "");
/// ```
#[derive(Clone)]
pub struct Localizer {
    inner: Rc<Inner>,
}

impl fmt::Debug for Localizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Localizer")
            .field("language", &state.language)
            .field("languages", &state.dictionaries.languages())
            .field("listener_count", &self.inner.notifier.len())
            .finish()
    }
}

impl Default for Localizer {
    /// No dictionaries and no active language; every translation is `""`.
    fn default() -> Self {
        Self::from_parts(Rc::new(DictionarySet::new()), None)
    }
}

impl Localizer {
    /// Create a localizer with `dictionaries` and `language` active.
    ///
    /// Initialization fires no notifications.
    #[must_use]
    pub fn new(dictionaries: impl Into<Rc<DictionarySet>>, language: impl Into<String>) -> Self {
        let language = language.into();
        let language = (!language.is_empty()).then_some(language);
        Self::from_parts(dictionaries.into(), language)
    }

    /// Create a localizer using the configured default language.
    #[must_use]
    pub fn from_config(config: &LocalizerConfig, dictionaries: impl Into<Rc<DictionarySet>>) -> Self {
        Self::new(dictionaries, config.default_language.as_str())
    }

    fn from_parts(dictionaries: Rc<DictionarySet>, language: Option<String>) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(State {
                    dictionaries,
                    language,
                }),
                notifier: Notifier::new(),
            }),
        }
    }

    // -----------------------------------------------------------------
    // Active language
    // -----------------------------------------------------------------

    /// The active language, if one has been set.
    #[must_use]
    pub fn language(&self) -> Option<String> {
        self.inner.state.borrow().language.clone()
    }

    /// Make `id` the active language.
    ///
    /// An empty `id`, or the language that is already active, changes
    /// nothing. Otherwise listeners receive [`ChangeKind::LanguageChanged`].
    /// `id` is not checked against the dictionary set; an unknown language
    /// only shows up as empty translations. Returns the active language.
    pub fn set_language(&self, id: &str) -> Option<String> {
        {
            let mut state = self.inner.state.borrow_mut();
            if id.is_empty() || state.language.as_deref() == Some(id) {
                return state.language.clone();
            }
            state.language = Some(id.to_owned());
            if !state.dictionaries.contains_language(id) {
                debug!(language = id, "active language has no dictionary");
            }
        }
        debug!(language = id, "language changed");
        self.inner.notifier.notify(ChangeKind::LanguageChanged);
        Some(id.to_owned())
    }

    // -----------------------------------------------------------------
    // Dictionary set
    // -----------------------------------------------------------------

    /// The current dictionary set.
    #[must_use]
    pub fn dictionaries(&self) -> Rc<DictionarySet> {
        Rc::clone(&self.inner.state.borrow().dictionaries)
    }

    /// Replace the dictionary set wholesale.
    ///
    /// Passing the set that is already installed (the same `Rc`) changes
    /// nothing; any other set fires [`ChangeKind::DictionariesChanged`].
    /// Returns a copy of the active language's table, or `None` when the
    /// active language is unset or absent from the set.
    pub fn set_dictionaries(&self, dictionaries: impl Into<Rc<DictionarySet>>) -> Option<LanguageTable> {
        let dictionaries = dictionaries.into();
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            if Rc::ptr_eq(&state.dictionaries, &dictionaries) {
                false
            } else {
                debug!(
                    languages = dictionaries.len(),
                    translations = dictionaries.translation_count(),
                    "dictionaries replaced"
                );
                if let Some(language) = state.language.as_deref() {
                    if !dictionaries.contains_language(language) {
                        warn!(language, "active language is absent from the new dictionaries");
                    }
                }
                state.dictionaries = dictionaries;
                true
            }
        };
        if changed {
            self.inner.notifier.notify(ChangeKind::DictionariesChanged);
        }
        self.active_table()
    }

    /// Replace the dictionary set from the in-memory JSON form.
    ///
    /// A value that is not an object of objects is ignored: the previous
    /// set stays active and nothing is notified.
    pub fn set_dictionaries_json(&self, value: &Value) -> Option<LanguageTable> {
        match DictionarySet::from_json_value(value) {
            Some(set) => self.set_dictionaries(set),
            None => {
                debug!("ignoring malformed dictionary value");
                self.active_table()
            }
        }
    }

    /// A copy of the active language's table.
    #[must_use]
    pub fn active_table(&self) -> Option<LanguageTable> {
        self.inner.state.borrow().active_table().cloned()
    }

    // -----------------------------------------------------------------
    // Translation
    // -----------------------------------------------------------------

    /// The raw template for `key` in the active language.
    ///
    /// `None` when the language or key is missing, or the template is empty.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.inner.state.borrow().template(key).map(str::to_owned)
    }

    /// Translate `key` in the active language, filling `{N}` placeholders
    /// from `params`.
    ///
    /// Any miss yields `""`; translation never fails.
    #[must_use]
    pub fn translate(&self, key: &str, params: &[&dyn Display]) -> String {
        let state = self.inner.state.borrow();
        state
            .template(key)
            .map(|template| format(template, params))
            .unwrap_or_default()
    }

    /// Like [`translate`](Self::translate), but falls back to `default`
    /// when the translation is empty.
    #[must_use]
    pub fn translate_or(&self, key: &str, params: &[&dyn Display], default: &str) -> String {
        let translation = self.translate(key, params);
        if translation.is_empty() {
            default.to_owned()
        } else {
            translation
        }
    }

    // -----------------------------------------------------------------
    // Listeners
    // -----------------------------------------------------------------

    /// Register `listener`. The same listener may be registered twice.
    pub fn subscribe(&self, listener: ListenerHandle) {
        self.inner.notifier.subscribe(listener);
    }

    /// Register a closure and return its handle for [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe_fn(&self, listener: impl Fn(ChangeKind) + 'static) -> ListenerHandle {
        let handle: ListenerHandle = Rc::new(listener);
        self.subscribe(Rc::clone(&handle));
        handle
    }

    /// Remove the first registration of `listener`.
    ///
    /// Returns `false` when it was not registered.
    pub fn unsubscribe(&self, listener: &ListenerHandle) -> bool {
        self.inner.notifier.unsubscribe(listener)
    }

    /// Number of listener registrations.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.notifier.len()
    }

    // -----------------------------------------------------------------
    // Document loading
    // -----------------------------------------------------------------

    /// Parse an XML dictionary document and install it.
    ///
    /// # Errors
    ///
    /// Returns the parse error; the previous set stays active.
    pub fn load_xml_str(&self, text: &str) -> Result<Option<LanguageTable>> {
        let set = parse_dictionary_document(text)?;
        Ok(self.set_dictionaries(set))
    }

    /// Make `language` active and load dictionaries from `source`.
    ///
    /// The language is set without notification. When the source completes,
    /// the document is parsed and installed, firing exactly one
    /// [`ChangeKind::DictionariesChanged`]. A fetch that never completes, or
    /// a document that fails to parse, leaves everything as it was.
    pub fn load_document(&self, source: &dyn DocumentSource, location: &str, language: &str) {
        if !language.is_empty() {
            self.inner.state.borrow_mut().language = Some(language.to_owned());
        }

        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        let location_owned = location.to_owned();
        source.fetch(
            location,
            Box::new(move |text: String| {
                let Some(inner) = weak.upgrade() else {
                    debug!(location = %location_owned, "localizer dropped before document arrived");
                    return;
                };
                let localizer = Localizer { inner };
                if let Err(err) = localizer.load_xml_str(&text) {
                    warn!(location = %location_owned, error = %err, "dictionary document rejected");
                }
            }),
        );
    }
}
