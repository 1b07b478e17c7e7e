#![forbid(unsafe_code)]

//! Attribute-driven translation of element trees.
//!
//! # Invariants
//!
//! 1. Only descendants of the root carrying the key attribute are written;
//!    the root itself is never translated.
//! 2. Parameters come from the params attribute split on `,` with no
//!    trimming; an absent or empty attribute means no parameters.
//! 3. Freezing only happens when [`SyncConfig::freeze_after_translate`] is on
//!    *and* the element carries a non-empty freeze flag attribute.

use std::cell::Cell;
use std::fmt::{self, Display};
use std::rc::Rc;

use localizable::{ListenerHandle, Localizer, LocalizerConfig, Selectors, SyncConfig};
use tracing::debug;

use crate::element::{Element, walk_descendants};

/// Writes translations into elements marked with the key attribute.
///
/// # Example
///
/// ```
/// use localizable::{DictionarySet, LanguageTable, Localizer};
/// use localizable_dom::{DocumentSync, MemoryElement};
///
/// let mut set = DictionarySet::new();
/// set.insert_language("en-US", LanguageTable::from_iter([("WelcomeMessage", "Welcome, {0}!")]));
/// let localizer = Localizer::new(set, "en-US");
///
/// let mut body = MemoryElement::new("body").with_child(
///     MemoryElement::new("span")
///         .with_attribute("data-translate-key", "WelcomeMessage")
///         .with_attribute("data-translate-params", "Fish"),
/// );
///
/// let sync = DocumentSync::new(localizer);
/// assert_eq!(sync.translate_all(&mut body), 1);
/// assert_eq!(body.children()[0].content(), "Welcome, Fish!");
/// ```
pub struct DocumentSync {
    localizer: Localizer,
    selectors: Selectors,
    sync: SyncConfig,
    stale: Rc<Cell<bool>>,
    listener: Option<ListenerHandle>,
}

impl fmt::Debug for DocumentSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentSync")
            .field("localizer", &self.localizer)
            .field("selectors", &self.selectors)
            .field("sync", &self.sync)
            .field("stale", &self.stale.get())
            .field("attached", &self.listener.is_some())
            .finish()
    }
}

impl DocumentSync {
    /// Sync with default attribute names and freezing off.
    #[must_use]
    pub fn new(localizer: Localizer) -> Self {
        Self::with_parts(localizer, Selectors::default(), SyncConfig::default())
    }

    /// Sync using the selectors and freeze settings from `config`.
    #[must_use]
    pub fn from_config(localizer: Localizer, config: &LocalizerConfig) -> Self {
        Self::with_parts(localizer, config.selectors.clone(), config.sync.clone())
    }

    fn with_parts(localizer: Localizer, selectors: Selectors, sync: SyncConfig) -> Self {
        Self {
            localizer,
            selectors,
            sync,
            stale: Rc::new(Cell::new(false)),
            listener: None,
        }
    }

    #[must_use]
    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    #[must_use]
    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }

    /// Change the attribute names. See [`Selectors::set`].
    pub fn set_selectors(&mut self, key: &str, params: Option<&str>) -> &Selectors {
        self.selectors.set(key, params)
    }

    #[must_use]
    pub fn sync_config(&self) -> &SyncConfig {
        &self.sync
    }

    /// Turn "translate once, then freeze" on or off.
    pub fn set_freeze_after_translate(&mut self, enabled: bool) {
        self.sync.freeze_after_translate = enabled;
    }

    // -----------------------------------------------------------------
    // Passes
    // -----------------------------------------------------------------

    /// Translate every marked descendant of `root`.
    ///
    /// Returns the number of elements written.
    pub fn translate_all<E: Element>(&self, root: &mut E) -> usize {
        let mut written = 0;
        walk_descendants(root, &mut |element: &mut E| {
            if self.translate_element(element) {
                written += 1;
            }
        });
        self.stale.set(false);
        debug!(
            written,
            key_attribute = %self.selectors.key_attribute,
            "translated marked elements"
        );
        written
    }

    /// Restore the key attribute on every frozen descendant, then run
    /// [`translate_all`](Self::translate_all).
    pub fn translate_all_forced<E: Element>(&self, root: &mut E) -> usize {
        let key_attribute = self.selectors.key_attribute.as_str();
        let frozen_attribute = self.sync.frozen_attribute.as_str();
        walk_descendants(root, &mut |element: &mut E| {
            if let Some(key) = element.attribute(frozen_attribute) {
                element.set_attribute(key_attribute, &key);
            }
        });
        self.translate_all(root)
    }

    /// Translate one element if it carries the key attribute.
    ///
    /// Returns whether the element was written.
    pub fn translate_element<E: Element>(&self, element: &mut E) -> bool {
        let Some(key) = element.attribute(&self.selectors.key_attribute) else {
            return false;
        };
        let params = split_params(element.attribute(&self.selectors.params_attribute).as_deref());
        let args: Vec<&dyn Display> = params.iter().map(|p| p as &dyn Display).collect();
        element.set_content(&self.localizer.translate(&key, &args));

        if self.sync.freeze_after_translate
            && element
                .attribute(&self.sync.freeze_flag_attribute)
                .is_some_and(|flag| !flag.is_empty())
        {
            element.set_attribute(&self.sync.frozen_attribute, &key);
            element.remove_attribute(&self.selectors.key_attribute);
        }
        true
    }

    // -----------------------------------------------------------------
    // Change tracking
    // -----------------------------------------------------------------

    /// Subscribe to the localizer so any change marks this sync stale.
    ///
    /// Calling it again while attached does nothing.
    pub fn attach(&mut self) {
        if self.listener.is_some() {
            return;
        }
        let stale = Rc::clone(&self.stale);
        self.listener = Some(self.localizer.subscribe_fn(move |_| stale.set(true)));
    }

    /// Stop listening for changes.
    pub fn detach(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.localizer.unsubscribe(&listener);
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    /// Whether a change arrived since the last pass.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }

    /// Run [`translate_all`](Self::translate_all) if a change arrived since
    /// the last pass.
    pub fn refresh_if_stale<E: Element>(&self, root: &mut E) -> Option<usize> {
        self.is_stale().then(|| self.translate_all(root))
    }
}

impl Drop for DocumentSync {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Split a params attribute value on `,`. `None` or `""` gives no params.
#[must_use]
pub fn split_params(value: Option<&str>) -> Vec<String> {
    match value {
        Some(value) if !value.is_empty() => value.split(',').map(str::to_owned).collect(),
        _ => Vec::new(),
    }
}
