#![forbid(unsafe_code)]

//! Where dictionary documents come from.
//!
//! A [`DocumentSource`] delivers raw document text through a completion
//! callback. It may complete immediately, later (from the host's event
//! loop), or never. There is no cancellation, timeout or retry; a source
//! that never completes simply means no dictionaries are loaded.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Completion callback receiving the fetched document text.
pub type Completion = Box<dyn FnOnce(String)>;

/// Fetches document text for a location.
pub trait DocumentSource {
    /// Start fetching `location`; call `on_complete` with the text on
    /// success. On failure the completion is dropped without being called.
    fn fetch(&self, location: &str, on_complete: Completion);
}

/// Reads documents from the local filesystem, relative to a base directory.
///
/// Completes synchronously inside [`DocumentSource::fetch`].
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    base: PathBuf,
}

impl FileSource {
    /// Resolve locations against `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Base directory locations are resolved against.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl DocumentSource for FileSource {
    fn fetch(&self, location: &str, on_complete: Completion) {
        let path = self.base.join(location);
        match std::fs::read_to_string(&path) {
            Ok(text) => on_complete(text),
            Err(err) => warn!(path = %path.display(), error = %err, "document fetch failed"),
        }
    }
}

/// Serves a fixed text for every location. Useful for embedded documents.
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl DocumentSource for StaticSource {
    fn fetch(&self, _location: &str, on_complete: Completion) {
        on_complete(self.text.clone());
    }
}
