#![forbid(unsafe_code)]

//! XML dictionary documents.
//!
//! ```xml
//! <dictionaries>
//!   <dictionary language="en-US">
//!     <translation key="Hi">Hello, {0}!</translation>
//!   </dictionary>
//!   <dictionary language="sv-SE">
//!     <translation key="Hi">Hej, {0}!</translation>
//!   </dictionary>
//! </dictionaries>
//! ```
//!
//! Every `dictionary` element, at any depth, with a `language` attribute
//! becomes one [`LanguageTable`]; every `translation` element inside it with a
//! `key` attribute contributes its text content as the template. Text is kept
//! verbatim (no trimming) with entities unescaped and CDATA included. A later
//! duplicate key, or a later `dictionary` for the same language, replaces the
//! earlier one.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, warn};

use crate::dictionary::{DictionarySet, LanguageTable};
use crate::error::{LocalizableError, Result};

const DICTIONARY: &[u8] = b"dictionary";
const TRANSLATION: &[u8] = b"translation";
const LANGUAGE_ATTR: &[u8] = b"language";
const KEY_ATTR: &[u8] = b"key";

/// An open `dictionary` element.
struct OpenDictionary {
    depth: usize,
    /// `None` when the element had no `language` attribute; its content is
    /// skipped.
    language: Option<String>,
    table: LanguageTable,
}

/// An open `translation` element collecting its text content.
struct OpenTranslation {
    depth: usize,
    key: String,
    text: String,
}

/// Parse an XML dictionary document into a fresh [`DictionarySet`].
///
/// # Errors
///
/// Returns [`LocalizableError::Xml`] for malformed XML and
/// [`LocalizableError::MalformedDictionary`] when the document ends with
/// unclosed elements.
pub fn parse_dictionary_document(text: &str) -> Result<DictionarySet> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut set = DictionarySet::new();
    let mut depth = 0usize;
    let mut dictionary: Option<OpenDictionary> = None;
    let mut translation: Option<OpenTranslation> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                open_element(&e, depth, &mut dictionary, &mut translation)?;
            }
            Event::Empty(e) => {
                // Self-closing: open and close at the same depth.
                let level = depth + 1;
                open_element(&e, level, &mut dictionary, &mut translation)?;
                close_element(level, &mut set, &mut dictionary, &mut translation);
            }
            Event::Text(t) => {
                if let Some(open) = translation.as_mut() {
                    open.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some(open) = translation.as_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(_) => {
                close_element(depth, &mut set, &mut dictionary, &mut translation);
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(LocalizableError::malformed(format!(
            "document ended with {depth} unclosed element(s)"
        )));
    }

    debug!(
        languages = set.len(),
        translations = set.translation_count(),
        "parsed dictionary document"
    );
    Ok(set)
}

fn open_element(
    e: &BytesStart<'_>,
    depth: usize,
    dictionary: &mut Option<OpenDictionary>,
    translation: &mut Option<OpenTranslation>,
) -> Result<()> {
    let name = e.local_name();
    if name.as_ref() == DICTIONARY && dictionary.is_none() {
        let language = attribute(e, LANGUAGE_ATTR)?;
        if language.is_none() {
            warn!(depth, "skipping dictionary element without a language attribute");
        }
        *dictionary = Some(OpenDictionary {
            depth,
            language,
            table: LanguageTable::new(),
        });
    } else if name.as_ref() == TRANSLATION && translation.is_none() {
        let Some(open) = dictionary.as_ref() else {
            return Ok(());
        };
        if open.language.is_none() {
            return Ok(());
        }
        match attribute(e, KEY_ATTR)? {
            Some(key) => {
                *translation = Some(OpenTranslation {
                    depth,
                    key,
                    text: String::new(),
                });
            }
            None => debug!(depth, "skipping translation element without a key attribute"),
        }
    }
    Ok(())
}

fn close_element(
    depth: usize,
    set: &mut DictionarySet,
    dictionary: &mut Option<OpenDictionary>,
    translation: &mut Option<OpenTranslation>,
) {
    if translation.as_ref().is_some_and(|t| t.depth == depth) {
        if let (Some(done), Some(open)) = (translation.take(), dictionary.as_mut()) {
            open.table.insert(done.key, done.text);
        }
    }
    if dictionary.as_ref().is_some_and(|d| d.depth == depth) {
        if let Some(OpenDictionary {
            language: Some(language),
            table,
            ..
        }) = dictionary.take()
        {
            set.insert_language(language, table);
        }
    }
}

fn attribute(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
