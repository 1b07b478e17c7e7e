use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocalizableError>;

/// Failures from loading dictionaries and configuration.
///
/// Translation misses are never errors; they resolve to an empty string.
#[derive(Debug, Error)]
pub enum LocalizableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("malformed dictionary: {message}")]
    MalformedDictionary { message: String },

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl LocalizableError {
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDictionary {
            message: message.into(),
        }
    }
}
