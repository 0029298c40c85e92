//! Error types for medtag.

use thiserror::Error;

/// Result type for medtag operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for medtag operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The concept extractor reported a failure.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// A position encoding could not be parsed.
    #[error("Position format error: {0}")]
    PositionFormat(String),

    /// Sentence input violated a structural invariant.
    #[error("Invalid sentence: {0}")]
    InvalidSentence(String),
}

impl Error {
    /// Create an extraction error.
    pub fn extraction(msg: impl Into<String>) -> Self {
        Error::Extraction(msg.into())
    }

    /// Create a position format error.
    pub fn position_format(msg: impl Into<String>) -> Self {
        Error::PositionFormat(msg.into())
    }

    /// Create an invalid sentence error.
    pub fn invalid_sentence(msg: impl Into<String>) -> Self {
        Error::InvalidSentence(msg.into())
    }
}
