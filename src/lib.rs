//! # medtag
//!
//! Medical concept tagging for offset-tokenized sentences.
//!
//! An external medical-concept extractor reports *where* a concept occurred
//! as a 1-based character-position string in one of several formats; the
//! sentence pipeline reports *tokens* as a 0-based character-offset array.
//! This crate reconciles the two: it parses the position encodings,
//! classifies each concept into a closed label set, and writes per-token
//! entity labels and concept identifiers onto the sentence.
//!
//! - **Span parsing**: `"10/8"`, `"[10/8],[20/4]"`, `"10/8;20/4"`, all
//!   normalized to 0-based [`Span`]s
//! - **Classification**: disease-or-syndrome and sign-or-symptom semantic
//!   codes map to [`EntityLabel::Disease`] / [`EntityLabel::Symptom`];
//!   anything else is ignored
//! - **Alignment**: exact offset match, multi-token continuation, and
//!   `"|"`-merging of identifiers when concepts share a token
//!
//! ## Quick Start
//!
//! ```rust
//! use medtag::{ConceptRecord, ConceptTagger, MockExtractor, Sentence};
//!
//! let extractor = MockExtractor::new().with_concepts(vec![
//!     ConceptRecord::new("C0011849")
//!         .with_semtypes("[dsyn]")
//!         .with_pos_info("10/8"),
//! ]);
//! let tagger = ConceptTagger::new(extractor);
//!
//! let sentence = Sentence::with_offsets("John has diabetes.", vec![0, 5, 9, 17]).unwrap();
//! let tagged = tagger.tag(sentence).unwrap();
//!
//! assert_eq!(tagged.entity_types(), ["O", "O", "Disease", "O"]);
//! assert_eq!(tagged.entity_cids(), ["O", "O", "C0011849", "O"]);
//! ```
//!
//! ## Design Philosophy
//!
//! - **Injected extractor**: the extractor client is a capability handed to
//!   [`ConceptTagger::new`], never resolved from the environment
//! - **Record-per-token**: labels and identifiers live on one [`Token`]
//!   record, so index alignment holds by construction; the pipeline's
//!   parallel-array shape is accepted and produced at the boundary
//! - **Skip, don't abort**: a malformed concept drops that concept only;
//!   the rest of the sentence still tags
//! - **Stateless core**: one sentence in, one mutated sentence out; no
//!   state survives a call

#![warn(missing_docs)]

pub mod concept;
mod error;
pub mod sentence;
pub mod span;
mod tagger;

pub use concept::{classify_semtypes, ConceptRecord, EntityLabel, DISEASE_CODE, SYMPTOM_CODE};
pub use error::{Error, Result};
pub use sentence::{Sentence, Token, OUTSIDE};
pub use span::{first_span, parse_position_info, Span};
pub use tagger::ConceptTagger;

/// Client handle for an external concept extractor.
///
/// The extractor is an already-initialized external collaborator (a process
/// wrapper, a service client); implementations own its transport, timeouts,
/// and lifecycle. The tagger only ever calls [`extract`](Self::extract)
/// with pre-normalized ASCII text and consumes the returned records.
///
/// An `Err` return models the extractor's error channel; the tagger
/// surfaces it to the caller verbatim and leaves the sentence unmodified.
pub trait ConceptExtractor: Send + Sync {
    /// Extract concept records from one sentence's text.
    ///
    /// # Errors
    ///
    /// [`Error::Extraction`] when the extractor call fails.
    fn extract(&self, text: &str) -> Result<Vec<ConceptRecord>>;
}

impl<E: ConceptExtractor + ?Sized> ConceptExtractor for Box<E> {
    fn extract(&self, text: &str) -> Result<Vec<ConceptRecord>> {
        (**self).extract(text)
    }
}

impl<E: ConceptExtractor + ?Sized> ConceptExtractor for std::sync::Arc<E> {
    fn extract(&self, text: &str) -> Result<Vec<ConceptRecord>> {
        (**self).extract(text)
    }
}

/// A canned-response extractor for tests.
///
/// Returns the configured records for every input, or the configured error.
///
/// # Example
///
/// ```rust
/// use medtag::{ConceptExtractor, ConceptRecord, MockExtractor};
///
/// let mock = MockExtractor::new().with_concepts(vec![
///     ConceptRecord::new("C0011849").with_semtypes("[dsyn]").with_pos_info("10/8"),
/// ]);
/// assert_eq!(mock.extract("any text").unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockExtractor {
    concepts: Vec<ConceptRecord>,
    error: Option<String>,
}

impl MockExtractor {
    /// Create a mock that extracts nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the records returned on every call.
    #[must_use]
    pub fn with_concepts(mut self, concepts: Vec<ConceptRecord>) -> Self {
        self.concepts = concepts;
        self
    }

    /// Make every call fail with an extraction error.
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}

impl ConceptExtractor for MockExtractor {
    fn extract(&self, _text: &str) -> Result<Vec<ConceptRecord>> {
        match &self.error {
            Some(message) => Err(Error::extraction(message.clone())),
            None => Ok(self.concepts.clone()),
        }
    }
}

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use medtag::prelude::*;
    //!
    //! let tagger = ConceptTagger::new(MockExtractor::new());
    //! let tagged = tagger.tag(Sentence::new("")).unwrap();
    //! assert!(tagged.is_untagged());
    //! ```
    pub use crate::concept::{ConceptRecord, EntityLabel};
    pub use crate::error::{Error, Result};
    pub use crate::sentence::{Sentence, Token};
    pub use crate::span::Span;
    pub use crate::{ConceptExtractor, ConceptTagger, MockExtractor};
}
