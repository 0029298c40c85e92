//! Concept tagging over tokenized sentences.
//!
//! [`ConceptTagger`] wraps an injected [`ConceptExtractor`] and owns the
//! reconciliation between the extractor's character spans and the
//! tokenizer's offset array: classify each concept, find the token its span
//! starts on, write the label, merge the identifier, and extend across
//! however many consecutive tokens the span covers.

use log::debug;

use crate::concept::ConceptRecord;
use crate::error::Result;
use crate::sentence::Sentence;
use crate::span::{self, Span};
use crate::{ConceptExtractor, EntityLabel};

/// Tags sentences with the concepts an extractor finds in them.
///
/// Stateless and synchronous per call: one sentence in, one mutated
/// sentence out. The only owned resource is the extractor handle, supplied
/// at construction. Distinct sentences can be tagged from distinct workers
/// without coordination.
///
/// # Example
///
/// ```
/// use medtag::{ConceptRecord, ConceptTagger, MockExtractor, Sentence};
///
/// let extractor = MockExtractor::new().with_concepts(vec![
///     ConceptRecord::new("C0011849")
///         .with_semtypes("[dsyn]")
///         .with_pos_info("10/8"),
/// ]);
/// let tagger = ConceptTagger::new(extractor);
///
/// let sentence = Sentence::with_offsets("John has diabetes.", vec![0, 5, 9, 17])?;
/// let tagged = tagger.tag(sentence)?;
/// assert_eq!(tagged.entity_types(), ["O", "O", "Disease", "O"]);
/// # Ok::<(), medtag::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConceptTagger<E> {
    extractor: E,
}

impl<E: ConceptExtractor> ConceptTagger<E> {
    /// Create a tagger around an already-initialized extractor handle.
    #[must_use]
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    /// Borrow the wrapped extractor.
    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Unwrap back into the extractor handle.
    pub fn into_inner(self) -> E {
        self.extractor
    }

    /// Tag a sentence in place.
    ///
    /// The sentence text is projected to ASCII before the extractor call;
    /// extractor span offsets index that projection. Concepts whose
    /// semantic types are absent or outside the label set, whose position
    /// encoding is malformed, or whose span start matches no token offset
    /// contribute nothing; each such concept is skipped and the rest of
    /// the sentence's concepts still apply.
    ///
    /// Re-tagging an already-tagged sentence re-appends identifiers; it is
    /// not a no-op.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Extraction`] if the extractor call fails; the
    /// sentence is left unmodified.
    pub fn tag_in_place(&self, sentence: &mut Sentence) -> Result<()> {
        let text = sentence.ascii_text();
        let concepts = self.extractor.extract(&text)?;

        for concept in &concepts {
            apply_concept(sentence, concept);
        }
        Ok(())
    }

    /// Tag a sentence, passing it through by value.
    ///
    /// Same behavior as [`Self::tag_in_place`]; this shape matches
    /// pipelines that map sentences through a tagging function.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Extraction`] if the extractor call fails.
    pub fn tag(&self, mut sentence: Sentence) -> Result<Sentence> {
        self.tag_in_place(&mut sentence)?;
        Ok(sentence)
    }

    /// Tag a batch of sentences in place, stopping at the first extractor
    /// failure.
    ///
    /// # Errors
    ///
    /// The first [`crate::Error::Extraction`] encountered; earlier
    /// sentences in the slice stay tagged, later ones stay untouched.
    pub fn tag_all(&self, sentences: &mut [Sentence]) -> Result<()> {
        for sentence in sentences {
            self.tag_in_place(sentence)?;
        }
        Ok(())
    }
}

/// Apply one concept record to a sentence, or skip it.
///
/// Per-concept failures never escalate: a record missing its semantic types
/// or position, or carrying an unparseable position, is dropped here.
fn apply_concept(sentence: &mut Sentence, concept: &ConceptRecord) {
    let Some(label) = concept.label() else {
        return;
    };
    let Some(pos_info) = concept.pos_info.as_deref() else {
        debug!("[tag] concept {} has no position info, skipping", concept.cui);
        return;
    };
    let span = match span::first_span(pos_info) {
        Ok(span) => span,
        Err(err) => {
            debug!("[tag] dropping concept {}: {}", concept.cui, err);
            return;
        }
    };

    align_span(sentence, span, label, &concept.cui);
}

/// Write `label` and `cui` onto every token the span covers.
///
/// The span's start must equal a token offset exactly; a start falling
/// mid-token means the tokenizer and extractor disagree, and the concept is
/// skipped rather than guessed at. From the matched token, labeling
/// continues through each consecutive token that starts before the span
/// ends, each getting the same set-or-append identifier treatment.
fn align_span(sentence: &mut Sentence, span: Span, label: EntityLabel, cui: &str) {
    let Some(first) = sentence.tokens.iter().position(|t| t.offset == span.start) else {
        debug!(
            "[tag] span {} of {} matches no token offset, skipping",
            span, cui
        );
        return;
    };

    sentence.tokens[first].apply(label, cui);
    for token in &mut sentence.tokens[first + 1..] {
        if !span.covers(token.offset) {
            break;
        }
        token.apply(label, cui);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Alignment never changes the token count or any offset.
        #[test]
        fn alignment_preserves_token_structure(
            start in 0usize..64,
            length in 0usize..32,
        ) {
            let offsets = vec![0, 6, 10, 14, 21];
            let mut s = Sentence::with_offsets("x", offsets.clone()).unwrap();
            align_span(&mut s, Span::new(start, length), EntityLabel::Symptom, "C1");

            prop_assert_eq!(s.char_offsets(), offsets);
        }

        /// A labeled token always carries the concept's cui.
        #[test]
        fn labels_and_cids_move_together(start in 0usize..32, length in 1usize..16) {
            let mut s = Sentence::with_offsets("x", vec![0, 6, 10, 14, 21]).unwrap();
            align_span(&mut s, Span::new(start, length), EntityLabel::Disease, "C42");

            for token in &s.tokens {
                prop_assert_eq!(token.label.is_some(), token.cid != "O");
            }
        }
    }
}
