//! Sentence and token representation.
//!
//! The surrounding pipeline hands sentences over as three parallel arrays
//! (`char_offsets`, `entity_types`, `entity_cids`), all indexed by token.
//! Keeping three arrays aligned by convention is exactly the kind of
//! invariant that silently rots, so internally each token is one record and
//! index alignment holds by construction. [`Sentence::from_parts`] accepts
//! the pipeline's shape at the boundary and the accessor methods hand it
//! back.

use serde::{Deserialize, Serialize};

use crate::concept::EntityLabel;
use crate::error::{Error, Result};

/// Sentinel marking a token that carries no entity label and no concept id.
pub const OUTSIDE: &str = "O";

/// One token of a sentence: its character offset plus the entity fields the
/// tagger writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// 0-based character offset of the token's first character in the
    /// sentence text.
    pub offset: usize,
    /// Entity label, or `None` for the `"O"` sentinel.
    pub label: Option<EntityLabel>,
    /// Concept identifiers, `"|"`-joined in arrival order; `"O"` when none.
    pub cid: String,
}

impl Token {
    /// Create an unlabeled token at the given character offset.
    #[must_use]
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            label: None,
            cid: OUTSIDE.to_string(),
        }
    }

    /// The label field as the pipeline's string form (`"O"` when unset).
    #[must_use]
    pub fn label_str(&self) -> &str {
        self.label.map_or(OUTSIDE, |l| l.as_label())
    }

    /// Whether this token carries no label and no concept id.
    #[must_use]
    pub fn is_outside(&self) -> bool {
        self.label.is_none() && self.cid == OUTSIDE
    }

    /// Write a label and merge a concept id onto this token.
    ///
    /// The cid field keeps every concept that landed here: the sentinel is
    /// replaced outright, anything else gets `"|" + cui` appended.
    pub(crate) fn apply(&mut self, label: EntityLabel, cui: &str) {
        self.label = Some(label);
        if self.cid == OUTSIDE {
            self.cid = cui.to_string();
        } else {
            self.cid.push('|');
            self.cid.push_str(cui);
        }
    }
}

/// A tokenized sentence, mutated in place by the tagger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Raw sentence text.
    pub text: String,
    /// Tokens in document order.
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Create a tokenless sentence.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokens: Vec::new(),
        }
    }

    /// Create a sentence from text and token offsets, every token unlabeled.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSentence`] if offsets are not strictly increasing.
    pub fn with_offsets(text: impl Into<String>, char_offsets: Vec<usize>) -> Result<Self> {
        check_increasing(&char_offsets)?;
        Ok(Self {
            text: text.into(),
            tokens: char_offsets.into_iter().map(Token::new).collect(),
        })
    }

    /// Create a sentence from the pipeline's parallel-array shape.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSentence`] if the three arrays differ in length, an
    /// entry of `entity_types` is neither `"O"` nor a known label, or the
    /// offsets are not strictly increasing.
    pub fn from_parts(
        text: impl Into<String>,
        char_offsets: Vec<usize>,
        entity_types: Vec<String>,
        entity_cids: Vec<String>,
    ) -> Result<Self> {
        if char_offsets.len() != entity_types.len() || char_offsets.len() != entity_cids.len() {
            return Err(Error::invalid_sentence(format!(
                "parallel arrays differ in length: {} offsets, {} types, {} cids",
                char_offsets.len(),
                entity_types.len(),
                entity_cids.len()
            )));
        }
        check_increasing(&char_offsets)?;

        let mut tokens = Vec::with_capacity(char_offsets.len());
        for ((offset, type_str), cid) in char_offsets
            .into_iter()
            .zip(entity_types)
            .zip(entity_cids)
        {
            let label = if type_str == OUTSIDE {
                None
            } else {
                Some(EntityLabel::from_label(&type_str).ok_or_else(|| {
                    Error::invalid_sentence(format!("unknown entity type `{type_str}`"))
                })?)
            };
            tokens.push(Token { offset, label, cid });
        }

        Ok(Self {
            text: text.into(),
            tokens,
        })
    }

    /// Token character offsets, in order.
    #[must_use]
    pub fn char_offsets(&self) -> Vec<usize> {
        self.tokens.iter().map(|t| t.offset).collect()
    }

    /// Entity labels as the pipeline's string array (`"O"` for unlabeled).
    #[must_use]
    pub fn entity_types(&self) -> Vec<String> {
        self.tokens
            .iter()
            .map(|t| t.label_str().to_string())
            .collect()
    }

    /// Concept identifier fields as the pipeline's string array.
    #[must_use]
    pub fn entity_cids(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.cid.clone()).collect()
    }

    /// Whether no token carries a label or a concept id.
    #[must_use]
    pub fn is_untagged(&self) -> bool {
        self.tokens.iter().all(Token::is_outside)
    }

    /// The sentence text with all non-ASCII characters dropped.
    ///
    /// The extractor's wire format does not tolerate non-ASCII input
    /// reliably, so this projection is what gets quoted to it. Offsets in
    /// extractor output therefore index the projected text.
    #[must_use]
    pub fn ascii_text(&self) -> String {
        self.text.chars().filter(char::is_ascii).collect()
    }
}

fn check_increasing(offsets: &[usize]) -> Result<()> {
    for pair in offsets.windows(2) {
        if pair[1] <= pair[0] {
            return Err(Error::invalid_sentence(format!(
                "char_offsets not strictly increasing at {} -> {}",
                pair[0], pair[1]
            )));
        }
    }
    Ok(())
}
