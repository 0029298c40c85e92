//! Concept records and semantic-type classification.
//!
//! The extractor labels each concept with one or more short semantic-type
//! codes (bracketed, comma-joined, e.g. `"[dsyn,fndg]"`). Only two of those
//! codes map into the tag set this crate writes onto tokens; everything else
//! is ignored.

use serde::{Deserialize, Serialize};

/// Semantic-type code for sign-or-symptom concepts.
pub const SYMPTOM_CODE: &str = "sosy";

/// Semantic-type code for disease-or-syndrome concepts.
pub const DISEASE_CODE: &str = "dsyn";

/// Entity label written onto tokens covered by a classified concept.
///
/// Tokens with no label carry the `"O"` sentinel instead; see
/// [`crate::sentence::OUTSIDE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    /// Disease or syndrome mention.
    Disease,
    /// Sign or symptom mention.
    Symptom,
}

impl EntityLabel {
    /// Convert to the label string written into token fields.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            EntityLabel::Disease => "Disease",
            EntityLabel::Symptom => "Symptom",
        }
    }

    /// Parse from a label string. Returns `None` for `"O"` or anything
    /// unrecognized.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Disease" => Some(EntityLabel::Disease),
            "Symptom" => Some(EntityLabel::Symptom),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// Classify a raw semantic-types field into an [`EntityLabel`].
///
/// The field is a bracketed, comma-joined code list; brackets are stripped
/// and each code compared exactly, so `"[dsyn,fndg]"` classifies as Disease
/// regardless of co-occurring codes. Symptom is checked before Disease:
/// extractor output never combines the two codes on one record, but the
/// tie-break must be deterministic.
///
/// Returns `None` when neither code is present; such concepts are ignored.
#[must_use]
pub fn classify_semtypes(raw: &str) -> Option<EntityLabel> {
    let mut disease = false;
    for code in raw.trim_matches(['[', ']']).split(',') {
        match code.trim() {
            SYMPTOM_CODE => return Some(EntityLabel::Symptom),
            DISEASE_CODE => disease = true,
            _ => {}
        }
    }
    disease.then_some(EntityLabel::Disease)
}

/// One extracted concept mention, as reported by the extractor.
///
/// Read-only to this crate. Extractor output is ragged: abbreviation rows
/// omit semantic types and position info, so both are optional and checked
/// explicitly before a record contributes any label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptRecord {
    /// Stable concept identifier. Synonymous mentions share one identifier.
    pub cui: String,
    /// Raw semantic-type field, e.g. `"[dsyn]"`. Absent on some rows.
    pub semtypes: Option<String>,
    /// Raw position encoding; see [`crate::span`]. Absent on some rows.
    pub pos_info: Option<String>,
    /// Extractor relevance score, as reported.
    pub score: Option<String>,
    /// Preferred name of the concept in the extractor's vocabulary.
    pub preferred_name: Option<String>,
    /// The surface text that triggered the match.
    pub trigger: Option<String>,
}

impl ConceptRecord {
    /// Create a record carrying only an identifier.
    #[must_use]
    pub fn new(cui: impl Into<String>) -> Self {
        Self {
            cui: cui.into(),
            semtypes: None,
            pos_info: None,
            score: None,
            preferred_name: None,
            trigger: None,
        }
    }

    /// Set the raw semantic-types field.
    #[must_use]
    pub fn with_semtypes(mut self, semtypes: impl Into<String>) -> Self {
        self.semtypes = Some(semtypes.into());
        self
    }

    /// Set the raw position encoding.
    #[must_use]
    pub fn with_pos_info(mut self, pos_info: impl Into<String>) -> Self {
        self.pos_info = Some(pos_info.into());
        self
    }

    /// Set the extractor score.
    #[must_use]
    pub fn with_score(mut self, score: impl Into<String>) -> Self {
        self.score = Some(score.into());
        self
    }

    /// Set the preferred name.
    #[must_use]
    pub fn with_preferred_name(mut self, name: impl Into<String>) -> Self {
        self.preferred_name = Some(name.into());
        self
    }

    /// Set the trigger text.
    #[must_use]
    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    /// Classify this record's semantic types, if present.
    #[must_use]
    pub fn label(&self) -> Option<EntityLabel> {
        self.semtypes.as_deref().and_then(classify_semtypes)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any code list containing the symptom code classifies as Symptom,
        /// whatever surrounds it.
        #[test]
        fn symptom_code_always_wins(prefix in "[a-z]{0,4}", suffix in "[a-z]{0,4}") {
            let raw = format!("[{prefix},sosy,{suffix}]");
            prop_assert_eq!(classify_semtypes(&raw), Some(EntityLabel::Symptom));
        }

        /// Classification is deterministic.
        #[test]
        fn classify_is_deterministic(raw in ".{0,32}") {
            prop_assert_eq!(classify_semtypes(&raw), classify_semtypes(&raw));
        }

        /// Code lists without either known code never classify.
        #[test]
        fn unknown_codes_never_classify(codes in proptest::collection::vec("[a-rt-z]{4}", 0..5)) {
            let raw = format!("[{}]", codes.join(","));
            prop_assert_eq!(classify_semtypes(&raw), None);
        }
    }
}
