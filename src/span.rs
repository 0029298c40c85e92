//! Position-span parsing for extractor output.
//!
//! # The Position Encoding Problem
//!
//! The concept extractor reports where a concept occurred as a *string*, and
//! the shape of that string varies between output rows:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ Encoding                 Example              Meaning          │
//! ├───────────────────────────────────────────────────────────────┤
//! │ simple                   "10/8"               start 10, len 8  │
//! │ comma-joined, brackets   "[10/8],[20/4]"      two sub-spans    │
//! │ semicolon-joined         "10/8;20/4"          two sub-spans    │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! On top of that, the extractor counts characters from 1 while the
//! tokenizer's `char_offsets` count from 0. The parser owns that off-by-one:
//! every [`Span`] it returns is already in the tokenizer's 0-based
//! coordinate system, so downstream code compares starts directly against
//! token offsets.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A concept's character span, 0-based, in character units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Character offset of the first covered character (0-based, inclusive).
    pub start: usize,
    /// Number of characters covered.
    pub length: usize,
}

impl Span {
    /// Create a span from a 0-based start and a length.
    #[must_use]
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// One past the last covered character offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }

    /// Whether a character offset falls inside this span.
    #[must_use]
    pub const fn covers(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end()
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// Parse a raw `position_info` string into its sub-spans.
///
/// All three observed encodings are accepted: `"10/8"`, `"[10/8],[20/4]"`,
/// and `"10/8;20/4"`. Brackets are stripped per sub-span before parsing.
/// Raw starts are 1-based; returned spans are 0-based.
///
/// # Errors
///
/// [`Error::PositionFormat`] if the input is empty, a sub-span is missing
/// its `/` separator, a start or length is non-numeric, or a raw start is 0
/// (impossible in a 1-based encoding).
///
/// # Example
///
/// ```
/// use medtag::span::{parse_position_info, Span};
///
/// let spans = parse_position_info("[10/8],[20/4]").unwrap();
/// assert_eq!(spans, vec![Span::new(9, 8), Span::new(19, 4)]);
/// ```
pub fn parse_position_info(raw: &str) -> Result<Vec<Span>> {
    if raw.trim().is_empty() {
        return Err(Error::position_format("empty position string"));
    }

    raw.split([',', ';']).map(parse_sub_span).collect()
}

/// Parse only the first sub-span of a `position_info` string.
///
/// The extractor lists sub-spans in document order, so the first one is the
/// concept's primary mention.
///
/// The whole string is validated; a malformed later sub-span rejects the
/// concept even though only the first sub-span is returned.
///
/// # Errors
///
/// Same conditions as [`parse_position_info`].
pub fn first_span(raw: &str) -> Result<Span> {
    parse_position_info(raw)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::position_format("empty position string"))
}

fn parse_sub_span(part: &str) -> Result<Span> {
    let part = part.trim().trim_matches(['[', ']']);

    let (start, length) = part
        .split_once('/')
        .ok_or_else(|| Error::position_format(format!("missing '/' in span `{part}`")))?;

    let start: usize = start
        .trim()
        .parse()
        .map_err(|_| Error::position_format(format!("non-numeric start in `{part}`")))?;
    let length: usize = length
        .trim()
        .parse()
        .map_err(|_| Error::position_format(format!("non-numeric length in `{part}`")))?;

    // Extractor starts are 1-based; token offsets are 0-based.
    let start = start
        .checked_sub(1)
        .ok_or_else(|| Error::position_format(format!("start must be 1-based in `{part}`")))?;

    Ok(Span::new(start, length))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_encoding() {
        let spans = parse_position_info("10/8").unwrap();
        assert_eq!(spans, vec![Span::new(9, 8)]);
    }

    #[test]
    fn test_bracketed_comma_encoding() {
        let spans = parse_position_info("[10/8],[20/4]").unwrap();
        assert_eq!(spans, vec![Span::new(9, 8), Span::new(19, 4)]);
    }

    #[test]
    fn test_semicolon_encoding() {
        let spans = parse_position_info("10/8;20/4").unwrap();
        assert_eq!(spans, vec![Span::new(9, 8), Span::new(19, 4)]);
    }

    #[test]
    fn test_all_encodings_agree_on_first_span() {
        for raw in ["10/8", "[10/8],[20/4]", "10/8;20/4"] {
            assert_eq!(first_span(raw).unwrap(), Span::new(9, 8), "input: {raw}");
        }
    }

    #[test]
    fn test_missing_separator_is_error() {
        assert!(parse_position_info("108").is_err());
        // Second sub-span malformed: the whole string is rejected.
        assert!(parse_position_info("10/8,204").is_err());
    }

    #[test]
    fn test_non_numeric_is_error() {
        assert!(parse_position_info("x/8").is_err());
        assert!(parse_position_info("10/y").is_err());
        assert!(parse_position_info("/").is_err());
    }

    #[test]
    fn test_zero_start_is_error() {
        // 1-based encoding cannot contain a start of 0.
        assert!(parse_position_info("0/5").is_err());
    }

    #[test]
    fn test_empty_is_error() {
        assert!(parse_position_info("").is_err());
        assert!(parse_position_info("   ").is_err());
        assert!(first_span("").is_err());
    }

    #[test]
    fn test_first_span_validates_later_sub_spans() {
        // A malformed later sub-span rejects the whole encoding.
        assert!(first_span("10/8,garbage").is_err());
        assert!(first_span("10/8;20/x").is_err());
    }

    #[test]
    fn test_span_end_and_covers() {
        let span = Span::new(9, 8);
        assert_eq!(span.end(), 17);
        assert!(span.covers(9));
        assert!(span.covers(16));
        assert!(!span.covers(17));
        assert!(!span.covers(8));
    }

    #[test]
    fn test_zero_length_span() {
        let span = first_span("5/0").unwrap();
        assert_eq!(span, Span::new(4, 0));
        assert!(!span.covers(4));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every encoding of the same leading sub-span parses identically.
        #[test]
        fn encodings_agree(start in 1usize..10_000, len in 0usize..1_000) {
            let simple = format!("{start}/{len}");
            let bracketed = format!("[{start}/{len}],[{}/{}]", start + 50, len + 1);
            let semicolon = format!("{start}/{len};{}/{}", start + 50, len + 1);

            let expected = Span::new(start - 1, len);
            prop_assert_eq!(first_span(&simple).unwrap(), expected);
            prop_assert_eq!(first_span(&bracketed).unwrap(), expected);
            prop_assert_eq!(first_span(&semicolon).unwrap(), expected);
        }

        /// Parsed starts are exactly one less than raw starts.
        #[test]
        fn start_is_rebased(start in 1usize..100_000, len in 0usize..1_000) {
            let span = first_span(&format!("{start}/{len}")).unwrap();
            prop_assert_eq!(span.start, start - 1);
            prop_assert_eq!(span.length, len);
        }

        /// Arbitrary input never panics; it parses or errors.
        #[test]
        fn arbitrary_input_never_panics(raw in ".{0,64}") {
            let _ = parse_position_info(&raw);
            let _ = first_span(&raw);
        }

        /// `covers` agrees with `end`.
        #[test]
        fn covers_matches_end(start in 0usize..1_000, len in 1usize..100) {
            let span = Span::new(start, len);
            prop_assert!(span.covers(start));
            prop_assert!(span.covers(span.end() - 1));
            prop_assert!(!span.covers(span.end()));
        }
    }
}
