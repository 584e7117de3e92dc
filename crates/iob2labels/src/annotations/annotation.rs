//! # Annotation Types

use serde::{Deserialize, Serialize};

use crate::{
    annotations::validate_spans,
    errors::IobResult,
    support::strings::char_slice,
};

/// An unvalidated span, as supplied by a caller.
///
/// Offsets are signed so that bad input can be reported rather than
/// rejected by the type system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanRecord {
    /// Index of the first entity character.
    pub start: i64,

    /// Index one past the last entity character.
    pub end: i64,

    /// The entity label.
    pub label: String,
}

impl SpanRecord {
    /// Construct a new span record.
    pub fn new<S: Into<String>>(
        start: i64,
        end: i64,
        label: S,
    ) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

impl From<Span> for SpanRecord {
    fn from(span: Span) -> Self {
        Self {
            start: span.start as i64,
            end: span.end as i64,
            label: span.label,
        }
    }
}

/// A validated, half-open `[start, end)` character span.
///
/// ``0 <= start < end <= text.chars().count()``
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Index of the first entity character.
    pub start: usize,

    /// Index one past the last entity character.
    pub end: usize,

    /// The entity label.
    pub label: String,
}

impl Span {
    /// Construct a new span.
    pub fn new<S: Into<String>>(
        start: usize,
        end: usize,
        label: S,
    ) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// The number of characters covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Validated spans are never empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Do two spans share a character?
    ///
    /// Touching spans (`a.end == b.start`) do not overlap.
    pub fn overlaps(
        &self,
        other: &Span,
    ) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A validated text annotation.
///
/// Spans are pairwise non-overlapping and within the text;
/// their input order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    text: String,
    spans: Vec<Span>,
}

impl Annotation {
    /// Validate raw spans against a text.
    ///
    /// See [`validate_spans`] for the rules and their order.
    pub fn new<S: Into<String>>(
        text: S,
        spans: &[SpanRecord],
    ) -> IobResult<Self> {
        let text = text.into();
        let spans = validate_spans(&text, spans)?;
        Ok(Self { text, spans })
    }

    /// The annotated text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The validated spans, in input order.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// The text covered by a span.
    pub fn span_text(
        &self,
        span: &Span,
    ) -> &str {
        char_slice(&self.text, span.start, span.end)
    }

    /// Split into text and spans.
    pub fn into_parts(self) -> (String, Vec<Span>) {
        (self.text, self.spans)
    }
}
