//! # Error Types

use crate::types::LabelId;

/// The broad class of an [`IobError`].
///
/// The class decides how a batch reacts to a failure:
/// see [`IobError::is_recoverable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ErrorKind {
    /// Unusable configuration; always fatal.
    Structural,

    /// A single annotation failed validation.
    Validation,

    /// Labels produced for an annotation did not survive the round-trip check.
    Conversion,

    /// The tokenizer collaborator failed.
    Collaborator,
}

/// Errors from iob2labels operations.
#[derive(Debug, thiserror::Error)]
pub enum IobError {
    /// Two entity labels are equal after upper-casing.
    #[error("duplicate label '{label}' at positions {first} and {second}; labels must be unique")]
    DuplicateLabel {
        /// The upper-cased duplicate label.
        label: String,

        /// Position of the first occurrence.
        first: usize,

        /// Position of the repeated occurrence.
        second: usize,
    },

    /// An entry in an untyped label list is not a string.
    #[error("label at position {index} is a {found}; labels must be strings")]
    InvalidLabelType {
        /// Position of the offending entry.
        index: usize,

        /// The JSON type that was found.
        found: &'static str,
    },

    /// The configured ignore label falls inside the label map's index range.
    #[error("ignore label {ignore_label} collides with the label map range 0..{label_count}")]
    IgnoreLabelCollision {
        /// The configured ignore label.
        ignore_label: LabelId,

        /// The number of tags in the label map.
        label_count: usize,
    },

    /// A raw record lacks a required field.
    #[error("{} is missing field '{field}'", record_name(.span))]
    MissingField {
        /// The span position, or `None` for the annotation record itself.
        span: Option<usize>,

        /// The (aliased) field name.
        field: String,
    },

    /// A raw record field holds the wrong JSON type.
    #[error("{} field '{field}' must be {expected}, found {found}", record_name(.span))]
    InvalidFieldType {
        /// The span position, or `None` for the annotation record itself.
        span: Option<usize>,

        /// The (aliased) field name.
        field: String,

        /// The expected type.
        expected: &'static str,

        /// The JSON type that was found.
        found: &'static str,
    },

    /// A span has a negative character offset.
    #[error(
        "span {span} ('{label}') has a negative offset: start={start}, end={end}; character offsets must be >= 0"
    )]
    NegativeOffset {
        /// The span position.
        span: usize,

        /// The span label.
        label: String,

        /// The start offset.
        start: i64,

        /// The end offset.
        end: i64,
    },

    /// A span is empty or inverted.
    #[error(
        "span {span} ('{label}') has start ({start}) >= end ({end}); 'start' must be strictly less than 'end'"
    )]
    InvertedSpan {
        /// The span position.
        span: usize,

        /// The span label.
        label: String,

        /// The start offset.
        start: i64,

        /// The end offset.
        end: i64,
    },

    /// A span extends past the end of the text.
    #[error(
        "span {span} ('{label}') extends past the text (end={end}, text length={text_len}); ensure character offsets are within the text bounds"
    )]
    OutOfBounds {
        /// The span position.
        span: usize,

        /// The span label.
        label: String,

        /// The end offset.
        end: i64,

        /// The text length, in characters.
        text_len: usize,
    },

    /// Two spans share at least one character.
    #[error(
        "spans {first} ('{first_label}', {first_start}:{first_end}) and {second} ('{second_label}', {second_start}:{second_end}) overlap; IOB2 encoding does not support overlapping entities"
    )]
    Overlap {
        /// Position of the earlier span (by offset).
        first: usize,

        /// Label of the earlier span.
        first_label: String,

        /// Start of the earlier span.
        first_start: usize,

        /// End of the earlier span.
        first_end: usize,

        /// Position of the later span (by offset).
        second: usize,

        /// Label of the later span.
        second_label: String,

        /// Start of the later span.
        second_start: usize,

        /// End of the later span.
        second_end: usize,
    },

    /// A span label has no tags in the label map.
    #[error("span {span} ('{label}', {start}:{end}) has a label which is not in the label map")]
    UnknownLabel {
        /// The span position.
        span: usize,

        /// The span label.
        label: String,

        /// The start offset.
        start: usize,

        /// The end offset.
        end: usize,
    },

    /// The label sequence describes a different number of entities than the annotation.
    #[error("found {recovered} entities in the labels but the annotation includes {expected}")]
    CountMismatch {
        /// Entities recovered from the labels.
        recovered: usize,

        /// Spans in the annotation.
        expected: usize,
    },

    /// An entity recovered from the labels does not match the annotated text.
    #[error(
        "span {span} ('{label}', {start}:{end}): recovered entity '{recovered}' does not match annotated entity '{annotated}' (decoded form '{expected}')"
    )]
    ContentMismatch {
        /// The span position.
        span: usize,

        /// The span label.
        label: String,

        /// The start offset.
        start: usize,

        /// The end offset.
        end: usize,

        /// Text decoded from the labeled tokens.
        recovered: String,

        /// The annotated substring.
        annotated: String,

        /// The annotated substring after a tokenizer encode/decode trip.
        expected: String,
    },

    /// A tokenizer could not be resolved.
    #[error("failed to load tokenizer '{name}': {reason}")]
    TokenizerLoad {
        /// The requested tokenizer name.
        name: String,

        /// Why loading failed.
        reason: String,
    },

    /// A tokenizer operation failed.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// A tokenizer returned inconsistent encoding data.
    #[error("malformed encoding: {0}")]
    EncodingShape(String),
}

fn record_name(span: &Option<usize>) -> String {
    match span {
        Some(idx) => format!("span {idx}"),
        None => "annotation".to_string(),
    }
}

impl IobError {
    /// Wrap a tokenizer collaborator error.
    pub fn tokenizer<E: std::fmt::Display>(err: E) -> Self {
        Self::Tokenizer(err.to_string())
    }

    /// The broad class of this error.
    pub fn kind(&self) -> ErrorKind {
        use IobError::*;
        match self {
            DuplicateLabel { .. } | InvalidLabelType { .. } | IgnoreLabelCollision { .. } => {
                ErrorKind::Structural
            }
            MissingField { .. }
            | InvalidFieldType { .. }
            | NegativeOffset { .. }
            | InvertedSpan { .. }
            | OutOfBounds { .. }
            | Overlap { .. }
            | UnknownLabel { .. } => ErrorKind::Validation,
            CountMismatch { .. } | ContentMismatch { .. } => ErrorKind::Conversion,
            TokenizerLoad { .. } | Tokenizer(_) | EncodingShape(_) => ErrorKind::Collaborator,
        }
    }

    /// Can a batch skip the failing item and continue?
    ///
    /// Only validation and conversion failures are item-local.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation | ErrorKind::Conversion)
    }
}

/// Result type for iob2labels operations.
pub type IobResult<T> = core::result::Result<T, IobError>;
