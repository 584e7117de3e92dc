//! # Record Field Names

use serde::{Deserialize, Serialize};

/// Field names used to read raw annotation records.
///
/// Datasets name their fields differently (`begin`/`finish`/`class`, ...);
/// these aliases are only consulted when reading raw records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    /// The annotation text field.
    pub text: String,

    /// The annotation span list field.
    pub spans: String,

    /// The span start offset field.
    pub start: String,

    /// The span end offset field.
    pub end: String,

    /// The span label field.
    pub label: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            text: "text".to_string(),
            spans: "spans".to_string(),
            start: "start".to_string(),
            end: "end".to_string(),
            label: "label".to_string(),
        }
    }
}

impl FieldNames {
    /// Set the text field name and return the builder.
    pub fn with_text<S: Into<String>>(
        mut self,
        text: S,
    ) -> Self {
        self.text = text.into();
        self
    }

    /// Set the spans field name and return the builder.
    pub fn with_spans<S: Into<String>>(
        mut self,
        spans: S,
    ) -> Self {
        self.spans = spans.into();
        self
    }

    /// Set the start field name and return the builder.
    pub fn with_start<S: Into<String>>(
        mut self,
        start: S,
    ) -> Self {
        self.start = start.into();
        self
    }

    /// Set the end field name and return the builder.
    pub fn with_end<S: Into<String>>(
        mut self,
        end: S,
    ) -> Self {
        self.end = end.into();
        self
    }

    /// Set the label field name and return the builder.
    pub fn with_label<S: Into<String>>(
        mut self,
        label: S,
    ) -> Self {
        self.label = label.into();
        self
    }
}
