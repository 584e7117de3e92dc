//! # Encoder Options

use crate::{
    annotations::FieldNames,
    checker::CheckMode,
    errors::IobResult,
    labels::LabelMap,
    tokenization::TokenizerSource,
    types::{DEFAULT_IGNORE_LABEL, LabelId},
};

/// The default truncation length.
pub const DEFAULT_MAX_LENGTH: usize = 512;

/// Which character locates the token holding a span's end.
///
/// Span `end` offsets are exclusive; tokenizer families disagree on
/// which lookup lands on the entity's last token.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum_macros::EnumString,
    strum_macros::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum EndOffsetConvention {
    /// Look up the last included character, `end - 1`.
    #[default]
    LastCharacter,

    /// Look up the character at `end`.
    NextCharacter,
}

impl EndOffsetConvention {
    /// The character index to look up for a span's last token.
    pub fn end_char(
        &self,
        end: usize,
    ) -> usize {
        match self {
            Self::LastCharacter => end.saturating_sub(1),
            Self::NextCharacter => end,
        }
    }
}

/// How a batch reacts to a failing annotation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum_macros::EnumString,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorPolicy {
    /// Abort the batch on the first failure.
    #[default]
    Raise,

    /// Drop failing annotations from the results.
    ///
    /// Only validation and conversion failures are skipped;
    /// configuration and tokenizer failures still abort.
    Skip,
}

/// Options for configuring an [`IobEncoder`](crate::encoding::IobEncoder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IobEncoderOptions {
    /// The label given to special tokens.
    pub ignore_label: LabelId,

    /// The span end lookup convention.
    pub end_offset_convention: EndOffsetConvention,

    /// Run the conversion checker on every encode?
    pub conversion_check: bool,

    /// The conversion checker comparison mode.
    pub check_mode: CheckMode,

    /// Tokenizer truncation length; `None` disables truncation.
    pub max_length: Option<usize>,

    /// Raw record field aliases.
    pub field_names: FieldNames,
}

impl Default for IobEncoderOptions {
    fn default() -> Self {
        Self {
            ignore_label: DEFAULT_IGNORE_LABEL,
            end_offset_convention: EndOffsetConvention::default(),
            conversion_check: true,
            check_mode: CheckMode::default(),
            max_length: Some(DEFAULT_MAX_LENGTH),
            field_names: FieldNames::default(),
        }
    }
}

impl IobEncoderOptions {
    /// Gets the configured ignore label.
    pub fn ignore_label(&self) -> LabelId {
        self.ignore_label
    }

    /// Sets the configured ignore label.
    ///
    /// It must lie outside the label map's `0..len` range.
    pub fn set_ignore_label(
        &mut self,
        ignore_label: LabelId,
    ) {
        self.ignore_label = ignore_label;
    }

    /// Sets the configured ignore label.
    pub fn with_ignore_label(
        mut self,
        ignore_label: LabelId,
    ) -> Self {
        self.set_ignore_label(ignore_label);
        self
    }

    /// Gets the configured end offset convention.
    pub fn end_offset_convention(&self) -> EndOffsetConvention {
        self.end_offset_convention
    }

    /// Sets the configured end offset convention.
    pub fn set_end_offset_convention(
        &mut self,
        convention: EndOffsetConvention,
    ) {
        self.end_offset_convention = convention;
    }

    /// Sets the configured end offset convention.
    pub fn with_end_offset_convention(
        mut self,
        convention: EndOffsetConvention,
    ) -> Self {
        self.set_end_offset_convention(convention);
        self
    }

    /// Gets the configured conversion check flag.
    pub fn conversion_check(&self) -> bool {
        self.conversion_check
    }

    /// Sets the configured conversion check flag.
    ///
    /// Disable when spans are expected to fall past the truncation
    /// length; dropped entities fail the check's count comparison.
    pub fn set_conversion_check(
        &mut self,
        conversion_check: bool,
    ) {
        self.conversion_check = conversion_check;
    }

    /// Sets the configured conversion check flag.
    pub fn with_conversion_check(
        mut self,
        conversion_check: bool,
    ) -> Self {
        self.set_conversion_check(conversion_check);
        self
    }

    /// Gets the configured check mode.
    pub fn check_mode(&self) -> CheckMode {
        self.check_mode
    }

    /// Sets the configured check mode.
    pub fn set_check_mode(
        &mut self,
        check_mode: CheckMode,
    ) {
        self.check_mode = check_mode;
    }

    /// Sets the configured check mode.
    pub fn with_check_mode(
        mut self,
        check_mode: CheckMode,
    ) -> Self {
        self.set_check_mode(check_mode);
        self
    }

    /// Gets the configured truncation length.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Sets the configured truncation length.
    pub fn set_max_length(
        &mut self,
        max_length: Option<usize>,
    ) {
        self.max_length = max_length;
    }

    /// Sets the configured truncation length.
    pub fn with_max_length(
        mut self,
        max_length: Option<usize>,
    ) -> Self {
        self.set_max_length(max_length);
        self
    }

    /// Gets the configured field aliases.
    pub fn field_names(&self) -> &FieldNames {
        &self.field_names
    }

    /// Sets the configured field aliases.
    pub fn set_field_names(
        &mut self,
        field_names: FieldNames,
    ) {
        self.field_names = field_names;
    }

    /// Sets the configured field aliases.
    pub fn with_field_names(
        mut self,
        field_names: FieldNames,
    ) -> Self {
        self.set_field_names(field_names);
        self
    }

    /// Build an [`IobEncoder`](crate::encoding::IobEncoder) with these options.
    pub fn build<S: Into<TokenizerSource>>(
        &self,
        label_map: LabelMap,
        source: S,
    ) -> IobResult<crate::encoding::IobEncoder> {
        crate::encoding::IobEncoder::new(label_map, source, self.clone())
    }
}
