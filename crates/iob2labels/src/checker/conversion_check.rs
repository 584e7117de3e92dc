//! # Round-Trip Conversion Check

use crate::{
    annotations::{Annotation, Span},
    decoding::entity_index_ranges,
    errors::{IobError, IobResult},
    labels::LabelMap,
    tokenization::TokenizerCapability,
    types::{LabelId, TokenId},
};

/// How recovered entity text is compared with the annotated text.
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
#[strum(serialize_all = "lowercase")]
pub enum CheckMode {
    /// The recovered text must equal the expected text.
    #[default]
    Strict,

    /// The recovered text must contain the expected text.
    ///
    /// For tokenizers whose decode adds surrounding text to a fragment.
    Lenient,
}

impl CheckMode {
    fn matches(
        &self,
        recovered: &str,
        expected: &str,
    ) -> bool {
        match self {
            Self::Strict => recovered == expected,
            Self::Lenient => recovered.contains(expected),
        }
    }
}

/// Check that a label sequence reproduces an annotation.
///
/// The entities recovered by [`entity_index_ranges`] are paired, in text
/// order, with the annotation spans. Each recovered entity is decoded from `ids`,
/// and compared with a fresh encode/decode of the annotated substring;
/// both sides are whitespace-trimmed.
///
/// ## Arguments
/// * `labels` - the label sequence under test.
/// * `label_map` - the map the labels were produced with.
/// * `tokenizer` - the tokenizer which produced `ids`.
/// * `ids` - the token ids the labels are aligned to.
/// * `annotation` - the annotation the labels should reproduce.
/// * `mode` - the comparison mode.
///
/// ## Returns
/// * [`IobError::CountMismatch`] if the entity counts differ.
/// * [`IobError::ContentMismatch`] for the first entity which does not match.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(labels, label_map, tokenizer, ids, annotation))
)]
pub fn check_conversion(
    labels: &[LabelId],
    label_map: &LabelMap,
    tokenizer: &dyn TokenizerCapability,
    ids: &[TokenId],
    annotation: &Annotation,
    mode: CheckMode,
) -> IobResult<()> {
    let ranges = entity_index_ranges(label_map, labels);

    // Ranges come out in text order; spans may not be given in it.
    let mut spans: Vec<(usize, &Span)> = annotation.spans().iter().enumerate().collect();
    spans.sort_by_key(|(_, span)| span.start);
    if ranges.len() != spans.len() {
        return Err(IobError::CountMismatch {
            recovered: ranges.len(),
            expected: spans.len(),
        });
    }

    for (&(first, last), (idx, span)) in ranges.iter().zip(spans) {
        let entity_ids = ids.get(first..=last).ok_or_else(|| {
            IobError::EncodingShape(format!(
                "{} labels for {} token ids",
                labels.len(),
                ids.len()
            ))
        })?;
        let recovered = tokenizer.decode(entity_ids)?;
        let recovered = recovered.trim();

        let annotated = annotation.span_text(span);
        let expected = tokenizer.decode(&tokenizer.encode_fragment(annotated)?)?;
        let expected = expected.trim();

        if !mode.matches(recovered, expected) {
            return Err(IobError::ContentMismatch {
                span: idx,
                label: span.label.clone(),
                start: span.start,
                end: span.end,
                recovered: recovered.to_string(),
                annotated: annotated.to_string(),
                expected: expected.to_string(),
            });
        }

        log::debug!(
            "recovered entity '{recovered}' at tokens ({first}, {last}) matches annotated entity '{annotated}'"
        );
    }

    Ok(())
}
