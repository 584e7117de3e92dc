//! # Span Decoder

use crate::{
    annotations::Span,
    decoding::entity_index_ranges,
    labels::LabelMap,
    tokenization::TokenEncoding,
    types::LabelId,
};

/// Decode a label sequence into character spans.
///
/// Each entity range from [`entity_index_ranges`] becomes a span from the
/// first character of its first token to the end of its last token.
/// Labels are reported in lower case.
///
/// Ranges whose tokens have no character offsets (special tokens, or
/// positions past the end of `encoding`) are skipped.
///
/// ## Arguments
/// * `label_map` - the map the labels were produced with.
/// * `labels` - the label sequence.
/// * `encoding` - the encoding the labels were aligned to.
///
/// ## Returns
/// The recovered spans, in text order.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_spans(
    label_map: &LabelMap,
    labels: &[LabelId],
    encoding: &TokenEncoding,
) -> Vec<Span> {
    entity_index_ranges(label_map, labels)
        .into_iter()
        .filter_map(|(first, last)| {
            let entity = label_map.tag(labels[first])?.entity()?;
            let (Some((start, _)), Some((_, end))) =
                (encoding.token_to_chars(first), encoding.token_to_chars(last))
            else {
                log::debug!("skipping entity at tokens {first}..={last}: no character offsets");
                return None;
            };
            Some(Span::new(start, end, entity.to_lowercase()))
        })
        .collect()
}
