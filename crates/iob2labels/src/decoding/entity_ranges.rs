//! # Entity Index Ranges

use crate::{
    labels::{IobTag, LabelMap},
    types::LabelId,
};

/// Find the inclusive `(first, last)` token ranges of the entities in a label sequence.
///
/// Each range opens at a `B-X` label and extends over the immediately
/// following run of `I-X` labels for the same `X`. Runs stop at `O`,
/// at the ignore marker, at any `B-`, and at an `I-` of another type.
/// `I-` labels with no opening `B-` start nothing.
///
/// ## Arguments
/// * `label_map` - the map the labels were produced with.
/// * `labels` - the label sequence.
///
/// ## Returns
/// The ranges, in sequence order.
pub fn entity_index_ranges(
    label_map: &LabelMap,
    labels: &[LabelId],
) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();

    let mut idx = 0;
    while idx < labels.len() {
        let Some(IobTag::Beginning(entity)) = label_map.tag(labels[idx]) else {
            idx += 1;
            continue;
        };

        let run = labels[idx + 1..]
            .iter()
            .take_while(|&&id| {
                label_map
                    .tag(id)
                    .is_some_and(|tag| tag.is_inside_of(entity))
            })
            .count();

        ranges.push((idx, idx + run));
        idx += run + 1;
    }

    ranges
}
