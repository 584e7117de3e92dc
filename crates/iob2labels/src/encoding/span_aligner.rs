//! # Span-to-Token Alignment
//!
//! The core of encoding: a validated [`Annotation`] plus its
//! [`TokenEncoding`] become one label per token.

use crate::{
    annotations::Annotation,
    encoding::EndOffsetConvention,
    errors::{IobError, IobResult},
    labels::LabelMap,
    tokenization::TokenEncoding,
    types::LabelId,
};

/// Align annotation spans to tokens, producing one label per token.
///
/// Special tokens get `ignore_label`; other tokens start as `O`.
/// Each span then writes `B-X` on its first token, and `I-X` on the
/// rest through its last token, in annotation order.
///
/// A span with no token at either end (e.g. past the truncation length)
/// is dropped; that is not an error.
///
/// ## Arguments
/// * `annotation` - the validated annotation.
/// * `encoding` - the encoding of `annotation.text()`.
/// * `label_map` - the label map.
/// * `ignore_label` - the label for special tokens.
/// * `convention` - how the span end locates its last token.
///
/// ## Returns
/// The labels, or [`IobError::UnknownLabel`] for a span label
/// missing from `label_map`.
pub fn align_spans(
    annotation: &Annotation,
    encoding: &TokenEncoding,
    label_map: &LabelMap,
    ignore_label: LabelId,
    convention: EndOffsetConvention,
) -> IobResult<Vec<LabelId>> {
    let mut labels: Vec<LabelId> = encoding
        .special_tokens_mask()
        .iter()
        .map(|&special| {
            if special {
                ignore_label
            } else {
                label_map.outside()
            }
        })
        .collect();

    for (idx, span) in annotation.spans().iter().enumerate() {
        let (begin, inside) =
            label_map
                .entity_ids(&span.label)
                .ok_or_else(|| IobError::UnknownLabel {
                    span: idx,
                    label: span.label.clone(),
                    start: span.start,
                    end: span.end,
                })?;

        let first = encoding.char_to_token(span.start);
        let last = encoding.char_to_token(convention.end_char(span.end));
        let (Some(first), Some(last)) = (first, last) else {
            log::debug!(
                "dropping span {idx} ('{}', {}:{}): no token at its boundary",
                span.label,
                span.start,
                span.end
            );
            continue;
        };
        let last = last.max(first);

        log::trace!(
            "span {idx} ('{}', {}:{}) -> tokens {first}..={last}",
            span.label,
            span.start,
            span.end
        );
        labels[first] = begin;
        labels[first + 1..=last].fill(inside);
    }

    Ok(labels)
}

#[cfg(all(test, feature = "tokenizers"))]
mod tests {
    use super::*;
    use crate::{
        annotations::SpanRecord,
        testing::{
            BOURNE_LABELS,
            BOURNE_TEXT,
            DENCH_LABELS,
            LABELS,
            bourne_annotation,
            dench_annotation,
            movie_tokenizer,
        },
        tokenization::{HfTokenizer, TokenizerCapability},
    };

    fn align(
        annotation: &Annotation,
        tokenizer: &HfTokenizer,
        convention: EndOffsetConvention,
    ) -> IobResult<Vec<LabelId>> {
        let label_map = LabelMap::new(LABELS).unwrap();
        let encoding = tokenizer.encode(annotation.text()).unwrap();
        align_spans(annotation, &encoding, &label_map, -100, convention)
    }

    #[test]
    fn test_fixtures() {
        let tokenizer = movie_tokenizer();
        assert_eq!(
            align(
                &dench_annotation(),
                &tokenizer,
                EndOffsetConvention::LastCharacter
            )
            .unwrap(),
            DENCH_LABELS
        );
        assert_eq!(
            align(
                &bourne_annotation(),
                &tokenizer,
                EndOffsetConvention::LastCharacter
            )
            .unwrap(),
            BOURNE_LABELS
        );
    }

    #[test]
    fn test_next_character_convention() {
        let tokenizer = movie_tokenizer();
        // "Matt Damon" ends before a space, which has no token;
        // "Jason Bourne" ends at "?", which is swept into the entity.
        assert_eq!(
            align(
                &bourne_annotation(),
                &tokenizer,
                EndOffsetConvention::NextCharacter
            )
            .unwrap(),
            vec![-100, 0, 0, 0, 0, 0, 0, 0, 3, 4, 4, -100]
        );
    }

    #[test]
    fn test_truncated_span_dropped() {
        let mut tokenizer = movie_tokenizer();
        tokenizer.set_max_length(Some(8)).unwrap();
        assert_eq!(
            align(
                &dench_annotation(),
                &tokenizer,
                EndOffsetConvention::LastCharacter
            )
            .unwrap(),
            vec![-100, 0, 1, 2, 2, 2, 0, -100]
        );
    }

    #[test]
    fn test_unknown_label() {
        let tokenizer = movie_tokenizer();
        let annotation = Annotation::new(
            BOURNE_TEXT,
            &[
                SpanRecord::new(19, 29, "actor"),
                SpanRecord::new(35, 47, "director"),
            ],
        )
        .unwrap();

        match align(&annotation, &tokenizer, EndOffsetConvention::LastCharacter).unwrap_err() {
            IobError::UnknownLabel {
                span,
                label,
                start,
                end,
            } => {
                assert_eq!(span, 1);
                assert_eq!(label, "director");
                assert_eq!((start, end), (35, 47));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_label_case_insensitive() {
        let tokenizer = movie_tokenizer();
        let annotation =
            Annotation::new(BOURNE_TEXT, &[SpanRecord::new(19, 29, "Actor")]).unwrap();
        let labels = align(&annotation, &tokenizer, EndOffsetConvention::LastCharacter).unwrap();
        assert_eq!(labels[5..7], [1, 2]);
    }

    #[test]
    fn test_special_tokens_only_ignored() {
        let tokenizer = movie_tokenizer();
        let annotation = Annotation::new("Hello world.", &[]).unwrap();
        let encoding = tokenizer.encode(annotation.text()).unwrap();
        let labels = align_spans(
            &annotation,
            &encoding,
            &LabelMap::default(),
            -7,
            EndOffsetConvention::LastCharacter,
        )
        .unwrap();
        assert_eq!(labels, vec![-7, 0, 0, 0, -7]);
    }
}
