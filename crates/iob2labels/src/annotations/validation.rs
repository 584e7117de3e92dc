//! # Span Validation
//!
//! Rules, checked in this order:
//! 1. per span, in input order: non-negative offsets,
//!    then `start < end`, then `end <= text length`;
//! 2. across all spans: no two spans overlap.
//!
//! Overlap is a property of the span set: it is detected on a
//! `(start, end)` sorted copy, so the reported pair does not depend
//! on input order.

use crate::{
    annotations::{Span, SpanRecord},
    errors::{IobError, IobResult},
    support::strings::char_len,
};

/// Validate raw span records against a text.
///
/// ## Arguments
/// * `text` - the annotated text; offsets count `char`s.
/// * `spans` - the raw spans.
///
/// ## Returns
/// The validated spans, in input order; or the first failure.
pub fn validate_spans(
    text: &str,
    spans: &[SpanRecord],
) -> IobResult<Vec<Span>> {
    let text_len = char_len(text);

    let spans = spans
        .iter()
        .enumerate()
        .map(|(idx, record)| validate_span(idx, record, text_len))
        .collect::<IobResult<Vec<Span>>>()?;

    check_overlaps(&spans)?;

    Ok(spans)
}

fn validate_span(
    idx: usize,
    record: &SpanRecord,
    text_len: usize,
) -> IobResult<Span> {
    let SpanRecord { start, end, label } = record;
    let (start, end) = (*start, *end);

    if start < 0 || end < 0 {
        return Err(IobError::NegativeOffset {
            span: idx,
            label: label.clone(),
            start,
            end,
        });
    }

    if start >= end {
        return Err(IobError::InvertedSpan {
            span: idx,
            label: label.clone(),
            start,
            end,
        });
    }

    if end as u64 > text_len as u64 {
        return Err(IobError::OutOfBounds {
            span: idx,
            label: label.clone(),
            end,
            text_len,
        });
    }

    Ok(Span::new(start as usize, end as usize, label.clone()))
}

fn check_overlaps(spans: &[Span]) -> IobResult<()> {
    if spans.len() < 2 {
        return Ok(());
    }

    let mut sorted: Vec<(usize, &Span)> = spans.iter().enumerate().collect();
    sorted.sort_by_key(|(_, span)| (span.start, span.end));

    for pair in sorted.windows(2) {
        let (first, prev) = pair[0];
        let (second, next) = pair[1];
        if next.start < prev.end {
            return Err(IobError::Overlap {
                first,
                first_label: prev.label.clone(),
                first_start: prev.start,
                first_end: prev.end,
                second,
                second_label: next.label.clone(),
                second_start: next.start,
                second_end: next.end,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn validate(
        text: &str,
        spans: &[(i64, i64, &str)],
    ) -> IobResult<Vec<Span>> {
        let records: Vec<SpanRecord> = spans
            .iter()
            .map(|(start, end, label)| SpanRecord::new(*start, *end, *label))
            .collect();
        validate_spans(text, &records)
    }

    #[test]
    fn test_negative_start() {
        let err = validate("Hello world", &[(-1, 5, "test")]).unwrap_err();
        assert!(matches!(
            err,
            IobError::NegativeOffset {
                span: 0,
                start: -1,
                end: 5,
                ..
            }
        ));
        assert!(err.to_string().contains("negative offset"));
    }

    #[test]
    fn test_negative_end() {
        let err = validate("Hello world", &[(0, -3, "test")]).unwrap_err();
        assert!(matches!(err, IobError::NegativeOffset { end: -3, .. }));
    }

    #[test]
    fn test_start_equals_end() {
        let err = validate("Hello world", &[(5, 5, "test")]).unwrap_err();
        assert!(matches!(
            err,
            IobError::InvertedSpan {
                start: 5,
                end: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_start_greater_than_end() {
        let err = validate("Hello world", &[(8, 3, "test")]).unwrap_err();
        assert!(matches!(err, IobError::InvertedSpan { .. }));
        assert!(err.to_string().contains("start (8) >= end (3)"));
    }

    #[test]
    fn test_end_past_text_length() {
        let err = validate("Hello", &[(0, 10, "test")]).unwrap_err();
        assert!(matches!(
            err,
            IobError::OutOfBounds {
                end: 10,
                text_len: 5,
                ..
            }
        ));
        assert!(err.to_string().contains("extends past the text"));
    }

    #[test]
    fn test_end_counts_chars_not_bytes() {
        // 6 chars, 7 bytes.
        let text = "caf\u{00e9} x";
        assert!(validate(text, &[(0, 6, "test")]).is_ok());
        assert!(validate(text, &[(0, 7, "test")]).is_err());
    }

    #[test]
    fn test_per_span_checks_report_first_span() {
        let err = validate("Hello world", &[(0, 5, "ok"), (3, 2, "bad"), (-1, 2, "worse")])
            .unwrap_err();
        match err {
            IobError::InvertedSpan { span, label, .. } => {
                assert_eq!(span, 1);
                assert_eq!(label, "bad");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_per_span_checks_precede_overlap() {
        let err = validate("Hello world test", &[(0, 8, "a"), (6, 11, "b"), (0, 100, "c")])
            .unwrap_err();
        assert!(matches!(err, IobError::OutOfBounds { span: 2, .. }));
    }

    #[test]
    fn test_overlapping_spans() {
        let err = validate("Hello world test", &[(0, 8, "a"), (6, 11, "b")]).unwrap_err();
        assert!(matches!(
            err,
            IobError::Overlap {
                first: 0,
                second: 1,
                ..
            }
        ));
        assert!(err.to_string().contains("overlap"));
    }

    #[test]
    fn test_overlapping_spans_reversed_order() {
        let err = validate("Hello world test", &[(6, 11, "b"), (0, 8, "a")]).unwrap_err();
        match err {
            IobError::Overlap {
                first,
                first_label,
                second,
                second_label,
                ..
            } => {
                assert_eq!((first, first_label.as_str()), (1, "a"));
                assert_eq!((second, second_label.as_str()), (0, "b"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_overlap_message_includes_both_spans() {
        let err = validate("Hello world test case", &[(0, 11, "a"), (5, 15, "b")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "spans 0 ('a', 0:11) and 1 ('b', 5:15) overlap; \
             IOB2 encoding does not support overlapping entities"
        );
    }

    #[test]
    fn test_adjacent_spans_no_error() {
        let spans = validate(
            "Matt Damon Jason Bourne",
            &[(0, 10, "actor"), (10, 23, "character")],
        )
        .unwrap();
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_valid_annotation_keeps_input_order() {
        let spans = validate(
            "Did Dame Judy Dench star in a British film about Queen Elizabeth?",
            &[(49, 64, "character"), (4, 19, "actor")],
        )
        .unwrap();
        assert_eq!(
            spans,
            vec![Span::new(49, 64, "character"), Span::new(4, 19, "actor")]
        );
    }

    #[test]
    fn test_no_spans_passes() {
        assert_eq!(validate("No entities here.", &[]).unwrap(), vec![]);
    }

    #[test]
    fn test_error_message_includes_span_index_and_label() {
        let err = validate("Hi", &[(0, 100, "test")]).unwrap_err();
        assert!(err.to_string().starts_with("span 0 ('test')"));
    }

    /// The offsets of the reported overlapping pair.
    fn overlap_offsets(err: &IobError) -> Option<((usize, usize), (usize, usize))> {
        match err {
            IobError::Overlap {
                first_start,
                first_end,
                second_start,
                second_end,
                ..
            } => Some(((*first_start, *first_end), (*second_start, *second_end))),
            _ => None,
        }
    }

    #[test]
    fn test_overlap_pair_is_order_independent() {
        let spans: [(i64, i64, &str); 3] = [(0, 4, "a"), (10, 14, "b"), (2, 6, "c")];
        let forward = validate("x".repeat(20).as_str(), &spans).unwrap_err();

        let mut reversed = spans;
        reversed.reverse();
        let backward = validate("x".repeat(20).as_str(), &reversed).unwrap_err();

        assert_eq!(overlap_offsets(&forward), Some(((0, 4), (2, 6))));
        assert_eq!(overlap_offsets(&forward), overlap_offsets(&backward));
    }

    proptest! {
        #[test]
        fn overlap_detection_ignores_input_order(
            spans in proptest::collection::vec((0..40i64, 1..8i64), 0..6),
        ) {
            let text = "x".repeat(48);
            let records: Vec<SpanRecord> = spans
                .iter()
                .enumerate()
                .map(|(idx, (start, len))| SpanRecord::new(*start, start + len, format!("l{idx}")))
                .collect();
            let mut reversed = records.clone();
            reversed.reverse();

            let forward = validate_spans(&text, &records);
            let backward = validate_spans(&text, &reversed);
            prop_assert_eq!(forward.is_ok(), backward.is_ok());

            if let (Err(a), Err(b)) = (forward, backward) {
                prop_assert!(overlap_offsets(&a).is_some(), "expected an overlap, got {:?}", a);
                prop_assert_eq!(overlap_offsets(&a), overlap_offsets(&b));
            }
        }

        #[test]
        fn touching_spans_never_overlap(
            cuts in proptest::collection::btree_set(1..60i64, 1..10),
        ) {
            let text = "y".repeat(64);
            let mut bounds: Vec<i64> = vec![0];
            bounds.extend(cuts.iter().copied());
            let records: Vec<SpanRecord> = bounds
                .windows(2)
                .map(|w| SpanRecord::new(w[0], w[1], "t"))
                .collect();
            prop_assert!(validate_spans(&text, &records).is_ok());
        }
    }
}
