//! # IOB2 Encoder

use std::sync::Arc;

use core::fmt;

use serde_json::Value;

use crate::{
    annotations::{Annotation, Span, SpanRecord},
    checker::check_conversion,
    decoding::decode_spans,
    encoding::{ErrorPolicy, IobEncoderOptions, align_spans},
    errors::{IobError, IobResult},
    labels::LabelMap,
    tokenization::{Diagnostic, TokenEncoding, TokenizerCapability, TokenizerSource},
    types::LabelId,
};

/// Converts span annotations into IOB2 label sequences aligned to tokenizer output.
///
/// Immutable once built; share it freely between threads.
#[derive(Clone)]
pub struct IobEncoder {
    label_map: LabelMap,
    tokenizer: Arc<dyn TokenizerCapability>,
    options: IobEncoderOptions,
    diagnostics: Vec<Diagnostic>,
}

impl fmt::Debug for IobEncoder {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("IobEncoder")
            .field("label_map", &self.label_map)
            .field("options", &self.options)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

impl IobEncoder {
    /// Build an encoder.
    ///
    /// The tokenizer source is resolved, and its truncation configured, once.
    ///
    /// ## Arguments
    /// * `label_map` - the label map.
    /// * `source` - the tokenizer source.
    /// * `options` - the encoder options.
    ///
    /// ## Returns
    /// The encoder, or
    /// * [`IobError::IgnoreLabelCollision`] if the ignore label is a label map id,
    /// * [`IobError::TokenizerLoad`] if the tokenizer can't be resolved.
    pub fn new<S: Into<TokenizerSource>>(
        label_map: LabelMap,
        source: S,
        options: IobEncoderOptions,
    ) -> IobResult<Self> {
        if label_map.contains_id(options.ignore_label()) {
            return Err(IobError::IgnoreLabelCollision {
                ignore_label: options.ignore_label(),
                label_count: label_map.len(),
            });
        }

        let resolved = source.into().resolve()?;
        let mut tokenizer = resolved.tokenizer;
        tokenizer.set_max_length(options.max_length())?;

        for diagnostic in &resolved.diagnostics {
            log::debug!("{diagnostic}");
        }

        Ok(Self {
            label_map,
            tokenizer: Arc::from(tokenizer),
            options,
            diagnostics: resolved.diagnostics,
        })
    }

    /// Build an encoder from an ordered list of entity labels.
    ///
    /// See [`LabelMap::new`] and [`IobEncoder::new`].
    pub fn from_labels<I, L, S>(
        labels: I,
        source: S,
        options: IobEncoderOptions,
    ) -> IobResult<Self>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
        S: Into<TokenizerSource>,
    {
        Self::new(LabelMap::new(labels)?, source, options)
    }

    /// The label map.
    pub fn label_map(&self) -> &LabelMap {
        &self.label_map
    }

    /// The resolved tokenizer.
    pub fn tokenizer(&self) -> &Arc<dyn TokenizerCapability> {
        &self.tokenizer
    }

    /// The encoder options.
    pub fn options(&self) -> &IobEncoderOptions {
        &self.options
    }

    /// Advisories raised while resolving the tokenizer.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Encode one text and its spans.
    ///
    /// ## Arguments
    /// * `text` - the raw text.
    /// * `spans` - the span records; character offsets into `text`.
    ///
    /// ## Returns
    /// One label per token of `text`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, spans)))]
    pub fn encode(
        &self,
        text: &str,
        spans: &[SpanRecord],
    ) -> IobResult<Vec<LabelId>> {
        self.encode_annotation(&Annotation::new(text, spans)?)
    }

    /// Encode one text and its raw JSON span records.
    ///
    /// Span fields are read under the configured [`FieldNames`](crate::annotations::FieldNames).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, spans)))]
    pub fn encode_json(
        &self,
        text: &str,
        spans: &[Value],
    ) -> IobResult<Vec<LabelId>> {
        self.encode_annotation(&Annotation::from_json_spans(
            text,
            spans,
            self.options.field_names(),
        )?)
    }

    /// Encode one validated annotation.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn encode_annotation(
        &self,
        annotation: &Annotation,
    ) -> IobResult<Vec<LabelId>> {
        let encoding = self.tokenizer.encode(annotation.text())?;
        self.label_encoding(annotation, &encoding)
    }

    /// Encode a batch of raw JSON annotation records.
    ///
    /// Records are read under the configured [`FieldNames`](crate::annotations::FieldNames),
    /// and validated, before any tokenization.
    ///
    /// ## Arguments
    /// * `records` - the annotation records.
    /// * `policy` - how to react to a failing record.
    ///
    /// ## Returns
    /// The label sequences, in record order; skipped records leave no placeholder.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, records)))]
    pub fn encode_batch(
        &self,
        records: &[Value],
        policy: ErrorPolicy,
    ) -> IobResult<Vec<Vec<LabelId>>> {
        let mut annotations = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            match Annotation::from_json(record, self.options.field_names()) {
                Ok(annotation) => annotations.push((idx, annotation)),
                Err(err) => on_item_error(idx, err, policy)?,
            }
        }

        let items: Vec<(usize, &Annotation)> = annotations
            .iter()
            .map(|(idx, annotation)| (*idx, annotation))
            .collect();
        self.encode_items(&items, policy)
    }

    /// Encode a batch of validated annotations.
    ///
    /// See [`IobEncoder::encode_batch`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, annotations)))]
    pub fn encode_annotations(
        &self,
        annotations: &[Annotation],
        policy: ErrorPolicy,
    ) -> IobResult<Vec<Vec<LabelId>>> {
        let items: Vec<(usize, &Annotation)> = annotations.iter().enumerate().collect();
        self.encode_items(&items, policy)
    }

    /// Decode labels against the encoding they were aligned to.
    ///
    /// See [`decode_spans`].
    pub fn decode(
        &self,
        labels: &[LabelId],
        encoding: &TokenEncoding,
    ) -> Vec<Span> {
        decode_spans(&self.label_map, labels, encoding)
    }

    /// Decode labels against a fresh encoding of `text`.
    pub fn decode_text(
        &self,
        labels: &[LabelId],
        text: &str,
    ) -> IobResult<Vec<Span>> {
        let encoding = self.tokenizer.encode(text)?;
        Ok(self.decode(labels, &encoding))
    }

    /// Tokenize once for the whole batch, then label each item.
    fn encode_items(
        &self,
        items: &[(usize, &Annotation)],
        policy: ErrorPolicy,
    ) -> IobResult<Vec<Vec<LabelId>>> {
        let texts: Vec<&str> = items
            .iter()
            .map(|(_, annotation)| annotation.text())
            .collect();
        let encodings = self.tokenizer.encode_batch(&texts)?;
        if encodings.len() != items.len() {
            return Err(IobError::EncodingShape(format!(
                "{} encodings for {} texts",
                encodings.len(),
                items.len()
            )));
        }

        // Items are labeled in parallel; once an item fails fatally,
        // items after it are not started.
        #[cfg(feature = "rayon")]
        let results: Vec<(usize, Option<IobResult<Vec<LabelId>>>)> = {
            use std::sync::atomic::{AtomicUsize, Ordering};

            use rayon::prelude::*;

            let stop_after = AtomicUsize::new(usize::MAX);
            items
                .par_iter()
                .zip(encodings.par_iter())
                .enumerate()
                .map(|(pos, (&(idx, annotation), encoding))| {
                    if pos > stop_after.load(Ordering::Relaxed) {
                        return (idx, None);
                    }
                    let result = self.label_encoding(annotation, encoding);
                    if result.as_ref().is_err_and(|err| is_fatal(err, policy)) {
                        stop_after.fetch_min(pos, Ordering::Relaxed);
                    }
                    (idx, Some(result))
                })
                .collect()
        };

        #[cfg(not(feature = "rayon"))]
        let results = items
            .iter()
            .zip(&encodings)
            .map(|(&(idx, annotation), encoding)| {
                (idx, Some(self.label_encoding(annotation, encoding)))
            });

        let mut labels = Vec::with_capacity(items.len());
        for (idx, result) in results {
            // Unlabeled items only follow a fatal failure, which returns first.
            let Some(result) = result else {
                break;
            };
            match result {
                Ok(item) => labels.push(item),
                Err(err) => on_item_error(idx, err, policy)?,
            }
        }
        Ok(labels)
    }

    /// Align, and optionally check, one annotation.
    fn label_encoding(
        &self,
        annotation: &Annotation,
        encoding: &TokenEncoding,
    ) -> IobResult<Vec<LabelId>> {
        let labels = align_spans(
            annotation,
            encoding,
            &self.label_map,
            self.options.ignore_label(),
            self.options.end_offset_convention(),
        )?;

        if self.options.conversion_check() {
            check_conversion(
                &labels,
                &self.label_map,
                self.tokenizer.as_ref(),
                encoding.ids(),
                annotation,
                self.options.check_mode(),
            )?;
        }

        Ok(labels)
    }
}

/// Does `err` end the batch under `policy`?
fn is_fatal(
    err: &IobError,
    policy: ErrorPolicy,
) -> bool {
    match policy {
        ErrorPolicy::Raise => true,
        ErrorPolicy::Skip => !err.is_recoverable(),
    }
}

fn on_item_error(
    idx: usize,
    err: IobError,
    policy: ErrorPolicy,
) -> IobResult<()> {
    if is_fatal(&err, policy) {
        return Err(err);
    }
    log::debug!("skipping annotation {idx}: {err}");
    Ok(())
}

#[cfg(all(test, feature = "tokenizers"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        annotations::FieldNames,
        encoding::EndOffsetConvention,
        testing::{
            BOURNE_LABELS,
            BOURNE_TEXT,
            DENCH_LABELS,
            DENCH_TEXT,
            LABELS,
            bourne_record,
            bourne_spans,
            dench_annotation,
            dench_record,
            dench_spans,
            movie_tokenizer,
        },
        types::{TokenId, check_is_send, check_is_sync},
    };

    fn encoder(options: IobEncoderOptions) -> IobEncoder {
        IobEncoder::from_labels(
            LABELS,
            TokenizerSource::from_handle(movie_tokenizer()),
            options,
        )
        .unwrap()
    }

    struct OfflineTokenizer;

    impl TokenizerCapability for OfflineTokenizer {
        fn encode(
            &self,
            _text: &str,
        ) -> IobResult<TokenEncoding> {
            Err(IobError::tokenizer("offline"))
        }

        fn encode_fragment(
            &self,
            _text: &str,
        ) -> IobResult<Vec<TokenId>> {
            Err(IobError::tokenizer("offline"))
        }

        fn decode(
            &self,
            _ids: &[TokenId],
        ) -> IobResult<String> {
            Err(IobError::tokenizer("offline"))
        }

        fn set_max_length(
            &mut self,
            _max_length: Option<usize>,
        ) -> IobResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_encoder_is_send_sync() {
        let encoder = encoder(IobEncoderOptions::default());
        check_is_send(&encoder);
        check_is_sync(&encoder);
        assert!(encoder.diagnostics().is_empty());
        assert_eq!(encoder.label_map(), &LabelMap::new(LABELS).unwrap());
        assert!(format!("{encoder:?}").starts_with("IobEncoder {"));
    }

    #[test]
    fn test_build_from_options() {
        let encoder = IobEncoderOptions::default()
            .with_ignore_label(-1)
            .build(
                LabelMap::default(),
                TokenizerSource::from_handle(movie_tokenizer()),
            )
            .unwrap();
        assert_eq!(encoder.options().ignore_label(), -1);

        let labels = encoder
            .encode("Matt Damon", &[SpanRecord::new(0, 10, "label")])
            .unwrap();
        assert_eq!(labels, vec![-1, 1, 2, -1]);
    }

    #[test]
    fn test_encode_fixtures() {
        let encoder = encoder(IobEncoderOptions::default());
        assert_eq!(encoder.encode(DENCH_TEXT, &dench_spans()).unwrap(), DENCH_LABELS);
        assert_eq!(encoder.encode(BOURNE_TEXT, &bourne_spans()).unwrap(), BOURNE_LABELS);
        assert_eq!(
            encoder.encode_annotation(&dench_annotation()).unwrap(),
            DENCH_LABELS
        );
    }

    #[test]
    fn test_encode_json_with_field_aliases() {
        let encoder = encoder(
            IobEncoderOptions::default().with_field_names(
                FieldNames::default()
                    .with_start("begin")
                    .with_end("finish")
                    .with_label("class"),
            ),
        );
        let labels = encoder
            .encode_json(
                BOURNE_TEXT,
                &[
                    json!({"begin": 19, "finish": 29, "class": "actor"}),
                    json!({"begin": 35, "finish": 47, "class": "character"}),
                ],
            )
            .unwrap();
        assert_eq!(labels, BOURNE_LABELS);

        let err = encoder
            .encode_json(BOURNE_TEXT, &[json!({"start": 19, "end": 29, "label": "actor"})])
            .unwrap_err();
        assert!(matches!(err, IobError::MissingField { .. }));
    }

    #[test]
    fn test_ignore_label_collision() {
        let err = IobEncoder::from_labels(
            LABELS,
            TokenizerSource::from_handle(movie_tokenizer()),
            IobEncoderOptions::default().with_ignore_label(3),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            IobError::IgnoreLabelCollision {
                ignore_label: 3,
                label_count: 7
            }
        ));

        let encoder = encoder(IobEncoderOptions::default().with_ignore_label(7));
        let labels = encoder.encode(BOURNE_TEXT, &bourne_spans()).unwrap();
        assert_eq!(labels[0], 7);
        assert_eq!(labels[labels.len() - 1], 7);
        assert_eq!(labels.iter().filter(|&&l| l == 7).count(), 2);
    }

    #[test]
    fn test_duplicate_labels_fail_construction() {
        let err = IobEncoder::from_labels(
            ["actor", "ACTOR"],
            TokenizerSource::from_handle(movie_tokenizer()),
            IobEncoderOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, IobError::DuplicateLabel { .. }));
    }

    #[test]
    fn test_truncation_drops_entities() {
        let encoder = encoder(
            IobEncoderOptions::default()
                .with_max_length(Some(8))
                .with_conversion_check(false),
        );
        let labels = encoder.encode(DENCH_TEXT, &dench_spans()).unwrap();
        assert_eq!(labels, vec![-100, 0, 1, 2, 2, 2, 0, -100]);

        // The checker counts the dropped entities.
        let encoder = encoder_with_check_and_max_length(Some(8));
        let err = encoder.encode(DENCH_TEXT, &dench_spans()).unwrap_err();
        assert!(matches!(
            err,
            IobError::CountMismatch {
                recovered: 1,
                expected: 3
            }
        ));
    }

    fn encoder_with_check_and_max_length(max_length: Option<usize>) -> IobEncoder {
        encoder(IobEncoderOptions::default().with_max_length(max_length))
    }

    #[test]
    fn test_no_entities() {
        let encoder = encoder(IobEncoderOptions::default());
        let labels = encoder.encode("Hello world.", &[]).unwrap();
        assert_eq!(labels, vec![-100, 0, 0, 0, -100]);
        assert!(encoder.decode_text(&labels, "Hello world.").unwrap().is_empty());
    }

    #[test]
    fn test_convention_mismatch_is_caught() {
        let encoder = encoder(
            IobEncoderOptions::default()
                .with_end_offset_convention(EndOffsetConvention::NextCharacter),
        );
        let err = encoder.encode(BOURNE_TEXT, &bourne_spans()).unwrap_err();
        assert!(matches!(err, IobError::CountMismatch { .. }));
    }

    #[test]
    fn test_decode() {
        let encoder = encoder(IobEncoderOptions::default());
        let labels = encoder.encode(DENCH_TEXT, &dench_spans()).unwrap();

        let expected: Vec<Span> = dench_annotation().spans().to_vec();
        assert_eq!(encoder.decode_text(&labels, DENCH_TEXT).unwrap(), expected);

        let encoding = encoder.tokenizer().encode(DENCH_TEXT).unwrap();
        assert_eq!(encoder.decode(&labels, &encoding), expected);
    }

    #[test]
    fn test_batch_raise() {
        let encoder = encoder(IobEncoderOptions::default());
        let records = vec![
            dench_record(),
            json!({
                "text": "Matt Damon",
                "spans": [
                    {"start": 0, "end": 6, "label": "actor"},
                    {"start": 5, "end": 10, "label": "actor"},
                ],
            }),
            bourne_record(),
        ];

        let err = encoder
            .encode_batch(&records, ErrorPolicy::Raise)
            .unwrap_err();
        assert!(matches!(err, IobError::Overlap { .. }));

        let labels = encoder
            .encode_batch(&[dench_record(), bourne_record()], ErrorPolicy::Raise)
            .unwrap();
        assert_eq!(labels, vec![DENCH_LABELS.to_vec(), BOURNE_LABELS.to_vec()]);
    }

    #[test]
    fn test_batch_raise_reports_first_failure() {
        let encoder = encoder(IobEncoderOptions::default());
        let mut records: Vec<Value> = (0..64)
            .map(|i| if i % 2 == 0 { dench_record() } else { bourne_record() })
            .collect();
        records[10] = json!({
            "text": "Matt Damon",
            "spans": [{"start": 0, "end": 10, "label": "director"}],
        });
        records[40] = json!({
            "text": "Matt Damon",
            "spans": [{"start": 0, "end": 10, "label": "producer"}],
        });

        for _ in 0..8 {
            let err = encoder
                .encode_annotations(
                    &records
                        .iter()
                        .map(|r| Annotation::from_json(r, &FieldNames::default()).unwrap())
                        .collect::<Vec<_>>(),
                    ErrorPolicy::Raise,
                )
                .unwrap_err();
            match err {
                IobError::UnknownLabel { label, .. } => assert_eq!(label, "director"),
                other => panic!("unexpected error: {other}"),
            }
        }

        // Skipping continues past both.
        let labels = encoder.encode_batch(&records, ErrorPolicy::Skip).unwrap();
        assert_eq!(labels.len(), 62);
    }

    #[test]
    fn test_batch_skip() {
        let encoder = encoder(IobEncoderOptions::default());
        let records = vec![
            dench_record(),
            json!({"text": "Matt Damon", "spans": [{"start": 0, "end": 11, "label": "actor"}]}),
            json!({"text": "Matt Damon", "spans": [{"start": 0, "end": 10, "label": "director"}]}),
            json!({"spans": []}),
            bourne_record(),
        ];

        let labels = encoder.encode_batch(&records, ErrorPolicy::Skip).unwrap();
        assert_eq!(labels, vec![DENCH_LABELS.to_vec(), BOURNE_LABELS.to_vec()]);
    }

    #[test]
    fn test_batch_skips_conversion_failures() {
        let encoder = encoder_with_check_and_max_length(Some(8));
        let short = json!({"text": "Matt Damon", "spans": [{"start": 0, "end": 10, "label": "actor"}]});

        let labels = encoder
            .encode_batch(&[short.clone(), bourne_record()], ErrorPolicy::Skip)
            .unwrap();
        assert_eq!(labels, vec![vec![-100, 1, 2, -100]]);

        let err = encoder
            .encode_batch(&[short, bourne_record()], ErrorPolicy::Raise)
            .unwrap_err();
        assert!(matches!(err, IobError::CountMismatch { .. }));
    }

    #[test]
    fn test_batch_tokenizer_failure_always_aborts() {
        let encoder = IobEncoder::from_labels(
            LABELS,
            TokenizerSource::from_handle(OfflineTokenizer),
            IobEncoderOptions::default(),
        )
        .unwrap();

        let err = encoder
            .encode_batch(&[bourne_record()], ErrorPolicy::Skip)
            .unwrap_err();
        assert!(matches!(err, IobError::Tokenizer(_)));
    }

    #[test]
    fn test_encode_annotations() {
        let encoder = encoder(IobEncoderOptions::default());
        let annotations = vec![
            dench_annotation(),
            Annotation::new(
                "Matt Damon",
                &[SpanRecord::new(0, 10, "director")],
            )
            .unwrap(),
        ];

        let labels = encoder
            .encode_annotations(&annotations, ErrorPolicy::Skip)
            .unwrap();
        assert_eq!(labels, vec![DENCH_LABELS.to_vec()]);

        let err = encoder
            .encode_annotations(&annotations, ErrorPolicy::Raise)
            .unwrap_err();
        assert!(matches!(err, IobError::UnknownLabel { span: 0, .. }));
    }
}
