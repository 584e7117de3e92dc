//! # Raw JSON Records
//!
//! Field aliases are resolved here, once; everything downstream
//! works on [`SpanRecord`] and [`Annotation`].

use serde_json::Value;

use crate::{
    annotations::{Annotation, FieldNames, SpanRecord},
    errors::{IobError, IobResult},
    support::json::json_type_name,
};

/// Read one raw span record.
///
/// Offsets must be JSON integers and the label a JSON string;
/// no coercion is attempted.
pub fn span_record_from_json(
    idx: usize,
    value: &Value,
    fields: &FieldNames,
) -> IobResult<SpanRecord> {
    let start = get_field(Some(idx), value, &fields.start)?;
    let end = get_field(Some(idx), value, &fields.end)?;
    let label = get_field(Some(idx), value, &fields.label)?;

    Ok(SpanRecord {
        start: as_int(Some(idx), &fields.start, start)?,
        end: as_int(Some(idx), &fields.end, end)?,
        label: as_string(Some(idx), &fields.label, label)?,
    })
}

/// Read a list of raw span records.
pub fn span_records_from_json(
    values: &[Value],
    fields: &FieldNames,
) -> IobResult<Vec<SpanRecord>> {
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| span_record_from_json(idx, value, fields))
        .collect()
}

impl Annotation {
    /// Read and validate a text plus raw JSON span records.
    pub fn from_json_spans(
        text: &str,
        spans: &[Value],
        fields: &FieldNames,
    ) -> IobResult<Self> {
        let records = span_records_from_json(spans, fields)?;
        Self::new(text, &records)
    }

    /// Read and validate a whole raw JSON annotation record.
    ///
    /// ```
    /// use iob2labels::annotations::{Annotation, FieldNames};
    ///
    /// let record = serde_json::json!({
    ///     "text": "Matt Damon was Jason Bourne.",
    ///     "spans": [{"start": 0, "end": 10, "label": "actor"}],
    /// });
    /// let annotation = Annotation::from_json(&record, &FieldNames::default()).unwrap();
    /// assert_eq!(annotation.spans().len(), 1);
    /// ```
    pub fn from_json(
        record: &Value,
        fields: &FieldNames,
    ) -> IobResult<Self> {
        let text = get_field(None, record, &fields.text)?;
        let text = text.as_str().ok_or_else(|| IobError::InvalidFieldType {
            span: None,
            field: fields.text.clone(),
            expected: "a string",
            found: json_type_name(text),
        })?;

        let spans = get_field(None, record, &fields.spans)?;
        let spans = spans.as_array().ok_or_else(|| IobError::InvalidFieldType {
            span: None,
            field: fields.spans.clone(),
            expected: "an array",
            found: json_type_name(spans),
        })?;

        Self::from_json_spans(text, spans, fields)
    }
}

fn get_field<'a>(
    span: Option<usize>,
    value: &'a Value,
    field: &str,
) -> IobResult<&'a Value> {
    value.get(field).ok_or_else(|| IobError::MissingField {
        span,
        field: field.to_string(),
    })
}

fn as_int(
    span: Option<usize>,
    field: &str,
    value: &Value,
) -> IobResult<i64> {
    value.as_i64().ok_or_else(|| IobError::InvalidFieldType {
        span,
        field: field.to_string(),
        expected: "an integer",
        found: json_type_name(value),
    })
}

fn as_string(
    span: Option<usize>,
    field: &str,
    value: &Value,
) -> IobResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| IobError::InvalidFieldType {
            span,
            field: field.to_string(),
            expected: "a string",
            found: json_type_name(value),
        })
}
