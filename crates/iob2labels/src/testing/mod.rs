//! # Testing Tools
//!
//! Fixture annotations with their known-good label sequences;
//! and, with the `tokenizers` feature, an offline word-piece tokenizer
//! which reproduces them.

#[cfg(feature = "tokenizers")]
mod movie_tokenizer;

#[cfg(feature = "tokenizers")]
#[doc(inline)]
pub use movie_tokenizer::*;
use serde_json::{Value, json};

use crate::{
    annotations::{Annotation, SpanRecord},
    tokenization::TokenizerCapability,
    types::{LabelId, check_is_send, check_is_sync},
};

/// Entity labels for the fixtures.
pub const LABELS: [&str; 3] = ["actor", "character", "plot"];

/// A small vocab reproducing `bert-base-uncased` on the fixture sentences.
pub const MOVIE_VOCAB: &[&str] = &[
    "did", "dame", "judy", "den", "##ch", "star", "in", "a", "british", "film", "about", "queen",
    "elizabeth", "how", "many", "times", "has", "matt", "damon", "been", "jason", "bourne", "who",
    "played", "was", "and", "the", "cat", "sat", "on", "mat", "hello", "world", "starred",
    "identity", "movie", "are", "great", "you", "see", "dr", "no", "starring", "sean", "connery",
    "this", "is", "nothing", "particular", "?", ".", ",", "!",
];

/// Whole words of [`MOVIE_VOCAB`]; each is a single token.
pub const MOVIE_WORDS: &[&str] = &[
    "did", "dame", "judy", "star", "in", "a", "british", "film", "about", "queen", "elizabeth",
    "how", "many", "times", "has", "matt", "damon", "been", "jason", "bourne", "who", "played",
    "was", "and", "the", "cat", "sat", "on", "mat", "hello", "world", "starred", "identity",
    "movie", "are", "great", "you", "see", "dr", "no", "starring", "sean", "connery", "this", "is",
    "nothing", "particular",
];

/// A sentence with a multi-piece word ("Dench" is `den ##ch`).
pub const DENCH_TEXT: &str = "Did Dame Judy Dench star in a British film about Queen Elizabeth?";

/// Labels for [`DENCH_TEXT`] under [`LABELS`].
pub const DENCH_LABELS: [LabelId; 16] = [-100, 0, 1, 2, 2, 2, 0, 0, 0, 5, 0, 0, 3, 4, 0, -100];

/// A sentence with two adjacent-word entities.
pub const BOURNE_TEXT: &str = "How many times has Matt Damon been Jason Bourne?";

/// Labels for [`BOURNE_TEXT`] under [`LABELS`].
pub const BOURNE_LABELS: [LabelId; 12] = [-100, 0, 0, 0, 0, 1, 2, 0, 3, 4, 0, -100];

/// Spans for [`DENCH_TEXT`].
pub fn dench_spans() -> Vec<SpanRecord> {
    vec![
        SpanRecord::new(4, 19, "actor"),
        SpanRecord::new(30, 37, "plot"),
        SpanRecord::new(49, 64, "character"),
    ]
}

/// Spans for [`BOURNE_TEXT`].
pub fn bourne_spans() -> Vec<SpanRecord> {
    vec![
        SpanRecord::new(19, 29, "actor"),
        SpanRecord::new(35, 47, "character"),
    ]
}

/// The validated [`DENCH_TEXT`] annotation.
pub fn dench_annotation() -> Annotation {
    Annotation::new(DENCH_TEXT, &dench_spans()).unwrap()
}

/// The validated [`BOURNE_TEXT`] annotation.
pub fn bourne_annotation() -> Annotation {
    Annotation::new(BOURNE_TEXT, &bourne_spans()).unwrap()
}

/// The [`DENCH_TEXT`] annotation as a raw JSON record.
pub fn dench_record() -> Value {
    json!({
        "text": DENCH_TEXT,
        "spans": [
            {"start": 4, "end": 19, "label": "actor"},
            {"start": 30, "end": 37, "label": "plot"},
            {"start": 49, "end": 64, "label": "character"},
        ],
    })
}

/// The [`BOURNE_TEXT`] annotation as a raw JSON record.
pub fn bourne_record() -> Value {
    json!({
        "text": BOURNE_TEXT,
        "spans": [
            {"start": 19, "end": 29, "label": "actor"},
            {"start": 35, "end": 47, "label": "character"},
        ],
    })
}

/// Named edge-case annotation records.
///
/// Entities at either end of the text, adjacent entities, entities
/// containing punctuation, and no entities.
pub fn edge_case_records() -> Vec<(&'static str, Value)> {
    vec![
        (
            "entity_at_start",
            json!({
                "text": "Matt Damon starred in The Bourne Identity.",
                "spans": [{"start": 0, "end": 10, "label": "actor"}],
            }),
        ),
        (
            "entity_at_end",
            json!({
                "text": "The movie starred Matt Damon",
                "spans": [{"start": 18, "end": 28, "label": "actor"}],
            }),
        ),
        (
            "adjacent_entities",
            json!({
                "text": "Matt Damon Jason Bourne are great",
                "spans": [
                    {"start": 0, "end": 10, "label": "actor"},
                    {"start": 11, "end": 23, "label": "character"},
                ],
            }),
        ),
        (
            "entity_with_punctuation",
            json!({
                "text": "Did you see Dr. No starring Sean Connery?",
                "spans": [
                    {"start": 12, "end": 18, "label": "character"},
                    {"start": 28, "end": 40, "label": "actor"},
                ],
            }),
        ),
        (
            "no_entities",
            json!({
                "text": "This is a movie about nothing in particular.",
                "spans": [],
            }),
        ),
    ]
}

/// Common [`TokenizerCapability`] tests.
///
/// Holds for any tokenizer which lower-cases, and decodes
/// "Matt" as "matt"; e.g. `bert-base-uncased`.
pub fn common_tokenizer_capability_tests<T: TokenizerCapability>(tokenizer: &T) {
    check_is_send(tokenizer);
    check_is_sync(tokenizer);

    let encoding = tokenizer.encode(BOURNE_TEXT).unwrap();
    let n = encoding.len();
    assert!(n > 2);
    assert!(encoding.is_special(0));
    assert!(encoding.is_special(n - 1));
    assert_eq!(encoding.special_tokens_mask().len(), n);
    assert_eq!(encoding.offsets().len(), n);

    let fragment = tokenizer.encode_fragment(BOURNE_TEXT).unwrap();
    assert_eq!(fragment.len(), n - 2);
    assert_eq!(
        tokenizer.decode(encoding.ids()).unwrap(),
        tokenizer.decode(&fragment).unwrap()
    );

    // "Matt" starts at character 19.
    let matt = encoding.char_to_token(19).unwrap();
    assert_eq!(encoding.token_to_chars(matt), Some((19, 23)));
    assert_eq!(
        tokenizer.decode(&encoding.ids()[matt..=matt]).unwrap().trim(),
        "matt"
    );

    let batch = tokenizer.encode_batch(&[BOURNE_TEXT, DENCH_TEXT]).unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0], encoding);
    assert_eq!(batch[1], tokenizer.encode(DENCH_TEXT).unwrap());
}
