//! # `iob2labels` IOB2 Label Encoder
//!
//! Converts character-offset NER span annotations into integer IOB2 label
//! sequences aligned to sub-word tokenizer output; and back.
//!
//! See:
//! * [`labels`] for the tag model and the [`labels::LabelMap`].
//! * [`annotations`] for span records, field aliases, and validation.
//! * [`tokenization`] for the tokenizer capability, and tokenizer sources.
//! * [`encoding`] to encode annotations into label sequences.
//! * [`decoding`] to recover spans from label sequences.
//! * [`checker`] for the round-trip conversion check.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//! * ``tokenizers``
//!
//! #### feature: ``ahash`` / ``foldhash``
//!
//! This swaps all HashMap implementations for ``ahash`` (or ``foldhash``).
//!
//! This is done by the ``types::IobHashMap`` type alias machinery.
//!
//! #### feature: ``rayon``
//!
//! Batch encoding aligns and checks annotations on the ``rayon`` pool.
//! Batch tokenization is left to the tokenizer.
//!
//! #### feature: ``tokenizers``
//!
//! The Hugging Face ``tokenizers`` adapter, [`tokenization::HfTokenizer`];
//! and resolving tokenizers from local ``tokenizer.json`` paths.
//!
//! #### feature: ``download``
//!
//! Resolving tokenizers by hub checkpoint name.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//!
//! #### feature: ``testing``
//!
//! Exports the [`testing`] module: fixture annotations, and
//! (with ``tokenizers``) an offline word-piece tokenizer which reproduces them.
//!
//! ## Example
//!
//! ```rust,ignore
//! use iob2labels::annotations::SpanRecord;
//! use iob2labels::encoding::{IobEncoder, IobEncoderOptions};
//!
//! let encoder = IobEncoder::from_labels(
//!     ["actor", "character"],
//!     "bert-base-uncased",
//!     IobEncoderOptions::default(),
//! )?;
//!
//! let text = "How many times has Matt Damon been Jason Bourne?";
//! let labels = encoder.encode(
//!     text,
//!     &[
//!         SpanRecord::new(19, 29, "actor"),
//!         SpanRecord::new(35, 47, "character"),
//!     ],
//! )?;
//! assert_eq!(labels, vec![-100, 0, 0, 0, 0, 1, 2, 0, 3, 4, 0, -100]);
//!
//! let spans = encoder.decode_text(&labels, text)?;
//! ```
#![warn(missing_docs, unused)]

pub mod annotations;
pub mod checker;
pub mod decoding;
pub mod encoding;
pub mod errors;
pub mod labels;
pub mod support;
pub mod tokenization;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[doc(inline)]
pub use encoding::{ErrorPolicy, IobEncoder, IobEncoderOptions};
#[doc(inline)]
pub use errors::{IobError, IobResult};
#[doc(inline)]
pub use labels::LabelMap;
