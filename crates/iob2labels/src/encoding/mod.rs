//! # IOB2 Encoding
//!
//! [`IobEncoder`] validates annotations, tokenizes their text, aligns
//! spans to tokens ([`align_spans`]), and optionally verifies the result
//! with the [conversion checker](crate::checker).

mod encoder_options;
mod iob_encoder;
mod span_aligner;

#[doc(inline)]
pub use encoder_options::*;
#[doc(inline)]
pub use iob_encoder::*;
#[doc(inline)]
pub use span_aligner::*;
