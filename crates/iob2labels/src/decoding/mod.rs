//! # IOB2 Decoding
//!
//! Label sequences back to character [`Span`](crate::annotations::Span)s.
//!
//! Decoding is a pure function of the labels and the token-to-character
//! mapping; it does not validate the legality of the label sequence.

mod entity_ranges;
mod span_decoder;

#[doc(inline)]
pub use entity_ranges::*;
#[doc(inline)]
pub use span_decoder::*;
