//! # IOB2 Labels
//!
//! The IOB2 tag model, and the [`LabelMap`] bijection between
//! tags and integer [`LabelId`](crate::types::LabelId)s.

mod iob_tag;
mod label_map;

#[doc(inline)]
pub use iob_tag::*;
#[doc(inline)]
pub use label_map::*;
