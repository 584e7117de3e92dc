//! # Conversion Checker
//!
//! Verifies a label sequence by decoding the labeled tokens back to text,
//! and comparing against each annotated entity. Off-by-one token
//! boundaries and wrong end-offset conventions are otherwise silent.

mod conversion_check;

#[doc(inline)]
pub use conversion_check::*;
