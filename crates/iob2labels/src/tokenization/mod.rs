//! # Tokenizer Collaborator
//!
//! This crate never tokenizes text itself. It needs a narrow capability
//! from a tokenizer ([`TokenizerCapability`]), and works on the resulting
//! [`TokenEncoding`] values.
//!
//! A [`TokenizerSource`] names or wraps a tokenizer,
//! and is resolved once when an encoder is built.

mod capability;
mod checkpoints;
mod source;
mod token_encoding;

#[cfg(feature = "tokenizers")]
mod hf_tokenizer;

#[doc(inline)]
pub use capability::*;
#[doc(inline)]
pub use checkpoints::*;
#[cfg(feature = "tokenizers")]
#[doc(inline)]
pub use hf_tokenizer::*;
#[doc(inline)]
pub use source::*;
#[doc(inline)]
pub use token_encoding::*;
