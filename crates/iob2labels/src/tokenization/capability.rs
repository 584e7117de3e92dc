//! # Tokenizer Capability Trait

use crate::{
    errors::IobResult,
    tokenization::TokenEncoding,
    types::TokenId,
};

/// The tokenizer operations this crate relies upon.
///
/// Implementations may be any tokenizer family (word-piece, byte-level BPE,
/// sentence-piece, ...); only these operations are required.
pub trait TokenizerCapability: Send + Sync {
    /// Encode text, including special tokens, honoring the configured truncation.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    ///
    /// ## Returns
    /// A [`TokenEncoding`] with `char` offsets into `text`.
    fn encode(
        &self,
        text: &str,
    ) -> IobResult<TokenEncoding>;

    /// Encode a batch of texts.
    ///
    /// Semantically `texts.map(encode)`; implementations may parallelize.
    fn encode_batch(
        &self,
        texts: &[&str],
    ) -> IobResult<Vec<TokenEncoding>> {
        texts.iter().map(|text| self.encode(text)).collect()
    }

    /// Encode a text fragment to ids, without special tokens.
    fn encode_fragment(
        &self,
        text: &str,
    ) -> IobResult<Vec<TokenId>>;

    /// Decode token ids to human-readable text, skipping special tokens.
    fn decode(
        &self,
        ids: &[TokenId],
    ) -> IobResult<String>;

    /// Configure truncation.
    ///
    /// ## Arguments
    /// * `max_length` - the maximum encoded length, or `None` to disable truncation.
    fn set_max_length(
        &mut self,
        max_length: Option<usize>,
    ) -> IobResult<()>;
}
