//! # Token Encoding

use crate::{
    errors::{IobError, IobResult},
    types::TokenId,
};

/// A tokenizer's output for one text.
///
/// Offsets are half-open `char` ranges into the source text;
/// special tokens have no source characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenEncoding {
    ids: Vec<TokenId>,
    special_tokens_mask: Vec<bool>,
    offsets: Vec<(usize, usize)>,
}

impl TokenEncoding {
    /// Construct a new encoding.
    ///
    /// ## Arguments
    /// * `ids` - the token ids.
    /// * `special_tokens_mask` - `true` for tokenizer-inserted tokens.
    /// * `offsets` - per-token `[start, end)` character offsets.
    ///
    /// ## Returns
    /// The encoding, or [`IobError::EncodingShape`] if the lengths differ.
    pub fn new(
        ids: Vec<TokenId>,
        special_tokens_mask: Vec<bool>,
        offsets: Vec<(usize, usize)>,
    ) -> IobResult<Self> {
        if ids.len() != special_tokens_mask.len() || ids.len() != offsets.len() {
            return Err(IobError::EncodingShape(format!(
                "{} ids, {} special token flags, {} offsets",
                ids.len(),
                special_tokens_mask.len(),
                offsets.len()
            )));
        }

        Ok(Self {
            ids,
            special_tokens_mask,
            offsets,
        })
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Is the encoding empty?
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The token ids.
    pub fn ids(&self) -> &[TokenId] {
        &self.ids
    }

    /// The special token mask.
    pub fn special_tokens_mask(&self) -> &[bool] {
        &self.special_tokens_mask
    }

    /// The per-token character offsets.
    pub fn offsets(&self) -> &[(usize, usize)] {
        &self.offsets
    }

    /// Is the token at `token` a special token?
    pub fn is_special(
        &self,
        token: usize,
    ) -> bool {
        self.special_tokens_mask
            .get(token)
            .copied()
            .unwrap_or(false)
    }

    /// Find the token covering a character.
    ///
    /// Returns `None` when no retained token covers the character;
    /// e.g. whitespace, or text dropped by truncation.
    pub fn char_to_token(
        &self,
        char_index: usize,
    ) -> Option<usize> {
        self.offsets
            .iter()
            .zip(&self.special_tokens_mask)
            .position(|(&(start, end), &special)| {
                !special && start <= char_index && char_index < end
            })
    }

    /// The `[start, end)` characters covered by a token.
    ///
    /// Returns `None` for special tokens and out-of-range positions.
    pub fn token_to_chars(
        &self,
        token: usize,
    ) -> Option<(usize, usize)> {
        if self.is_special(token) {
            return None;
        }
        self.offsets.get(token).copied()
    }
}
