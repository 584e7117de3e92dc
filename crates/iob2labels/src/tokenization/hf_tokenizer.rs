//! # Hugging Face `tokenizers` Adapter

use std::path::Path;

use tokenizers::{Encoding, Tokenizer, TruncationParams};

use crate::{
    errors::{IobError, IobResult},
    tokenization::{TokenEncoding, TokenizerCapability},
    types::TokenId,
};

/// [`TokenizerCapability`] implementation for [`Tokenizer`].
///
/// Encodes with `char` offsets, so span offsets and token offsets
/// count the same units.
#[derive(Clone)]
pub struct HfTokenizer {
    inner: Tokenizer,
}

impl From<Tokenizer> for HfTokenizer {
    fn from(inner: Tokenizer) -> Self {
        Self { inner }
    }
}

impl HfTokenizer {
    /// Load a tokenizer from a `tokenizer.json` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> IobResult<Self> {
        let path = path.as_ref();
        Tokenizer::from_file(path)
            .map(Self::from)
            .map_err(|e| IobError::TokenizerLoad {
                name: path.display().to_string(),
                reason: e.to_string(),
            })
    }

    /// Load a tokenizer by hub checkpoint name.
    #[cfg(feature = "download")]
    pub fn from_pretrained(name: &str) -> IobResult<Self> {
        Tokenizer::from_pretrained(name, None)
            .map(Self::from)
            .map_err(|e| IobError::TokenizerLoad {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    /// The wrapped tokenizer.
    pub fn inner(&self) -> &Tokenizer {
        &self.inner
    }

    /// Unwrap the tokenizer.
    pub fn into_inner(self) -> Tokenizer {
        self.inner
    }
}

fn to_token_encoding(encoding: &Encoding) -> IobResult<TokenEncoding> {
    TokenEncoding::new(
        encoding.get_ids().to_vec(),
        encoding
            .get_special_tokens_mask()
            .iter()
            .map(|&flag| flag != 0)
            .collect(),
        encoding.get_offsets().to_vec(),
    )
}

impl TokenizerCapability for HfTokenizer {
    fn encode(
        &self,
        text: &str,
    ) -> IobResult<TokenEncoding> {
        let encoding = self
            .inner
            .encode_char_offsets(text, true)
            .map_err(IobError::tokenizer)?;
        to_token_encoding(&encoding)
    }

    fn encode_batch(
        &self,
        texts: &[&str],
    ) -> IobResult<Vec<TokenEncoding>> {
        // `tokenizers` parallelizes batches internally.
        self.inner
            .encode_batch_char_offsets(texts.to_vec(), true)
            .map_err(IobError::tokenizer)?
            .iter()
            .map(to_token_encoding)
            .collect()
    }

    fn encode_fragment(
        &self,
        text: &str,
    ) -> IobResult<Vec<TokenId>> {
        let encoding = self
            .inner
            .encode_char_offsets(text, false)
            .map_err(IobError::tokenizer)?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(
        &self,
        ids: &[TokenId],
    ) -> IobResult<String> {
        self.inner.decode(ids, true).map_err(IobError::tokenizer)
    }

    fn set_max_length(
        &mut self,
        max_length: Option<usize>,
    ) -> IobResult<()> {
        let params = max_length.map(|max_length| TruncationParams {
            max_length,
            ..Default::default()
        });
        self.inner
            .with_truncation(params)
            .map_err(IobError::tokenizer)?;
        Ok(())
    }
}
