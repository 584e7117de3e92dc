//! # Tokenizer Sources
//!
//! A [`TokenizerSource`] is resolved exactly once, into a boxed
//! [`TokenizerCapability`] plus any advisory [`Diagnostic`]s.

use core::fmt;

use crate::{
    errors::IobResult,
    tokenization::{Diagnostic, TokenizerCapability},
};

/// Where an encoder gets its tokenizer.
pub enum TokenizerSource {
    /// A `tokenizer.json` path, a directory holding one,
    /// or (with the `download` feature) a hub checkpoint name.
    ByName(String),

    /// An already-constructed tokenizer.
    ByHandle(Box<dyn TokenizerCapability>),
}

impl fmt::Debug for TokenizerSource {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::ByName(name) => f.debug_tuple("ByName").field(name).finish(),
            Self::ByHandle(_) => f.write_str("ByHandle(..)"),
        }
    }
}

impl From<&str> for TokenizerSource {
    fn from(name: &str) -> Self {
        Self::ByName(name.to_string())
    }
}

impl From<String> for TokenizerSource {
    fn from(name: String) -> Self {
        Self::ByName(name)
    }
}

impl From<Box<dyn TokenizerCapability>> for TokenizerSource {
    fn from(tokenizer: Box<dyn TokenizerCapability>) -> Self {
        Self::ByHandle(tokenizer)
    }
}

#[cfg(feature = "tokenizers")]
impl From<tokenizers::Tokenizer> for TokenizerSource {
    fn from(tokenizer: tokenizers::Tokenizer) -> Self {
        Self::ByHandle(Box::new(crate::tokenization::HfTokenizer::from(tokenizer)))
    }
}

/// A resolved tokenizer, and the advisories raised resolving it.
pub struct ResolvedTokenizer {
    /// The tokenizer.
    pub tokenizer: Box<dyn TokenizerCapability>,

    /// Non-fatal advisories.
    pub diagnostics: Vec<Diagnostic>,
}

impl TokenizerSource {
    /// Construct a source from any tokenizer implementation.
    pub fn from_handle<T: TokenizerCapability + 'static>(tokenizer: T) -> Self {
        Self::ByHandle(Box::new(tokenizer))
    }

    /// Resolve the source to a tokenizer.
    ///
    /// Names are tried as local paths first; then as hub checkpoints,
    /// which carry an [`Diagnostic::UnverifiedCheckpoint`] when they are
    /// not in [`VERIFIED_CHECKPOINTS`](crate::tokenization::VERIFIED_CHECKPOINTS).
    ///
    /// ## Returns
    /// The tokenizer, or [`IobError::TokenizerLoad`](crate::errors::IobError::TokenizerLoad).
    pub fn resolve(self) -> IobResult<ResolvedTokenizer> {
        match self {
            Self::ByHandle(tokenizer) => Ok(ResolvedTokenizer {
                tokenizer,
                diagnostics: Vec::new(),
            }),
            Self::ByName(name) => resolve_name(&name),
        }
    }
}

#[cfg(feature = "tokenizers")]
fn resolve_name(name: &str) -> IobResult<ResolvedTokenizer> {
    use std::path::Path;

    use crate::tokenization::HfTokenizer;

    let path = Path::new(name);
    let file = if path.is_dir() {
        path.join("tokenizer.json")
    } else {
        path.to_path_buf()
    };
    if file.is_file() {
        log::debug!("loading tokenizer from {}", file.display());
        return Ok(ResolvedTokenizer {
            tokenizer: Box::new(HfTokenizer::from_file(&file)?),
            diagnostics: Vec::new(),
        });
    }

    cfg_if::cfg_if! {
        if #[cfg(feature = "download")] {
            log::debug!("loading tokenizer '{name}' from the hub");
            let diagnostics = crate::tokenization::checkpoint_diagnostics(name);
            Ok(ResolvedTokenizer {
                tokenizer: Box::new(HfTokenizer::from_pretrained(name)?),
                diagnostics,
            })
        } else {
            Err(crate::errors::IobError::TokenizerLoad {
                name: name.to_string(),
                reason: "not a local tokenizer file; loading hub checkpoints requires the \"download\" feature".to_string(),
            })
        }
    }
}

#[cfg(not(feature = "tokenizers"))]
fn resolve_name(name: &str) -> IobResult<ResolvedTokenizer> {
    Err(crate::errors::IobError::TokenizerLoad {
        name: name.to_string(),
        reason: "loading tokenizers by name requires the \"tokenizers\" feature".to_string(),
    })
}
