//! # Verified Checkpoints
//!
//! Hub checkpoints whose offset semantics have been verified against the
//! round-trip check. Other checkpoints may work, but resolving one by name
//! yields a [`Diagnostic::UnverifiedCheckpoint`].

use core::fmt;

/// Tokenizer families, by how they split and mark sub-words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[non_exhaustive]
pub enum TokenizerFamily {
    /// `##`-continuation word-piece (BERT, ELECTRA).
    WordPiece,

    /// Byte-level BPE (RoBERTa, Longformer).
    ByteLevelBpe,

    /// Sentence-piece BPE (XLM-R, CamemBERT).
    SentencePieceBpe,

    /// Sentence-piece unigram (ALBERT, XLNet, T5).
    SentencePieceUnigram,
}

/// A verified hub checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedCheckpoint {
    /// The hub checkpoint name.
    pub name: &'static str,

    /// The tokenizer family.
    pub family: TokenizerFamily,
}

const fn checkpoint(
    name: &'static str,
    family: TokenizerFamily,
) -> VerifiedCheckpoint {
    VerifiedCheckpoint { name, family }
}

/// Checkpoints verified with this crate, grouped by family.
pub const VERIFIED_CHECKPOINTS: &[VerifiedCheckpoint] = {
    use TokenizerFamily::*;
    &[
        checkpoint("bert-base-cased", WordPiece),
        checkpoint("bert-base-uncased", WordPiece),
        checkpoint("bert-large-cased", WordPiece),
        checkpoint("bert-large-uncased", WordPiece),
        checkpoint("bert-base-multilingual-cased", WordPiece),
        checkpoint("distilbert-base-cased", WordPiece),
        checkpoint("distilbert-base-uncased", WordPiece),
        checkpoint("google/electra-base-discriminator", WordPiece),
        checkpoint("roberta-base", ByteLevelBpe),
        checkpoint("roberta-large", ByteLevelBpe),
        checkpoint("distilroberta-base", ByteLevelBpe),
        checkpoint("allenai/longformer-base-4096", ByteLevelBpe),
        checkpoint("FacebookAI/xlm-roberta-base", SentencePieceBpe),
        checkpoint("almanach/camembert-base", SentencePieceBpe),
        checkpoint("albert-base-v2", SentencePieceUnigram),
        checkpoint("xlnet-base-cased", SentencePieceUnigram),
        checkpoint("t5-small", SentencePieceUnigram),
        checkpoint("google/flan-t5-base", SentencePieceUnigram),
    ]
};

/// Look up a verified checkpoint by name.
pub fn find_verified_checkpoint(name: &str) -> Option<&'static VerifiedCheckpoint> {
    VERIFIED_CHECKPOINTS.iter().find(|cp| cp.name == name)
}

/// List the verified checkpoint names.
pub fn list_verified_checkpoints() -> Vec<&'static str> {
    VERIFIED_CHECKPOINTS.iter().map(|cp| cp.name).collect()
}

/// A non-fatal advisory produced while resolving a tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Diagnostic {
    /// The checkpoint is not in [`VERIFIED_CHECKPOINTS`].
    UnverifiedCheckpoint {
        /// The checkpoint name.
        name: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::UnverifiedCheckpoint { name } => write!(
                f,
                "tokenizer '{name}' is not in the list of checkpoints tested with iob2labels; \
                 it may work correctly, but results have not been verified"
            ),
        }
    }
}

/// Advisories for resolving a hub checkpoint by name.
pub fn checkpoint_diagnostics(name: &str) -> Vec<Diagnostic> {
    match find_verified_checkpoint(name) {
        Some(_) => Vec::new(),
        None => vec![Diagnostic::UnverifiedCheckpoint {
            name: name.to_string(),
        }],
    }
}
