//! # Offline Word-Piece Tokenizer

use tokenizers::{
    AddedToken,
    Tokenizer,
    decoders::wordpiece::WordPiece as WordPieceDecoder,
    models::{bpe::Vocab, wordpiece::WordPiece},
    normalizers::bert::BertNormalizer,
    pre_tokenizers::bert::BertPreTokenizer,
    processors::bert::BertProcessing,
};

use crate::{testing::MOVIE_VOCAB, tokenization::HfTokenizer, types::TokenId};

/// The special tokens of [`movie_tokenizer`]; ids `0..3`.
pub const SPECIAL_TOKENS: [&str; 3] = ["[UNK]", "[CLS]", "[SEP]"];

/// The id of `piece` in [`movie_tokenizer`].
pub fn movie_piece_id(piece: &str) -> Option<TokenId> {
    SPECIAL_TOKENS
        .iter()
        .chain(MOVIE_VOCAB)
        .position(|p| *p == piece)
        .map(|id| id as TokenId)
}

/// A `bert-base-uncased` style tokenizer over [`MOVIE_VOCAB`].
///
/// Built in memory with the `tokenizers` crate:
/// a word-piece model, the BERT normalizer and pre-tokenizer,
/// `[CLS] $A [SEP]` post-processing, and the word-piece decoder.
pub fn movie_tokenizer() -> HfTokenizer {
    let vocab: Vocab = SPECIAL_TOKENS
        .iter()
        .chain(MOVIE_VOCAB)
        .enumerate()
        .map(|(id, piece)| (piece.to_string(), id as u32))
        .collect();

    let model = WordPiece::builder()
        .vocab(vocab)
        .unk_token(SPECIAL_TOKENS[0].to_string())
        .continuing_subword_prefix("##".to_string())
        .build()
        .unwrap();

    let mut tokenizer = Tokenizer::new(model);
    tokenizer
        .with_normalizer(Some(BertNormalizer::default()))
        .with_pre_tokenizer(Some(BertPreTokenizer))
        .with_post_processor(Some(BertProcessing::new(
            (SPECIAL_TOKENS[2].to_string(), 2),
            (SPECIAL_TOKENS[1].to_string(), 1),
        )))
        .with_decoder(Some(WordPieceDecoder::default()));
    tokenizer.add_special_tokens(&SPECIAL_TOKENS.map(|token| AddedToken::from(token, true)));

    HfTokenizer::from(tokenizer)
}
