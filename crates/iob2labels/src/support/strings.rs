//! # String Utilities
//!
//! Span offsets count `char`s, not bytes.

/// The length of `text` in `char`s.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Slice `text` by a half-open `char` range.
///
/// Bounds past the end of the text are clamped.
pub fn char_slice(
    text: &str,
    start: usize,
    end: usize,
) -> &str {
    let byte_at = |idx: usize| {
        text.char_indices()
            .nth(idx)
            .map(|(pos, _)| pos)
            .unwrap_or(text.len())
    };

    let start = byte_at(start);
    let end = byte_at(end).max(start);
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_slice_ascii() {
        let text = "Did Dame Judy Dench star";
        assert_eq!(char_slice(text, 4, 19), "Dame Judy Dench");
        assert_eq!(char_slice(text, 0, 0), "");
        assert_eq!(char_slice(text, 20, 100), "star");
    }

    #[test]
    fn test_char_slice_multibyte() {
        let text = "caf\u{00e9} na\u{00ef}ve";
        assert_eq!(char_len(text), 10);
        assert_eq!(char_slice(text, 0, 4), "caf\u{00e9}");
        assert_eq!(char_slice(text, 5, 10), "na\u{00ef}ve");
    }
}
