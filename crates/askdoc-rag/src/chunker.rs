//! Overlapping-window chunker
//!
//! Two interchangeable strategies: token windows when the text tokenizes to
//! anything at all, character windows otherwise. Window geometry is
//! validated at configuration load, so the loops here always advance.

use regex::Regex;
use std::sync::LazyLock;

use askdoc_core::ChunkingConfig;

/// Alphanumeric runs (accented Latin included) or single punctuation
/// characters. Whitespace never becomes a token.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-zÀ-ÿ0-9]+|[^\sA-Za-zÀ-ÿ0-9]").expect("valid regex"));
static PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\sA-Za-zÀ-ÿ0-9]").expect("valid regex"));

/// Split text into word and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Re-join tokens into text: a single space before alphanumeric tokens, no
/// space before punctuation tokens.
pub fn join_tokens(tokens: &[&str]) -> String {
    let mut out = String::new();
    for token in tokens {
        if out.is_empty() {
            out.push_str(token);
            continue;
        }
        if PUNCT.is_match(token) {
            out.push_str(token);
        } else {
            out.push(' ');
            out.push_str(token);
        }
    }
    out.trim().to_string()
}

/// Token-windowed chunking: windows of `size` tokens, each next window
/// starting `overlap` tokens before the previous end. The last window stops
/// exactly at the token-sequence end.
pub fn chunk_token_windows(tokens: &[&str], size: usize, overlap: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    if tokens.is_empty() {
        return chunks;
    }

    let mut start = 0;
    while start < tokens.len() {
        let end = (start + size).min(tokens.len());
        let chunk = join_tokens(&tokens[start..end]);
        if !chunk.is_empty() {
            chunks.push(chunk);
        }
        if end == tokens.len() {
            break;
        }
        start = end.saturating_sub(overlap);
    }

    chunks
}

/// Character-windowed fallback, used only when tokenization yields zero
/// tokens.
pub fn chunk_char_windows(text: &str, size: usize, overlap: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    if text.is_empty() {
        return chunks;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + size).min(chars.len());
        let chunk: String = chars[start..end].iter().collect();
        let chunk = chunk.trim().to_string();
        if !chunk.is_empty() {
            chunks.push(chunk);
        }
        if end == chars.len() {
            break;
        }
        start = end.saturating_sub(overlap);
    }

    chunks
}

/// Split normalized text into an order-preserving, finite sequence of
/// chunks. Empty input yields zero chunks; windows that trim to an empty
/// string are dropped.
pub fn chunk(text: &str, config: &ChunkingConfig) -> Vec<String> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        chunk_char_windows(text, config.chunk_size, config.chunk_overlap)
    } else {
        chunk_token_windows(&tokens, config.chunk_tokens, config.chunk_overlap_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_words_and_punctuation_separately() {
        assert_eq!(tokenize("Hello, world!"), vec!["Hello", ",", "world", "!"]);
        assert_eq!(tokenize("café já"), vec!["café", "já"]);
        assert_eq!(tokenize("a--b"), vec!["a", "-", "-", "b"]);
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn join_is_punctuation_aware() {
        let tokens = tokenize("Hello, world!");
        assert_eq!(join_tokens(&tokens), "Hello, world!");
    }

    #[test]
    fn token_windows_step_by_size_minus_overlap() {
        let words: Vec<String> = (0..10).map(|i| format!("w{i}")).collect();
        let tokens: Vec<&str> = words.iter().map(String::as_str).collect();

        let chunks = chunk_token_windows(&tokens, 4, 1);
        assert_eq!(
            chunks,
            vec![
                "w0 w1 w2 w3",
                "w3 w4 w5 w6",
                "w6 w7 w8 w9",
            ]
        );
    }

    #[test]
    fn last_token_window_stops_at_sequence_end() {
        let words: Vec<String> = (0..5).map(|i| format!("w{i}")).collect();
        let tokens: Vec<&str> = words.iter().map(String::as_str).collect();

        let chunks = chunk_token_windows(&tokens, 4, 1);
        assert_eq!(chunks, vec!["w0 w1 w2 w3", "w3 w4"]);
    }

    #[test]
    fn char_windows_cover_fifteen_hundred_chars_at_expected_offsets() {
        let text: String = std::iter::repeat('x').take(1500).collect();

        let chunks = chunk_char_windows(&text, 700, 100);
        // step = size - overlap = 600, so windows start at 0, 600 and 1200.
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 700);
        assert_eq!(chunks[1].len(), 700);
        assert_eq!(chunks[2].len(), 300);
    }

    #[test]
    fn char_windows_overlap_with_no_gaps() {
        let text: String = ('a'..='z').cycle().take(1500).collect();
        let chunks = chunk_char_windows(&text, 700, 100);

        // Each successive window begins at the previous end minus overlap,
        // so each chunk's first 100 chars equal the previous chunk's last 100.
        for pair in chunks.windows(2) {
            let prev_tail: String = pair[0].chars().rev().take(100).collect::<Vec<_>>()
                .into_iter().rev().collect();
            let next_head: String = pair[1].chars().take(100).collect();
            assert_eq!(prev_tail, next_head);
        }
    }

    #[test]
    fn empty_input_yields_zero_chunks() {
        let config = ChunkingConfig::default();
        assert!(chunk("", &config).is_empty());
        assert!(chunk_char_windows("", 700, 100).is_empty());
        assert!(chunk_token_windows(&[], 600, 80).is_empty());
    }

    #[test]
    fn dispatches_to_token_strategy_when_tokens_exist() {
        let config = ChunkingConfig {
            chunk_tokens: 4,
            chunk_overlap_tokens: 1,
            ..Default::default()
        };
        let chunks = chunk("one two three four five", &config);
        assert_eq!(chunks, vec!["one two three four", "four five"]);
    }
}
