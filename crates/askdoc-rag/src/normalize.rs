//! Text normalization ahead of chunking

use regex::Regex;
use std::sync::LazyLock;

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static EXCESS_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("valid regex"));

/// Normalize raw document text for clean chunks.
///
/// Applies, in order: CRLF/CR to LF, tab to space, NUL removal, collapsing
/// 3+ consecutive newlines to exactly 2, collapsing 2+ consecutive spaces to
/// 1, trimming leading/trailing whitespace. Deterministic and pure.
pub fn normalize(raw: &str) -> String {
    let unified = raw
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', " ")
        .replace('\0', "");
    let collapsed = EXCESS_NEWLINES.replace_all(&unified, "\n\n");
    let collapsed = EXCESS_SPACES.replace_all(&collapsed, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifies_line_endings() {
        assert_eq!(normalize("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn strips_tabs_and_nul_bytes() {
        assert_eq!(normalize("a\tb\0c"), "a bc");
    }

    #[test]
    fn collapses_newline_and_space_runs() {
        assert_eq!(normalize("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize("a     b"), "a b");
        // Exactly two newlines are kept.
        assert_eq!(normalize("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize("  hello world \n"), "hello world");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn is_deterministic_and_idempotent() {
        let text = "Line one.\r\n\r\n\r\nLine\ttwo.   End. ";
        let once = normalize(text);
        assert_eq!(normalize(&once), once);
    }
}
