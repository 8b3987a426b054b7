//! Display-width measuring and truncation shared by columns and formatters.
//!
//! Widths are terminal cells, not bytes: escape sequences count as zero and
//! wide characters (CJK, most emoji) count as two.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

static ANSI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap());

/// Plain numbers, grouped numbers, percentages, currency amounts and sizes
/// such as `-1,234.5`, `45%`, `$9.99`, `1.5 KB`.
static NUMERIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[-+]?[$€£¥]?[-+]?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?(?:[eE][-+]?\d+)?(?:\s?(?:%|[KMGTP]?B|[$€£¥]))?$",
    )
    .unwrap()
});

/// Fraction of the content budget a word-boundary cut must preserve.
const WORD_CUT_THRESHOLD: (usize, usize) = (7, 10);

pub fn strip_ansi(text: &str) -> String {
    if !text.contains('\x1b') {
        return text.to_string();
    }
    ANSI_REGEX.replace_all(text, "").into_owned()
}

pub fn display_width(text: &str) -> usize {
    if text.contains('\x1b') {
        strip_ansi(text).width()
    } else {
        text.width()
    }
}

pub fn is_numeric_like(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && NUMERIC_REGEX.is_match(trimmed)
}

/// Longest prefix of `text` whose display width is at most `width`.
pub fn take_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Fit `text` into `width` cells, marking the cut with `ellipsis`.
///
/// When `width` cannot hold the ellipsis plus at least one cell, the
/// ellipsis itself is cut to `width`. In word-aware mode the cut backs up to
/// the last space inside the budget if that keeps more than 70% of it.
/// Escape sequences are dropped from text that needs cutting.
pub fn truncate_to_width(text: &str, width: usize, ellipsis: &str, word_aware: bool) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }

    let plain = strip_ansi(text);
    let ellipsis_width = ellipsis.width();
    if width <= ellipsis_width {
        return take_width(ellipsis, width);
    }

    let budget = width - ellipsis_width;
    let mut cut = take_width(&plain, budget);

    if word_aware && let Some(space) = cut.rfind(' ') {
        let (num, den) = WORD_CUT_THRESHOLD;
        if cut[..space].width() * den > budget * num {
            cut = cut[..space].trim_end().to_string();
        }
    }

    format!("{}{}", cut, ellipsis)
}

/// Collapse line breaks and tabs so a cell stays on one line.
pub fn single_line(text: &str) -> String {
    if !text.contains(['\n', '\r', '\t']) {
        return text.to_string();
    }
    text.replace("\r\n", " ").replace(['\n', '\r', '\t'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_ignores_escapes_and_counts_wide_chars() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("\x1b[1;32mabc\x1b[0m"), 3);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn test_truncate_noop_when_fits() {
        assert_eq!(truncate_to_width("hello", 5, "...", false), "hello");
    }

    #[test]
    fn test_truncate_hard_cut() {
        assert_eq!(truncate_to_width("hello world", 8, "...", false), "hello...");
    }

    #[test]
    fn test_truncate_word_boundary_past_threshold() {
        // budget 17; the last space sits at 15, past 70% of 17
        let text = "the quick brown fox jumps over";
        assert_eq!(truncate_to_width(text, 20, "...", true), "the quick brown...");
    }

    #[test]
    fn test_truncate_word_boundary_too_early_hard_cuts() {
        // budget 10; the last space sits at 2, below 70% of 10
        let text = "ab cdefghijklmnop";
        assert_eq!(truncate_to_width(text, 13, "...", true), "ab cdefghi...");
    }

    #[test]
    fn test_truncate_word_boundary_exactly_at_threshold() {
        // budget 10; a space at 7 is not past 70%, one at 8 is
        assert_eq!(truncate_to_width("abcdefg hijklmnop", 13, "...", true), "abcdefg hi...");
        assert_eq!(truncate_to_width("abcdefgh ijklmnop", 13, "...", true), "abcdefgh...");
    }

    #[test]
    fn test_truncate_word_boundary_measures_space_position() {
        // the space run starts at 7 but the last space is at 8
        assert_eq!(truncate_to_width("abcdefg  hijklmnop", 13, "...", true), "abcdefg...");
    }

    #[test]
    fn test_truncate_narrower_than_ellipsis() {
        assert_eq!(truncate_to_width("hello", 2, "...", false), "..");
        assert_eq!(truncate_to_width("hello", 3, "...", true), "...");
        assert_eq!(truncate_to_width("hello", 0, "...", true), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        let out = truncate_to_width("日本語テキスト", 7, "…", false);
        assert_eq!(out, "日本語…");
        assert!(display_width(&out) <= 7);
    }

    #[test]
    fn test_numeric_like() {
        for s in ["42", "-3.5", "1,234,567", "45.5%", "$9.99", "1.5 KB", "1e6", " 7 "] {
            assert!(is_numeric_like(s), "{s} should look numeric");
        }
        for s in ["", "abc", "12abc", "1,23", "v1.2.3"] {
            assert!(!is_numeric_like(s), "{s} should not look numeric");
        }
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("a\nb\r\nc\td"), "a b c d");
    }
}
