//! Inline span formatter. Rewrites emphasis markers, emails and phone numbers
//! in a single line into the backend's rich-text tags (`<b>`, `<i>`, `<u>`).
//!
//! Four sequential passes over the same string: bold → italic → email → phone.
//! Each pass sees the output of the previous one, so tags can nest or
//! interleave (a phone number inside `<b>` gets its own `<u>`). The markup
//! parser in `markup.rs` accepts both.
//!
//! Bold MUST run before italic: `\*(.*?)\*` would otherwise split `**x**`
//! into two empty italic spans.

use std::sync::OnceLock;

use regex::Regex;

const BOLD_PATTERN: &str = r"\*\*(.*?)\*\*";
const ITALIC_PATTERN: &str = r"\*(.*?)\*";
const EMAIL_PATTERN: &str = r"(\S+@\S+\.\S+)";
/// Deliberately loose. Years and numeric ranges match too.
const PHONE_PATTERN: &str = r"(\+?\d{1,3}[-.\s]?\(?\d{1,4}\)?[-.\s]?\d{1,4}[-.\s]?\d{1,9})";

struct InlinePatterns {
    bold: Regex,
    italic: Regex,
    email: Regex,
    phone: Regex,
}

fn patterns() -> &'static InlinePatterns {
    static PATTERNS: OnceLock<InlinePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| InlinePatterns {
        bold: Regex::new(BOLD_PATTERN).expect("Invalid bold regex"),
        italic: Regex::new(ITALIC_PATTERN).expect("Invalid italic regex"),
        email: Regex::new(EMAIL_PATTERN).expect("Invalid email regex"),
        phone: Regex::new(PHONE_PATTERN).expect("Invalid phone regex"),
    })
}

/// Formats one line of restricted Markdown into rich-text markup.
///
/// Never fails: unmatched markers are left as literal characters.
pub fn format_inline(line: &str) -> String {
    let p = patterns();
    let text = p.bold.replace_all(line, "<b>${1}</b>");
    let text = p.italic.replace_all(&text, "<i>${1}</i>");
    let text = p.email.replace_all(&text, "<u>${1}</u>");
    let text = p.phone.replace_all(&text, "<u>${1}</u>");
    text.into_owned()
}

/// Wraps the whole string in a bold tag without any other inline processing.
pub fn bold_wrap(text: &str) -> String {
    format!("<b>{text}</b>")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_markers_become_bold_tag() {
        let out = format_inline("**bold**");
        assert_eq!(out, "<b>bold</b>");
        assert!(!out.contains('*'));
    }

    #[test]
    fn test_single_markers_become_italic_only() {
        let out = format_inline("*italic*");
        assert_eq!(out, "<i>italic</i>");
        assert!(!out.contains("<b>"));
    }

    #[test]
    fn test_bold_and_italic_stay_independent() {
        assert_eq!(
            format_inline("**a** and *b*"),
            "<b>a</b> and <i>b</i>"
        );
    }

    #[test]
    fn test_bold_matching_is_non_greedy() {
        assert_eq!(
            format_inline("**one** two **three**"),
            "<b>one</b> two <b>three</b>"
        );
    }

    #[test]
    fn test_email_is_underlined() {
        assert_eq!(
            format_inline("contact me at a@b.com"),
            "contact me at <u>a@b.com</u>"
        );
    }

    #[test]
    fn test_phone_is_underlined() {
        assert_eq!(
            format_inline("call +1-555-123-4567"),
            "call <u>+1-555-123-4567</u>"
        );
    }

    #[test]
    fn test_unmatched_markers_are_left_literal() {
        assert_eq!(format_inline("a *single star"), "a *single star");
        assert_eq!(format_inline("5 * 3"), "5 * 3");
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(format_inline("Led team of 5"), "Led team of 5");
        assert_eq!(format_inline(""), "");
    }

    #[test]
    fn test_phone_inside_bold_gets_nested_underline() {
        assert_eq!(
            format_inline("**555-123-4567**"),
            "<b><u>555-123-4567</u></b>"
        );
    }

    #[test]
    fn test_years_are_underlined_by_loose_phone_pattern() {
        // Inherited false positive on four-digit runs.
        assert_eq!(format_inline("Since 2020"), "Since <u>2020</u>");
    }

    #[test]
    fn test_bold_wrap_skips_inline_processing() {
        assert_eq!(bold_wrap("*x* 2020"), "<b>*x* 2020</b>");
    }
}
