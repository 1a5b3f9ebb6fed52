//! `{a.b.c}` reference syntax.

use crate::path::TokenPath;
use regex::Regex;
use std::sync::OnceLock;

/// Pattern for a single placeholder: a dotted path between braces.
///
/// Segments may contain any character except braces, dots, quotes, `:` and
/// `;`, and may not start or end with whitespace, so keys such as
/// `brand blue` match. CSS rule blocks (`{ color: red }`, `a{color:red}`) and
/// SCSS interpolation (`#{$x}`) do not.
pub const PLACEHOLDER_PATTERN: &str = concat!(
    r#"\{("#,
    r#"[^{}.:;$"'\s](?:[^{}.:;"'\n]*[^{}.:;"'\s])?"#,
    r#"(?:\.[^{}.:;$"'\s](?:[^{}.:;"'\n]*[^{}.:;"'\s])?)*"#,
    r#")\}"#,
);

/// Compiled placeholder pattern.
pub fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid"))
}

/// If the whole string is a single reference (`{grey.100}`), return its path.
pub fn parse_whole(s: &str) -> Option<TokenPath> {
    let trimmed = s.trim();
    let caps = placeholder_regex().captures(trimmed)?;
    let whole = caps.get(0)?;
    if whole.start() == 0 && whole.end() == trimmed.len() {
        Some(TokenPath::from_dotted(&caps[1]))
    } else {
        None
    }
}

/// All references appearing anywhere in the string, in order.
pub fn find_all(s: &str) -> Vec<TokenPath> {
    placeholder_regex()
        .captures_iter(s)
        .map(|caps| TokenPath::from_dotted(&caps[1]))
        .collect()
}

/// Whether the string contains at least one reference.
pub fn contains_reference(s: &str) -> bool {
    placeholder_regex().is_match(s)
}

/// Format a path as a reference string.
pub fn format(path: &TokenPath) -> String {
    format!("{{{}}}", path.dotted())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_reference() {
        assert_eq!(parse_whole("{grey.100}"), Some(TokenPath::from_dotted("grey.100")));
        assert_eq!(parse_whole("  {grey.100} "), Some(TokenPath::from_dotted("grey.100")));
    }

    #[test]
    fn test_parse_whole_rejects_embedded() {
        assert_eq!(parse_whole("0 1px {grey.100}"), None);
        assert_eq!(parse_whole("#f0f0f0"), None);
    }

    #[test]
    fn test_find_all_embedded() {
        let refs = find_all("{spacing.sm} {spacing.md} solid {color.border}");
        assert_eq!(
            refs,
            vec![
                TokenPath::from_dotted("spacing.sm"),
                TokenPath::from_dotted("spacing.md"),
                TokenPath::from_dotted("color.border"),
            ]
        );
    }

    #[test]
    fn test_css_blocks_are_not_references() {
        assert!(!contains_reference(":root { --a: 1px; }"));
        assert!(contains_reference("--a: {grey.100};"));
    }

    #[test]
    fn test_css_and_scss_syntax_are_not_references() {
        assert!(!contains_reference("a{color:red}"));
        assert!(!contains_reference("width: #{$gutter};"));
    }

    #[test]
    fn test_keys_with_spaces_are_references() {
        assert_eq!(
            parse_whole("{colors.brand blue}"),
            Some(TokenPath::from_segments(["colors", "brand blue"]))
        );
        assert_eq!(
            find_all("1px solid {colors.brand blue}"),
            vec![TokenPath::from_segments(["colors", "brand blue"])]
        );
        assert!(contains_reference("--a: {brand@2x.hover state};"));
    }

    #[test]
    fn test_padded_braces_are_not_references() {
        assert!(!contains_reference("{ grey.100 }"));
        assert!(!contains_reference("@media (x) { .a { } }"));
        assert!(!contains_reference("{}"));
    }

    #[test]
    fn test_format() {
        assert_eq!(format(&TokenPath::from_dotted("a.b")), "{a.b}");
    }
}
