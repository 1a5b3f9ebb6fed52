//! Token paths.

use convert_case::{Boundary, Case, Converter};
use smallvec::SmallVec;
use std::fmt;

/// A token path like `grey.100` or `background-passive-neutral-default`.
///
/// Segments are kept exactly as they appear in the source JSON. The dotted
/// form is used for references and diagnostics, the kebab form for CSS names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TokenPath(pub SmallVec<[String; 4]>);

impl TokenPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dot-delimited path. Empty segments are dropped.
    pub fn from_dotted(s: &str) -> Self {
        TokenPath(
            s.split('.')
                .map(str::trim)
                .filter(|seg| !seg.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TokenPath(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        TokenPath(segments)
    }

    /// Whether `prefix` is equal to, or a leading part of, this path.
    pub fn starts_with(&self, prefix: &TokenPath) -> bool {
        prefix.len() <= self.len() && self.0[..prefix.len()] == prefix.0[..]
    }

    /// Replace the leading `from` segments with `to`, if this path starts with `from`.
    pub fn rebase(&self, from: &TokenPath, to: &TokenPath) -> Option<TokenPath> {
        if !self.starts_with(from) {
            return None;
        }
        let mut segments = to.0.clone();
        segments.extend(self.0[from.len()..].iter().cloned());
        Some(TokenPath(segments))
    }

    /// Dot-joined form used inside `{...}` references.
    pub fn dotted(&self) -> String {
        self.0.join(".")
    }

    /// Kebab-case form used in CSS custom property names.
    ///
    /// Each segment is split on hyphens, underscores, spaces, and lower-to-upper
    /// transitions (`fontSize` -> `font-size`), then lowercased. Digit boundaries
    /// are left alone so `2xl` stays `2xl`.
    pub fn kebab(&self) -> String {
        let converter = Converter::new()
            .set_boundaries(&[
                Boundary::Hyphen,
                Boundary::Underscore,
                Boundary::Space,
                Boundary::LowerUpper,
            ])
            .to_case(Case::Kebab);

        self.0
            .iter()
            .map(|seg| converter.convert(seg))
            .filter(|seg| !seg.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl From<&str> for TokenPath {
    fn from(s: &str) -> Self {
        TokenPath::from_dotted(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_dotted() {
        let path = TokenPath::from_dotted("grey.100");
        assert_eq!(path.segments(), &["grey".to_string(), "100".to_string()]);
        assert_eq!(path.dotted(), "grey.100");
    }

    #[test]
    fn test_from_dotted_drops_empty_segments() {
        let path = TokenPath::from_dotted(".grey..100.");
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_kebab_keeps_hyphenated_keys() {
        let path = TokenPath::from_dotted("background-passive-neutral-default");
        assert_eq!(path.kebab(), "background-passive-neutral-default");
    }

    #[test]
    fn test_kebab_splits_camel_case() {
        let path = TokenPath::from_dotted("fontSize.lg");
        assert_eq!(path.kebab(), "font-size-lg");

        let path = TokenPath::from_dotted("button.primary.borderRadius");
        assert_eq!(path.kebab(), "button-primary-border-radius");
    }

    #[test]
    fn test_kebab_leaves_digit_boundaries() {
        assert_eq!(TokenPath::from_dotted("spacing.2xl").kebab(), "spacing-2xl");
        assert_eq!(TokenPath::from_dotted("grey.100").kebab(), "grey-100");
    }

    #[test]
    fn test_starts_with_and_rebase() {
        let path = TokenPath::from_dotted("color.brand.primary");
        let from = TokenPath::from_dotted("color.brand");
        let to = TokenPath::from_dotted("palette.accent");

        assert!(path.starts_with(&from));
        assert!(!from.starts_with(&path));
        assert_eq!(
            path.rebase(&from, &to),
            Some(TokenPath::from_dotted("palette.accent.primary"))
        );
        assert_eq!(to.rebase(&from, &path), None);
    }

    #[test]
    fn test_child() {
        let path = TokenPath::from_dotted("grey").child("100");
        assert_eq!(path.to_string(), "grey.100");
    }

    proptest! {
        #[test]
        fn test_dotted_round_trip(segments in prop::collection::vec("[a-z][a-z0-9-]{0,8}", 1..5)) {
            let path = TokenPath::from_segments(segments.clone());
            let reparsed = TokenPath::from_dotted(&path.dotted());
            prop_assert_eq!(reparsed, path);
        }

        #[test]
        fn test_kebab_is_lowercase_without_dots(segments in prop::collection::vec("[a-zA-Z][a-zA-Z0-9]{0,8}", 1..5)) {
            let kebab = TokenPath::from_segments(segments).kebab();
            prop_assert!(!kebab.contains('.'));
            prop_assert_eq!(kebab.to_lowercase(), kebab);
        }
    }
}
