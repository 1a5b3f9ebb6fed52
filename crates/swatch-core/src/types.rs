//! Tiers and token types.

use std::fmt;

/// The three token tiers, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// Raw design values (`grey.100`).
    Primitive,
    /// Intent-carrying aliases of primitives.
    Semantic,
    /// Values scoped to a single UI component.
    Component,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Primitive, Tier::Semantic, Tier::Component];

    /// Name used in CSS variables (`--token-<tier>-...`).
    pub fn css_name(&self) -> &'static str {
        match self {
            Tier::Primitive => "primitive",
            Tier::Semantic => "semantic",
            Tier::Component => "component",
        }
    }

    /// Source directory under the tokens root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Tier::Primitive => "primitives",
            Tier::Semantic => "semanticTokens",
            Tier::Component => "componentTokens",
        }
    }

    /// Pascal-case label used for generated type names.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Primitive => "Primitive",
            Tier::Semantic => "Semantic",
            Tier::Component => "Component",
        }
    }

    pub fn parse(s: &str) -> Option<Tier> {
        match s.to_ascii_lowercase().as_str() {
            "primitive" | "primitives" => Some(Tier::Primitive),
            "semantic" | "semantictokens" => Some(Tier::Semantic),
            "component" | "components" | "componenttokens" => Some(Tier::Component),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// The `$type` of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Color,
    Dimension,
    FontFamily,
    FontWeight,
    FontSize,
    LineHeight,
    Spacing,
    BorderRadius,
    BorderWidth,
    BoxShadow,
    Opacity,
    ZIndex,
    Duration,
    Easing,
    Sizing,
    Typography,
    Other,
}

impl TokenType {
    /// Parse a `$type` string. Returns `None` for unrecognized types.
    pub fn parse(s: &str) -> Option<TokenType> {
        let ty = match s {
            "color" => TokenType::Color,
            "dimension" => TokenType::Dimension,
            "fontFamily" | "fontFamilies" => TokenType::FontFamily,
            "fontWeight" | "fontWeights" => TokenType::FontWeight,
            "fontSize" | "fontSizes" => TokenType::FontSize,
            "lineHeight" | "lineHeights" => TokenType::LineHeight,
            "spacing" => TokenType::Spacing,
            "borderRadius" => TokenType::BorderRadius,
            "borderWidth" => TokenType::BorderWidth,
            "boxShadow" | "shadow" => TokenType::BoxShadow,
            "opacity" => TokenType::Opacity,
            "zIndex" => TokenType::ZIndex,
            "duration" => TokenType::Duration,
            "easing" | "cubicBezier" => TokenType::Easing,
            "sizing" => TokenType::Sizing,
            "typography" => TokenType::Typography,
            "other" => TokenType::Other,
            _ => return None,
        };
        Some(ty)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Color => "color",
            TokenType::Dimension => "dimension",
            TokenType::FontFamily => "fontFamily",
            TokenType::FontWeight => "fontWeight",
            TokenType::FontSize => "fontSize",
            TokenType::LineHeight => "lineHeight",
            TokenType::Spacing => "spacing",
            TokenType::BorderRadius => "borderRadius",
            TokenType::BorderWidth => "borderWidth",
            TokenType::BoxShadow => "boxShadow",
            TokenType::Opacity => "opacity",
            TokenType::ZIndex => "zIndex",
            TokenType::Duration => "duration",
            TokenType::Easing => "easing",
            TokenType::Sizing => "sizing",
            TokenType::Typography => "typography",
            TokenType::Other => "other",
        }
    }

    /// Types whose value is an object of sub-fields.
    pub fn is_composite(&self) -> bool {
        matches!(self, TokenType::BoxShadow | TokenType::Typography)
    }

    /// Types whose bare numbers are emitted with a `px` suffix.
    pub fn is_pixel(&self) -> bool {
        matches!(
            self,
            TokenType::Dimension
                | TokenType::FontSize
                | TokenType::Spacing
                | TokenType::BorderRadius
                | TokenType::BorderWidth
                | TokenType::Sizing
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
