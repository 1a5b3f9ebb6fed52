//! Token values and their CSS text.

use crate::path::TokenPath;
use crate::reference;
use crate::types::TokenType;
use indexmap::IndexMap;
use serde_json::Value;

/// The `$value` of a token.
///
/// Strings may hold `{a.b.c}` references until resolution replaces them.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    String(String),
    Number(f64),
    Bool(bool),
    List(Vec<TokenValue>),
    Composite(IndexMap<String, TokenValue>),
}

impl TokenValue {
    /// Convert a JSON value. `null` (anywhere) is not a valid token value.
    pub fn from_json(value: &Value) -> Option<TokenValue> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(TokenValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(TokenValue::Number),
            Value::String(s) => Some(TokenValue::String(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(TokenValue::from_json)
                .collect::<Option<Vec<_>>>()
                .map(TokenValue::List),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| TokenValue::from_json(v).map(|v| (k.clone(), v)))
                .collect::<Option<IndexMap<_, _>>>()
                .map(TokenValue::Composite),
        }
    }

    /// Every reference in this value, including inside lists and composites.
    pub fn references(&self) -> Vec<TokenPath> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references(&self, out: &mut Vec<TokenPath>) {
        match self {
            TokenValue::String(s) => out.extend(reference::find_all(s)),
            TokenValue::List(items) => items.iter().for_each(|v| v.collect_references(out)),
            TokenValue::Composite(map) => map.values().for_each(|v| v.collect_references(out)),
            TokenValue::Number(_) | TokenValue::Bool(_) => {}
        }
    }

    pub fn has_references(&self) -> bool {
        match self {
            TokenValue::String(s) => reference::contains_reference(s),
            TokenValue::List(items) => items.iter().any(TokenValue::has_references),
            TokenValue::Composite(map) => map.values().any(TokenValue::has_references),
            TokenValue::Number(_) | TokenValue::Bool(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render the literal CSS text of this value for a token of type `ty`.
    pub fn css_text(&self, ty: TokenType) -> String {
        match self {
            TokenValue::String(s) => {
                if ty.is_pixel() && s.trim().parse::<f64>().is_ok() {
                    format!("{}px", s.trim())
                } else {
                    s.clone()
                }
            }
            TokenValue::Number(n) => {
                if ty.is_pixel() {
                    format!("{}px", format_number(*n))
                } else {
                    format_number(*n)
                }
            }
            TokenValue::Bool(b) => b.to_string(),
            TokenValue::List(items) => match ty {
                TokenType::BoxShadow => items
                    .iter()
                    .map(|item| item.css_text(ty))
                    .collect::<Vec<_>>()
                    .join(", "),
                TokenType::FontFamily => font_family_list(items),
                TokenType::Easing if items.len() == 4 => format!(
                    "cubic-bezier({})",
                    items
                        .iter()
                        .map(|item| item.css_text(TokenType::Other))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                _ => items
                    .iter()
                    .map(|item| item.css_text(ty))
                    .collect::<Vec<_>>()
                    .join(" "),
            },
            TokenValue::Composite(map) => match ty {
                TokenType::BoxShadow => shadow_text(map),
                TokenType::Typography => font_shorthand(map),
                _ => map
                    .values()
                    .map(|v| v.css_text(ty))
                    .collect::<Vec<_>>()
                    .join(" "),
            },
        }
    }
}

/// Format a number without a trailing `.0` for integral values.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn field<'a>(map: &'a IndexMap<String, TokenValue>, names: &[&str]) -> Option<&'a TokenValue> {
    names.iter().find_map(|name| map.get(*name))
}

fn shadow_text(map: &IndexMap<String, TokenValue>) -> String {
    let length = |names: &[&str]| {
        field(map, names)
            .map(|v| v.css_text(TokenType::Dimension))
            .unwrap_or_else(|| "0".to_string())
    };

    let inset = matches!(field(map, &["inset"]), Some(TokenValue::Bool(true)))
        || matches!(field(map, &["type"]), Some(TokenValue::String(s)) if s == "innerShadow");

    let mut parts = Vec::new();
    if inset {
        parts.push("inset".to_string());
    }
    parts.push(length(&["offsetX", "x"]));
    parts.push(length(&["offsetY", "y"]));
    parts.push(length(&["blur"]));
    parts.push(length(&["spread"]));
    if let Some(color) = field(map, &["color"]) {
        parts.push(color.css_text(TokenType::Color));
    }
    parts.join(" ")
}

fn font_shorthand(map: &IndexMap<String, TokenValue>) -> String {
    let mut parts = Vec::new();
    if let Some(style) = field(map, &["fontStyle"]) {
        parts.push(style.css_text(TokenType::Other));
    }
    if let Some(weight) = field(map, &["fontWeight"]) {
        parts.push(weight.css_text(TokenType::FontWeight));
    }

    let size = field(map, &["fontSize"]).map(|v| v.css_text(TokenType::FontSize));
    let line_height = field(map, &["lineHeight"]).map(|v| v.css_text(TokenType::LineHeight));
    match (size, line_height) {
        (Some(size), Some(lh)) => parts.push(format!("{}/{}", size, lh)),
        (Some(size), None) => parts.push(size),
        (None, _) => {}
    }

    if let Some(family) = field(map, &["fontFamily"]) {
        parts.push(family.css_text(TokenType::FontFamily));
    }
    parts.join(" ")
}

fn font_family_list(items: &[TokenValue]) -> String {
    items
        .iter()
        .map(|item| {
            let name = item.css_text(TokenType::Other);
            let quoted = name.starts_with('"') || name.starts_with('\'');
            if name.contains(' ') && !quoted {
                format!("\"{}\"", name)
            } else {
                name
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
