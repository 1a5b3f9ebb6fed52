//! Conversion of merged JSON into a typed token tree.

use serde_json::{Map, Value};
use swatch_core::{
    Deprecation, LoadError, Tier, Token, TokenGroup, TokenNode, TokenPath, TokenTree, TokenType,
    TokenValue,
};

/// Build the token tree of one tier from its merged JSON object.
pub fn build_tree(tier: Tier, merged: &Map<String, Value>) -> Result<TokenTree, LoadError> {
    TreeBuilder { tier }.build_group(merged, &TokenPath::new(), None)
}

struct TreeBuilder {
    tier: Tier,
}

impl TreeBuilder {
    fn build_group(
        &self,
        object: &Map<String, Value>,
        path: &TokenPath,
        inherited: Option<TokenType>,
    ) -> Result<TokenTree, LoadError> {
        let mut tree = TokenTree::new();

        for (key, value) in object {
            if key.starts_with('$') {
                continue;
            }

            let child_path = path.child(key.as_str());
            let Value::Object(child) = value else {
                return Err(self.invalid(&child_path, "expected a group or token object"));
            };

            let node = if child.contains_key("$value") {
                TokenNode::Token(self.build_token(child, child_path, inherited)?)
            } else {
                let token_type = self.parse_type(child, &child_path).or(inherited);
                TokenNode::Group(TokenGroup {
                    token_type,
                    description: string_field(child, "$description"),
                    children: self.build_group(child, &child_path, token_type)?,
                })
            };
            tree.insert(key.as_str(), node);
        }

        Ok(tree)
    }

    fn build_token(
        &self,
        object: &Map<String, Value>,
        path: TokenPath,
        inherited: Option<TokenType>,
    ) -> Result<Token, LoadError> {
        let raw = object.get("$value").unwrap_or(&Value::Null);
        let value = TokenValue::from_json(raw)
            .ok_or_else(|| self.invalid(&path, "`$value` must not be null"))?;

        let token_type = self.parse_type(object, &path).or(inherited);

        let extensions = object.get("$extensions").cloned();
        let deprecation = deprecation(object, extensions.as_ref());

        Ok(Token {
            path,
            token_type,
            value,
            name: string_field(object, "$name"),
            description: string_field(object, "$description"),
            deprecation,
            extensions,
        })
    }

    /// Read `$type`. Unknown type names fall back to `other` with a warning.
    fn parse_type(&self, object: &Map<String, Value>, path: &TokenPath) -> Option<TokenType> {
        let name = object.get("$type")?.as_str()?;
        match TokenType::parse(name) {
            Some(ty) => Some(ty),
            None => {
                tracing::warn!(
                    tier = %self.tier,
                    token = %path,
                    token_type = name,
                    "unknown token type, treating as `other`"
                );
                Some(TokenType::Other)
            }
        }
    }

    fn invalid(&self, path: &TokenPath, reason: &str) -> LoadError {
        LoadError::InvalidToken {
            tier: self.tier,
            token: path.clone(),
            reason: reason.to_string(),
        }
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Deprecation can be given on the token itself or inside `$extensions`.
fn deprecation(object: &Map<String, Value>, extensions: Option<&Value>) -> Deprecation {
    let lookup = |key: &str| {
        object
            .get(key)
            .or_else(|| extensions.and_then(|ext| ext.get(key)))
    };

    Deprecation {
        deprecated: lookup("deprecated").and_then(Value::as_bool).unwrap_or(false),
        replaced_by: lookup("replacedBy")
            .and_then(Value::as_str)
            .map(|s| s.trim_matches(|c| c == '{' || c == '}'))
            .map(TokenPath::from_dotted)
            .filter(|p| !p.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(tier: Tier, value: Value) -> Result<TokenTree, LoadError> {
        match value {
            Value::Object(map) => build_tree(tier, &map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_group_type_is_inherited() {
        let tree = build(
            Tier::Primitive,
            json!({
                "space": {
                    "$type": "spacing",
                    "sm": {"$value": 4},
                    "md": {"$value": 8, "$type": "dimension"}
                }
            }),
        )
        .unwrap();

        let sm = tree.get(&TokenPath::from_dotted("space.sm")).unwrap();
        assert_eq!(sm.token_type, Some(TokenType::Spacing));
        let md = tree.get(&TokenPath::from_dotted("space.md")).unwrap();
        assert_eq!(md.token_type, Some(TokenType::Dimension));
    }

    #[test]
    fn test_metadata_is_preserved() {
        let tree = build(
            Tier::Semantic,
            json!({
                "text-muted": {
                    "$type": "color",
                    "$value": "{grey.500}",
                    "$name": "Muted text",
                    "$description": "Secondary copy",
                    "$extensions": {"figma": {"id": "12:3"}}
                }
            }),
        )
        .unwrap();

        let token = tree.get(&TokenPath::from_dotted("text-muted")).unwrap();
        assert_eq!(token.name.as_deref(), Some("Muted text"));
        assert_eq!(token.description.as_deref(), Some("Secondary copy"));
        assert_eq!(token.extensions, Some(json!({"figma": {"id": "12:3"}})));
        assert!(!token.is_deprecated());
    }

    #[test]
    fn test_deprecation_from_token_and_extensions() {
        let tree = build(
            Tier::Semantic,
            json!({
                "old": {"$type": "color", "$value": "#000", "deprecated": true, "replacedBy": "new"},
                "older": {"$type": "color", "$value": "#000", "$extensions": {"deprecated": true, "replacedBy": "{new}"}},
                "new": {"$type": "color", "$value": "#111"}
            }),
        )
        .unwrap();

        for name in ["old", "older"] {
            let token = tree.get(&TokenPath::from_dotted(name)).unwrap();
            assert!(token.is_deprecated());
            assert_eq!(token.deprecation.replaced_by, Some(TokenPath::from_dotted("new")));
        }
    }

    #[test]
    fn test_unknown_type_becomes_other() {
        let tree = build(
            Tier::Primitive,
            json!({"gradient": {"$type": "linearGradient", "$value": "linear-gradient(#000, #fff)"}}),
        )
        .unwrap();
        let token = tree.get(&TokenPath::from_dotted("gradient")).unwrap();
        assert_eq!(token.token_type, Some(TokenType::Other));
    }

    #[test]
    fn test_untyped_token_stays_untyped() {
        let tree = build(
            Tier::Component,
            json!({"button": {"gap": {"$value": "{space.1}"}}}),
        )
        .unwrap();
        let token = tree.get(&TokenPath::from_dotted("button.gap")).unwrap();
        assert_eq!(token.token_type, None);
    }

    #[test]
    fn test_scalar_in_group_position_is_an_error() {
        let err = build(Tier::Primitive, json!({"grey": {"100": "#f0f0f0"}})).unwrap_err();
        match err {
            LoadError::InvalidToken { tier, token, .. } => {
                assert_eq!(tier, Tier::Primitive);
                assert_eq!(token, TokenPath::from_dotted("grey.100"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_null_value_is_an_error() {
        let err = build(Tier::Primitive, json!({"a": {"$value": null}})).unwrap_err();
        assert!(err.to_string().contains("must not be null"));
    }
}
