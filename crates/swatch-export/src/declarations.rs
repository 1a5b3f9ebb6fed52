//! CSS variable naming and the flat list of declarations shared by all emitters.

use indexmap::IndexMap;
use std::collections::HashMap;
use swatch_core::{ExportError, ResolvedSet, ResolvedToken, Tier, TokenPath, TokenType, TokenValue};

/// `--<prefix>-<tier>-<kebab-path>`.
pub fn css_variable(prefix: &str, tier: Tier, path: &TokenPath) -> String {
    format!("--{}-{}-{}", prefix, tier.css_name(), path.kebab())
}

/// One emitted custom property.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration<'a> {
    pub name: String,
    pub value: String,
    pub token: &'a ResolvedToken,
    /// Variable name of the replacement, for deprecated tokens.
    pub replacement: Option<String>,
}

/// Flatten a resolved set into declarations, in emission order.
///
/// Box shadows and typography render as one CSS value. Any other object value
/// is split into one declaration per field (`--token-...-<field>`). Two tokens
/// (or fields) that map to the same variable name are an error.
pub fn declarations<'a>(set: &'a ResolvedSet, prefix: &str) -> Result<Vec<Declaration<'a>>, ExportError> {
    let mut out = Vec::with_capacity(set.len());

    for token in set.iter() {
        if token.value.has_references() {
            return Err(ExportError::LeakedPlaceholder {
                token: token.path.clone(),
            });
        }

        let name = css_variable(prefix, token.tier, &token.path);
        let replacement = replacement_variable(set, token, prefix);

        match &token.value {
            TokenValue::Composite(fields) if !token.token_type.is_composite() => {
                for (field, value) in fields {
                    let field_name = TokenPath::from_segments([field.as_str()]).kebab();
                    out.push(Declaration {
                        name: format!("{}-{}", name, field_name),
                        value: value.css_text(field_type(token.token_type, field)),
                        token,
                        replacement: replacement.clone(),
                    });
                }
            }
            _ => out.push(Declaration {
                name,
                value: token.css_value(),
                token,
                replacement,
            }),
        }
    }

    let mut seen: HashMap<&str, &TokenPath> = HashMap::with_capacity(out.len());
    for decl in &out {
        if let Some(first) = seen.insert(decl.name.as_str(), &decl.token.path) {
            return Err(ExportError::DuplicateVariable {
                name: decl.name.clone(),
                first: first.clone(),
                second: decl.token.path.clone(),
            });
        }
    }

    Ok(out)
}

/// Fields of generic composites are typed by name where the name is a token type.
fn field_type(parent: TokenType, field: &str) -> TokenType {
    TokenType::parse(field).unwrap_or(parent)
}

fn replacement_variable(set: &ResolvedSet, token: &ResolvedToken, prefix: &str) -> Option<String> {
    if !token.deprecation.deprecated {
        return None;
    }
    let path = token.deprecation.replaced_by.as_ref()?;
    [token.tier, Tier::Primitive, Tier::Semantic]
        .into_iter()
        .find_map(|tier| set.get(tier, path))
        .map(|target| css_variable(prefix, target.tier, &target.path))
}

/// What is known about one emitted variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableInfo {
    pub tier: Tier,
    pub deprecated: bool,
    pub replacement: Option<String>,
}

/// Every emitted variable name, for usage checks.
#[derive(Debug, Clone, Default)]
pub struct VariableIndex {
    prefix: String,
    variables: IndexMap<String, VariableInfo>,
}

impl VariableIndex {
    pub fn new(set: &ResolvedSet, prefix: &str) -> Result<Self, ExportError> {
        let variables = declarations(set, prefix)?
            .into_iter()
            .map(|decl| {
                let info = VariableInfo {
                    tier: decl.token.tier,
                    deprecated: decl.token.deprecation.deprecated,
                    replacement: decl.replacement,
                };
                (decl.name, info)
            })
            .collect();

        Ok(Self {
            prefix: prefix.to_string(),
            variables,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn get(&self, name: &str) -> Option<&VariableInfo> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{resolved, set};
    use serde_json::json;
    use swatch_core::Deprecation;

    #[test]
    fn test_css_variable_name() {
        assert_eq!(
            css_variable("token", Tier::Primitive, &TokenPath::from_dotted("fontSize.lg")),
            "--token-primitive-font-size-lg"
        );
    }

    #[test]
    fn test_generic_composite_splits_into_fields() {
        let set = set(vec![resolved(
            Tier::Component,
            "input.border",
            TokenType::Other,
            json!({"borderWidth": 1, "style": "solid", "color": "#ccc"}),
        )]);

        let decls = declarations(&set, "token").unwrap();
        let pairs: Vec<(&str, &str)> = decls.iter().map(|d| (d.name.as_str(), d.value.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("--token-component-input-border-border-width", "1px"),
                ("--token-component-input-border-style", "solid"),
                ("--token-component-input-border-color", "#ccc"),
            ]
        );
    }

    #[test]
    fn test_leaked_placeholder_is_rejected() {
        let set = set(vec![resolved(Tier::Semantic, "bg", TokenType::Color, json!("{grey.100}"))]);
        assert!(matches!(
            declarations(&set, "token"),
            Err(ExportError::LeakedPlaceholder { .. })
        ));
    }

    #[test]
    fn test_leaked_placeholder_with_spaces_is_rejected() {
        let set = set(vec![resolved(
            Tier::Component,
            "card.border",
            TokenType::Other,
            json!("1px solid {colors.brand blue}"),
        )]);
        match declarations(&set, "token") {
            Err(ExportError::LeakedPlaceholder { token }) => {
                assert_eq!(token, TokenPath::from_dotted("card.border"));
            }
            other => panic!("expected leaked placeholder, got {other:?}"),
        }
    }

    #[test]
    fn test_keys_with_same_kebab_name_collide() {
        let set = set(vec![
            resolved(Tier::Primitive, "fontSize.lg", TokenType::FontSize, json!(18)),
            resolved(Tier::Primitive, "font-size.lg", TokenType::FontSize, json!(20)),
        ]);
        match declarations(&set, "token") {
            Err(ExportError::DuplicateVariable { name, first, second }) => {
                assert_eq!(name, "--token-primitive-font-size-lg");
                assert_eq!(first, TokenPath::from_dotted("fontSize.lg"));
                assert_eq!(second, TokenPath::from_dotted("font-size.lg"));
            }
            other => panic!("expected duplicate variable, got {other:?}"),
        }
    }

    #[test]
    fn test_composite_field_colliding_with_sibling() {
        let set = set(vec![
            resolved(
                Tier::Component,
                "input.border",
                TokenType::Other,
                json!({"style": "solid", "color": "#ccc"}),
            ),
            resolved(Tier::Component, "input.border-color", TokenType::Color, json!("#000")),
        ]);
        let err = declarations(&set, "token").unwrap_err();
        assert_eq!(
            err.to_string(),
            "CSS variable --token-component-input-border-color is emitted by both 'input.border' and 'input.border-color'"
        );
    }

    #[test]
    fn test_same_path_in_different_tiers_is_allowed() {
        let set = set(vec![
            resolved(Tier::Primitive, "shared", TokenType::Color, json!("#111")),
            resolved(Tier::Semantic, "shared", TokenType::Color, json!("#222")),
        ]);
        assert_eq!(declarations(&set, "token").unwrap().len(), 2);
    }

    #[test]
    fn test_replacement_variable_for_deprecated() {
        let mut old = resolved(Tier::Semantic, "text-old", TokenType::Color, json!("#000"));
        old.deprecation = Deprecation {
            deprecated: true,
            replaced_by: Some(TokenPath::from_dotted("grey.900")),
        };
        let set = set(vec![
            resolved(Tier::Primitive, "grey.900", TokenType::Color, json!("#000")),
            old,
        ]);

        let index = VariableIndex::new(&set, "token").unwrap();
        let info = index.get("--token-semantic-text-old").unwrap();
        assert!(info.deprecated);
        assert_eq!(info.replacement.as_deref(), Some("--token-primitive-grey-900"));
        assert_eq!(index.len(), 2);
    }
}
