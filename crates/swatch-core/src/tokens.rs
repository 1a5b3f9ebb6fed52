//! Token trees and resolved token sets.

use crate::path::TokenPath;
use crate::types::{Tier, TokenType};
use crate::value::TokenValue;
use indexmap::IndexMap;

/// Deprecation metadata attached to a token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deprecation {
    pub deprecated: bool,
    pub replaced_by: Option<TokenPath>,
}

/// A named leaf in a token tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub path: TokenPath,
    /// `$type` of the token or the nearest group that declares one. `None`
    /// for untyped tokens, which take their type from a whole-value reference.
    pub token_type: Option<TokenType>,
    pub value: TokenValue,
    /// `$name`, when the source gives the token a display name.
    pub name: Option<String>,
    pub description: Option<String>,
    pub deprecation: Deprecation,
    /// `$extensions`, preserved verbatim.
    pub extensions: Option<serde_json::Value>,
}

impl Token {
    pub fn new(path: TokenPath, token_type: TokenType, value: TokenValue) -> Self {
        Self {
            path,
            token_type: Some(token_type),
            value,
            name: None,
            description: None,
            deprecation: Deprecation::default(),
            extensions: None,
        }
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation.deprecated
    }
}

/// A group of tokens. Its `$type` is inherited by descendants that omit one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenGroup {
    pub token_type: Option<TokenType>,
    pub description: Option<String>,
    pub children: TokenTree,
}

/// A node in a token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Group(TokenGroup),
    Token(Token),
}

/// An ordered mapping from path segment to group or token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenTree {
    nodes: IndexMap<String, TokenNode>,
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, segment: impl Into<String>, node: TokenNode) {
        self.nodes.insert(segment.into(), node);
    }

    /// Get the node at `path`.
    pub fn node(&self, path: &TokenPath) -> Option<&TokenNode> {
        let (first, rest) = path.segments().split_first()?;
        let mut node = self.nodes.get(first)?;
        for segment in rest {
            match node {
                TokenNode::Group(group) => node = group.children.nodes.get(segment)?,
                TokenNode::Token(_) => return None,
            }
        }
        Some(node)
    }

    /// Get the token at `path`.
    pub fn get(&self, path: &TokenPath) -> Option<&Token> {
        match self.node(path)? {
            TokenNode::Token(token) => Some(token),
            TokenNode::Group(_) => None,
        }
    }

    pub fn contains(&self, path: &TokenPath) -> bool {
        self.get(path).is_some()
    }

    /// Top-level nodes, in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TokenNode)> {
        self.nodes.iter()
    }

    /// All tokens, depth-first in source order.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens {
            stack: vec![self.nodes.values()],
        }
    }

    /// Number of tokens (not groups) in the tree.
    pub fn token_count(&self) -> usize {
        self.tokens().count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Depth-first iterator over the tokens of a tree.
pub struct Tokens<'a> {
    stack: Vec<indexmap::map::Values<'a, String, TokenNode>>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<&'a Token> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(TokenNode::Token(token)) => return Some(token),
                Some(TokenNode::Group(group)) => self.stack.push(group.children.nodes.values()),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

/// The three loaded tier trees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSet {
    pub primitives: TokenTree,
    pub semantic: TokenTree,
    pub components: TokenTree,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self, tier: Tier) -> &TokenTree {
        match tier {
            Tier::Primitive => &self.primitives,
            Tier::Semantic => &self.semantic,
            Tier::Component => &self.components,
        }
    }

    pub fn tree_mut(&mut self, tier: Tier) -> &mut TokenTree {
        match tier {
            Tier::Primitive => &mut self.primitives,
            Tier::Semantic => &mut self.semantic,
            Tier::Component => &mut self.components,
        }
    }

    /// Tiers a reference may point into, in lookup order.
    pub const REFERENCE_TIERS: [Tier; 2] = [Tier::Primitive, Tier::Semantic];

    /// Find the target of a `{path}` reference: primitives first, then semantic tokens.
    pub fn lookup_reference(&self, path: &TokenPath) -> Option<(Tier, &Token)> {
        Self::REFERENCE_TIERS
            .iter()
            .find_map(|tier| self.tree(*tier).get(path).map(|token| (*tier, token)))
    }

    /// All tokens of all tiers, tagged with their tier.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &Token)> {
        Tier::ALL
            .into_iter()
            .flat_map(move |tier| self.tree(tier).tokens().map(move |t| (tier, t)))
    }

    pub fn token_count(&self) -> usize {
        Tier::ALL.iter().map(|t| self.tree(*t).token_count()).sum()
    }
}

/// A token whose value no longer contains any `{...}` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedToken {
    pub tier: Tier,
    pub path: TokenPath,
    pub token_type: TokenType,
    pub value: TokenValue,
    pub description: Option<String>,
    pub deprecation: Deprecation,
}

impl ResolvedToken {
    /// CSS text of the resolved value.
    pub fn css_value(&self) -> String {
        self.value.css_text(self.token_type)
    }
}

/// Resolved tokens in emission order: tier order, then tree order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSet {
    tokens: Vec<ResolvedToken>,
}

impl ResolvedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: ResolvedToken) {
        self.tokens.push(token);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedToken> {
        self.tokens.iter()
    }

    pub fn tier(&self, tier: Tier) -> impl Iterator<Item = &ResolvedToken> {
        self.tokens.iter().filter(move |t| t.tier == tier)
    }

    pub fn get(&self, tier: Tier, path: &TokenPath) -> Option<&ResolvedToken> {
        self.tokens.iter().find(|t| t.tier == tier && &t.path == path)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(path: &str, value: &str) -> Token {
        Token::new(
            TokenPath::from_dotted(path),
            TokenType::Color,
            TokenValue::String(value.to_string()),
        )
    }

    fn tree_with(tokens: &[(&str, &str, &str)]) -> TokenTree {
        // (group, leaf, value)
        let mut tree = TokenTree::new();
        let mut groups: IndexMap<String, TokenGroup> = IndexMap::new();
        for (group, leaf, value) in tokens {
            groups
                .entry(group.to_string())
                .or_default()
                .children
                .insert(*leaf, TokenNode::Token(token(&format!("{}.{}", group, leaf), value)));
        }
        for (name, group) in groups {
            tree.insert(name, TokenNode::Group(group));
        }
        tree
    }

    #[test]
    fn test_tree_lookup() {
        let tree = tree_with(&[("grey", "100", "#f0f0f0"), ("grey", "900", "#111")]);

        let found = tree.get(&TokenPath::from_dotted("grey.100")).unwrap();
        assert_eq!(found.value, TokenValue::String("#f0f0f0".to_string()));
        assert!(tree.get(&TokenPath::from_dotted("grey")).is_none());
        assert!(tree.get(&TokenPath::from_dotted("grey.100.x")).is_none());
        assert!(tree.get(&TokenPath::from_dotted("blue.100")).is_none());
    }

    #[test]
    fn test_tokens_iterate_in_source_order() {
        let tree = tree_with(&[("b", "2", "x"), ("a", "1", "y"), ("b", "1", "z")]);
        let paths: Vec<String> = tree.tokens().map(|t| t.path.dotted()).collect();
        assert_eq!(paths, vec!["b.2", "b.1", "a.1"]);
        assert_eq!(tree.token_count(), 3);
    }

    #[test]
    fn test_reference_lookup_prefers_primitives() {
        let mut set = TokenSet::new();
        set.primitives = tree_with(&[("grey", "100", "#primitive")]);
        set.semantic = tree_with(&[("grey", "100", "#semantic"), ("bg", "base", "#bg")]);

        let (tier, found) = set.lookup_reference(&TokenPath::from_dotted("grey.100")).unwrap();
        assert_eq!(tier, Tier::Primitive);
        assert_eq!(found.value.as_str(), Some("#primitive"));

        let (tier, _) = set.lookup_reference(&TokenPath::from_dotted("bg.base")).unwrap();
        assert_eq!(tier, Tier::Semantic);
    }

    #[test]
    fn test_reference_lookup_skips_components() {
        let mut set = TokenSet::new();
        set.components = tree_with(&[("button", "bg", "#000")]);
        assert!(set.lookup_reference(&TokenPath::from_dotted("button.bg")).is_none());
    }
}
