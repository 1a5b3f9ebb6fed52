//! Token reference resolution.
//!
//! Resolves `{token.path}` references to the literal value of their target,
//! following chains down to a primitive.

use std::collections::HashMap;
use swatch_core::{
    reference, ResolveError, ResolvedSet, ResolvedToken, Tier, Token, TokenPath, TokenSet,
    TokenType, TokenValue, UnresolvedReference,
};

/// Resolve every token of every tier.
///
/// A reference cycle aborts immediately. Missing targets are collected and
/// returned together once every token has been visited.
pub fn resolve(set: &TokenSet) -> Result<ResolvedSet, ResolveError> {
    let mut resolver = TokenResolver::new(set);
    let mut resolved = ResolvedSet::new();

    for (tier, token) in set.iter() {
        let (value, token_type) = resolver.resolve_token(tier, token)?;
        resolved.push(ResolvedToken {
            tier,
            path: token.path.clone(),
            token_type,
            value,
            description: token.description.clone(),
            deprecation: token.deprecation.clone(),
        });
    }

    if !resolver.unresolved.is_empty() {
        return Err(ResolveError::Unresolved(resolver.unresolved));
    }

    tracing::debug!(tokens = resolved.len(), "resolved token set");
    Ok(resolved)
}

type TokenKey = (Tier, TokenPath);

/// A resolved value with the type it is emitted as.
type Resolved = (TokenValue, TokenType);

struct TokenResolver<'a> {
    set: &'a TokenSet,
    /// Already-resolved values.
    cache: HashMap<TokenKey, Resolved>,
    /// Tokens currently being resolved, outermost first.
    resolution_stack: Vec<TokenKey>,
    unresolved: Vec<UnresolvedReference>,
}

impl<'a> TokenResolver<'a> {
    fn new(set: &'a TokenSet) -> Self {
        Self {
            set,
            cache: HashMap::new(),
            resolution_stack: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    fn lookup(&self, path: &TokenPath) -> Option<(Tier, &'a Token)> {
        let set = self.set;
        set.lookup_reference(path)
    }

    fn resolve_token(&mut self, tier: Tier, token: &Token) -> Result<Resolved, ResolveError> {
        let key = (tier, token.path.clone());

        if let Some(resolved) = self.cache.get(&key) {
            return Ok(resolved.clone());
        }

        // Re-entering a token on the stack closes a cycle.
        if let Some(start) = self.resolution_stack.iter().position(|k| k == &key) {
            let mut cycle: Vec<TokenPath> = self.resolution_stack[start..]
                .iter()
                .map(|(_, path)| path.clone())
                .collect();
            cycle.push(token.path.clone());
            return Err(ResolveError::Cycle { cycle });
        }

        self.resolution_stack.push(key.clone());
        let resolved = match token.token_type {
            Some(ty) => self
                .resolve_value(tier, token, &token.value)
                .map(|value| (value, ty)),
            None => self.resolve_untyped(tier, token),
        };
        self.resolution_stack.pop();

        let resolved = resolved?;
        self.cache.insert(key, resolved.clone());
        Ok(resolved)
    }

    /// A token without `$type` that aliases another token as a whole takes
    /// the target's type along with its value.
    fn resolve_untyped(&mut self, tier: Tier, token: &Token) -> Result<Resolved, ResolveError> {
        let whole = match &token.value {
            TokenValue::String(s) => reference::parse_whole(s).map(|path| (s, path)),
            _ => None,
        };

        match whole {
            Some((raw, path)) => match self.lookup(&path) {
                Some((target_tier, target)) => self.resolve_token(target_tier, target),
                None => {
                    self.record_unresolved(tier, token, &path);
                    Ok((TokenValue::String(raw.clone()), TokenType::Other))
                }
            },
            None => self
                .resolve_value(tier, token, &token.value)
                .map(|value| (value, TokenType::Other)),
        }
    }

    fn resolve_value(
        &mut self,
        tier: Tier,
        owner: &Token,
        value: &TokenValue,
    ) -> Result<TokenValue, ResolveError> {
        match value {
            TokenValue::String(s) => {
                if let Some(path) = reference::parse_whole(s) {
                    self.resolve_whole(tier, owner, s, &path)
                } else if reference::contains_reference(s) {
                    self.resolve_embedded(tier, owner, s).map(TokenValue::String)
                } else {
                    Ok(value.clone())
                }
            }
            TokenValue::List(items) => items
                .iter()
                .map(|item| self.resolve_value(tier, owner, item))
                .collect::<Result<Vec<_>, _>>()
                .map(TokenValue::List),
            TokenValue::Composite(fields) => fields
                .iter()
                .map(|(name, field)| -> Result<_, ResolveError> {
                    Ok((name.clone(), self.resolve_value(tier, owner, field)?))
                })
                .collect::<Result<_, _>>()
                .map(TokenValue::Composite),
            TokenValue::Number(_) | TokenValue::Bool(_) => Ok(value.clone()),
        }
    }

    /// `{a.b}` as the whole value: take the target's resolved value as-is.
    fn resolve_whole(
        &mut self,
        tier: Tier,
        owner: &Token,
        raw: &str,
        path: &TokenPath,
    ) -> Result<TokenValue, ResolveError> {
        match self.lookup(path) {
            Some((target_tier, target)) => self
                .resolve_token(target_tier, target)
                .map(|(value, _)| value),
            None => {
                self.record_unresolved(tier, owner, path);
                Ok(TokenValue::String(raw.to_string()))
            }
        }
    }

    /// References inside a larger string: substitute each target's CSS text.
    fn resolve_embedded(
        &mut self,
        tier: Tier,
        owner: &Token,
        raw: &str,
    ) -> Result<String, ResolveError> {
        let mut out = String::with_capacity(raw.len());
        let mut last = 0;

        for caps in reference::placeholder_regex().captures_iter(raw) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&raw[last..whole.start()]);
            last = whole.end();

            let path = TokenPath::from_dotted(&caps[1]);
            match self.lookup(&path) {
                Some((target_tier, target)) => {
                    let (value, ty) = self.resolve_token(target_tier, target)?;
                    out.push_str(&value.css_text(ty));
                }
                None => {
                    self.record_unresolved(tier, owner, &path);
                    out.push_str(whole.as_str());
                }
            }
        }

        out.push_str(&raw[last..]);
        Ok(out)
    }

    fn record_unresolved(&mut self, tier: Tier, owner: &Token, path: &TokenPath) {
        let entry = UnresolvedReference {
            tier,
            token: owner.path.clone(),
            reference: path.clone(),
        };
        if !self.unresolved.contains(&entry) {
            tracing::debug!(tier = %tier, token = %owner.path, reference = %path, "unresolved reference");
            self.unresolved.push(entry);
        }
    }
}
