//! Subcommand implementations.

pub mod build;
pub mod lint;
pub mod migrate;
pub mod usage;
pub mod validate;

use crate::config::SwatchConfig;
use anyhow::{Context, Result};
use swatch_core::{ResolvedSet, TokenSet};

/// Load the configured token tree.
pub fn load(config: &SwatchConfig) -> Result<TokenSet> {
    let root = &config.tokens.root;
    let set = swatch_loader::load_token_set(root)
        .with_context(|| format!("Failed to load tokens from {}", root.display()))?;
    tracing::debug!(tokens = set.token_count(), "loaded token set");
    Ok(set)
}

/// Load and resolve the configured token tree.
pub fn load_resolved(config: &SwatchConfig) -> Result<ResolvedSet> {
    let set = load(config)?;
    let resolved = swatch_resolver::resolve(&set)?;
    Ok(resolved)
}
