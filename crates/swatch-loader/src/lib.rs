//! Token source loading for swatch.
//!
//! Walks the conventional token layout:
//!
//! ```text
//! <root>/primitives/**/*.json
//! <root>/semanticTokens/**/*.json
//! <root>/componentTokens/shared/**/*.json
//! <root>/componentTokens/components/**/*.json
//! ```
//!
//! Every file of a tier is merged into one JSON object (later files win on
//! conflicting leaves), then converted into a [`TokenTree`](swatch_core::TokenTree).
//! The [`migrate`] module rewrites the source files themselves.

mod build;
mod merge;
pub mod migrate;
mod walk;

pub use build::build_tree;
pub use merge::{merge_into, META_KEYS};
pub use migrate::{merge_tier, rename_token, split_tier, write_json, MigrationReport};
pub use walk::{json_files, tier_dirs, tier_files};

use serde_json::{Map, Value};
use std::path::Path;
use swatch_core::{LoadError, Tier, TokenSet};

/// Load all three tiers from a tokens root directory.
pub fn load_token_set(root: &Path) -> Result<TokenSet, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::MissingRoot {
            path: root.to_path_buf(),
        });
    }

    let mut set = TokenSet::new();
    for tier in Tier::ALL {
        let merged = load_tier_json(root, tier)?;
        *set.tree_mut(tier) = build_tree(tier, &merged)?;
        tracing::debug!(
            tier = %tier,
            tokens = set.tree(tier).token_count(),
            "loaded tier"
        );
    }
    Ok(set)
}

/// Read and merge every source file of one tier into a single JSON object.
pub fn load_tier_json(root: &Path, tier: Tier) -> Result<Map<String, Value>, LoadError> {
    let mut merged = Map::new();
    for file in tier_files(root, tier)? {
        let object = read_json_object(&file)?;
        merge_into(&mut merged, object);
    }
    Ok(merged)
}

/// Read one token file, requiring an object at its root.
pub fn read_json_object(path: &Path) -> Result<Map<String, Value>, LoadError> {
    tracing::debug!(path = %path.display(), "reading token file");

    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(LoadError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}
