//! Error types for the swatch pipeline.

use crate::path::TokenPath;
use crate::types::Tier;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading and merging token source files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Tokens directory not found: {}", .path.display())]
    MissingRoot { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON object at the root of {}", .path.display())]
    NotAnObject { path: PathBuf },

    #[error("Invalid {tier} token '{token}': {reason}")]
    InvalidToken {
        tier: Tier,
        token: TokenPath,
        reason: String,
    },
}

/// A reference whose target does not exist in primitives or semantic tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub tier: Tier,
    /// The token holding the reference.
    pub token: TokenPath,
    /// The missing target.
    pub reference: TokenPath,
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} token '{}' references unknown token {{{}}}",
            self.tier, self.token, self.reference
        )
    }
}

/// Errors during reference resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Circular token reference: {}", .cycle.iter().map(|p| p.dotted()).collect::<Vec<_>>().join(" -> "))]
    Cycle { cycle: Vec<TokenPath> },

    #[error("{} unresolved reference(s):\n{}", .0.len(), format_unresolved(.0))]
    Unresolved(Vec<UnresolvedReference>),
}

fn format_unresolved(refs: &[UnresolvedReference]) -> String {
    refs.iter()
        .map(|r| format!("  {}", r))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ResolveError {
    /// Unresolved references carried by this error, if any.
    pub fn unresolved(&self) -> &[UnresolvedReference] {
        match self {
            ResolveError::Unresolved(refs) => refs,
            ResolveError::Cycle { .. } => &[],
        }
    }
}

/// Errors while emitting or scanning artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Token '{token}' still contains a placeholder after resolution")]
    LeakedPlaceholder { token: TokenPath },

    #[error("CSS variable {name} is emitted by both '{first}' and '{second}'")]
    DuplicateVariable {
        name: String,
        first: TokenPath,
        second: TokenPath,
    },
}

/// Errors while rewriting token source files.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Token '{0}' is not defined in any source file")]
    NotFound(TokenPath),

    #[error("Cannot rename onto '{0}': a token or group already exists there")]
    TargetExists(TokenPath),

    #[error("Groups '{first}' and '{second}' would both be written to {}", .path.display())]
    SplitCollision {
        path: PathBuf,
        first: String,
        second: String,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
