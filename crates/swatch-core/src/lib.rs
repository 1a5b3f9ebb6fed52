//! Core types and utilities for the swatch design-token pipeline.
//!
//! This crate provides the foundational types used across all other swatch crates:
//! - Token paths and `{a.b.c}` reference syntax
//! - Tiers and token types
//! - Token trees (loaded) and resolved token sets
//! - Error types

pub mod errors;
pub mod path;
pub mod reference;
pub mod tokens;
pub mod types;
pub mod value;

pub use errors::*;
pub use path::*;
pub use tokens::*;
pub use types::*;
pub use value::*;
