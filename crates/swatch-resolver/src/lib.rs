//! Reference resolution for swatch token sets.
//!
//! This crate resolves:
//! - Whole-value references (`{grey.100}` -> the target's value)
//! - Embedded references (`0 1px {blur.sm} {grey.900}` -> CSS text)
//! - References inside composite and list values, field by field
//!
//! It also audits deprecation metadata.

mod audit;
mod references;

pub use audit::{audit, AuditFinding};
pub use references::resolve;
