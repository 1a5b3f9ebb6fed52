//! CSS custom-property emitter.

use crate::declarations::declarations;
use crate::{DEFAULT_PREFIX, GENERATED_HEADER};
use std::fmt::Write;
use swatch_core::{ExportError, ResolvedSet, Tier};

/// Options for CSS output.
#[derive(Debug, Clone, PartialEq)]
pub struct CssOptions {
    /// Variable prefix, `token` gives `--token-...`.
    pub prefix: String,
    /// Selector wrapping the declarations.
    pub selector: String,
    /// Append `/* deprecated ... */` after deprecated declarations.
    pub deprecation_comments: bool,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            selector: ":root".to_string(),
            deprecation_comments: true,
        }
    }
}

impl CssOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn without_deprecation_comments(mut self) -> Self {
        self.deprecation_comments = false;
        self
    }
}

/// Emit one stylesheet holding every resolved token as a custom property.
pub fn emit_css(set: &ResolvedSet, options: &CssOptions) -> Result<String, ExportError> {
    let decls = declarations(set, &options.prefix)?;

    let mut out = String::new();
    let _ = writeln!(out, "/* {} */", GENERATED_HEADER);
    let _ = writeln!(out, "{} {{", options.selector);

    let mut current_tier: Option<Tier> = None;
    for decl in &decls {
        if current_tier != Some(decl.token.tier) {
            if current_tier.is_some() {
                out.push('\n');
            }
            let _ = writeln!(out, "  /* {} */", decl.token.tier);
            current_tier = Some(decl.token.tier);
        }

        let _ = write!(out, "  {}: {};", decl.name, decl.value);
        if options.deprecation_comments && decl.token.deprecation.deprecated {
            match &decl.replacement {
                Some(replacement) => {
                    let _ = write!(out, " /* deprecated: use {} */", replacement);
                }
                None => out.push_str(" /* deprecated */"),
            }
        }
        out.push('\n');
    }

    out.push_str("}\n");
    tracing::debug!(declarations = decls.len(), "emitted css");
    Ok(out)
}
