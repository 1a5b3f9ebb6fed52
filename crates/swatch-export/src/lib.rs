//! Emitters for resolved swatch tokens.
//!
//! Supported artifacts:
//! - CSS custom properties (`--token-<tier>-<path>`)
//! - TypeScript declarations (string-literal unions of variable names)
//! - Storybook MDX documentation pages
//!
//! Plus two scanners over emitted or hand-written stylesheets:
//! - [`lint`] finds `{a.b}` placeholders that leaked into CSS
//! - [`usage`] finds `var(--token-...)` uses of unknown or deprecated variables

pub mod css;
pub mod declarations;
pub mod docs;
pub mod dts;
pub mod lint;
pub mod usage;

use std::fs;
use std::path::{Path, PathBuf};
use swatch_core::{ExportError, ResolvedSet};

pub use css::{emit_css, CssOptions};
pub use declarations::{css_variable, declarations, Declaration, VariableIndex, VariableInfo};
pub use docs::{emit_docs, DocPage};
pub use dts::emit_dts;
pub use lint::{lint_files, scan_placeholders, stylesheet_files, LintFinding, Placeholder};
pub use usage::{check_usage_files, check_usages, UsageFinding, UsageKind};

/// Default variable prefix (`--token-...`).
pub const DEFAULT_PREFIX: &str = "token";

/// Header line written at the top of every generated file.
pub const GENERATED_HEADER: &str = "Generated by swatch. Do not edit.";

/// The generated text artifacts of one build.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub css: String,
    pub dts: String,
}

/// Emit the CSS and type declarations for a resolved set.
pub fn emit_artifacts(set: &ResolvedSet, options: &CssOptions) -> Result<Artifacts, ExportError> {
    Ok(Artifacts {
        css: emit_css(set, options)?,
        dts: emit_dts(set, &options.prefix)?,
    })
}

/// Write a generated file, creating parent directories as needed.
pub fn write_artifact(path: &Path, contents: &str) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}

/// Read a text file, mapping failures to [`ExportError::Io`].
pub(crate) fn read_text(path: &Path) -> Result<String, ExportError> {
    fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: PathBuf::from(path),
        source,
    })
}
