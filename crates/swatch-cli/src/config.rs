//! `swatch.toml` handling.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use swatch_export::CssOptions;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "swatch.toml";

/// Top-level configuration (swatch.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SwatchConfig {
    #[serde(default)]
    pub tokens: TokensConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub lint: LintConfig,
}

/// Token sources
#[derive(Debug, Deserialize, Serialize)]
pub struct TokensConfig {
    /// Directory holding `primitives/`, `semanticTokens/` and `componentTokens/`
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from("tokens/system")
}

impl Default for TokensConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

/// Generated artifacts
#[derive(Debug, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_css")]
    pub css: PathBuf,
    #[serde(default = "default_dts")]
    pub dts: PathBuf,
    /// Directory for the MDX pages written by `build --docs`
    #[serde(default = "default_docs")]
    pub docs: PathBuf,
    /// Variable prefix: `token` gives `--token-primitive-...`
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_selector")]
    pub selector: String,
    #[serde(default = "default_true")]
    pub deprecation_comments: bool,
}

fn default_css() -> PathBuf {
    PathBuf::from("dist/tokens.css")
}

fn default_dts() -> PathBuf {
    PathBuf::from("dist/tokens.d.ts")
}

fn default_docs() -> PathBuf {
    PathBuf::from("docs/tokens")
}

fn default_prefix() -> String {
    swatch_export::DEFAULT_PREFIX.to_string()
}

fn default_selector() -> String {
    ":root".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            css: default_css(),
            dts: default_dts(),
            docs: default_docs(),
            prefix: default_prefix(),
            selector: default_selector(),
            deprecation_comments: true,
        }
    }
}

/// Stylesheet scanning for `lint --components` and `check-usage`
#[derive(Debug, Deserialize, Serialize)]
pub struct LintConfig {
    #[serde(default = "default_components")]
    pub components: Vec<PathBuf>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_components() -> Vec<PathBuf> {
    vec![PathBuf::from("src/components")]
}

fn default_extensions() -> Vec<String> {
    vec!["css".to_string(), "scss".to_string()]
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            components: default_components(),
            extensions: default_extensions(),
        }
    }
}

impl SwatchConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `swatch.toml` in the working
    /// directory is used if present, otherwise defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load_file(default)
                } else {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: SwatchConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn css_options(&self) -> CssOptions {
        CssOptions {
            prefix: self.output.prefix.clone(),
            selector: self.output.selector.clone(),
            deprecation_comments: self.output.deprecation_comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config: SwatchConfig = toml::from_str("").unwrap();
        assert_eq!(config.tokens.root, PathBuf::from("tokens/system"));
        assert_eq!(config.output.css, PathBuf::from("dist/tokens.css"));
        assert_eq!(config.output.dts, PathBuf::from("dist/tokens.d.ts"));
        assert_eq!(config.output.prefix, "token");
        assert!(config.output.deprecation_comments);
        assert_eq!(config.lint.extensions, vec!["css", "scss"]);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: SwatchConfig = toml::from_str(
            r#"
            [output]
            prefix = "ds"

            [lint]
            components = ["app/ui"]
            "#,
        )
        .unwrap();
        assert_eq!(config.output.prefix, "ds");
        assert_eq!(config.output.selector, ":root");
        assert_eq!(config.lint.components, vec![PathBuf::from("app/ui")]);
        assert_eq!(config.lint.extensions, vec!["css", "scss"]);

        let options = config.css_options();
        assert_eq!(options.prefix, "ds");
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = SwatchConfig::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_invalid_toml_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("swatch.toml");
        fs::write(&path, "[output\nprefix = 1").unwrap();
        let err = SwatchConfig::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
