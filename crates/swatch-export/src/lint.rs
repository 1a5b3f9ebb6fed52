//! Placeholder lint for stylesheets.
//!
//! A `{a.b}` left in CSS means a reference survived resolution or was typed by
//! hand. Browsers silently drop such declarations, so they are reported here.

use crate::read_text;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use swatch_core::reference::placeholder_regex;
use swatch_core::ExportError;

/// A placeholder found in stylesheet text. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub line: usize,
    pub column: usize,
    /// The placeholder including braces, e.g. `{grey.100}`.
    pub text: String,
}

/// A placeholder found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintFinding {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub placeholder: String,
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: unresolved placeholder {}",
            self.file.display(),
            self.line,
            self.column,
            self.placeholder
        )
    }
}

/// Find every placeholder outside `/* ... */` comments.
pub fn scan_placeholders(text: &str) -> Vec<Placeholder> {
    let stripped = strip_comments(text);

    let mut found = Vec::new();
    for (idx, line) in stripped.lines().enumerate() {
        for m in placeholder_regex().find_iter(line) {
            found.push(Placeholder {
                line: idx + 1,
                column: line[..m.start()].chars().count() + 1,
                text: m.as_str().to_string(),
            });
        }
    }
    found
}

/// Blank out block comments, keeping line breaks so positions stay valid.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        let comment_len = rest[start + 2..]
            .find("*/")
            .map(|end| end + 4)
            .unwrap_or(rest.len() - start);
        out.extend(
            rest[start..start + comment_len]
                .chars()
                .map(|c| if c == '\n' { '\n' } else { ' ' }),
        );
        rest = &rest[start + comment_len..];
    }
    out.push_str(rest);
    out
}

/// Scan files for placeholders.
pub fn lint_files(paths: &[PathBuf]) -> Result<Vec<LintFinding>, ExportError> {
    let mut findings = Vec::new();
    for path in paths {
        let text = read_text(path)?;
        let found = scan_placeholders(&text);
        tracing::debug!(path = %path.display(), findings = found.len(), "linted file");
        findings.extend(found.into_iter().map(|p| LintFinding {
            file: path.clone(),
            line: p.line,
            column: p.column,
            placeholder: p.text,
        }));
    }
    Ok(findings)
}

/// Stylesheets under `roots` with one of `extensions`, sorted by path.
///
/// Roots may be files or directories; missing roots are skipped.
pub fn stylesheet_files(roots: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>, ExportError> {
    let matches = |path: &Path| {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e.trim_start_matches('.') == ext))
    };

    let mut files = Vec::new();
    let mut pending: Vec<PathBuf> = roots.to_vec();
    while let Some(path) = pending.pop() {
        if path.is_dir() {
            let entries = fs::read_dir(&path).map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| ExportError::Io {
                    path: path.clone(),
                    source,
                })?;
                pending.push(entry.path());
            }
        } else if path.is_file() {
            if matches(&path) {
                files.push(path);
            }
        } else {
            tracing::warn!(path = %path.display(), "stylesheet path not found, skipping");
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_reports_line_and_column() {
        let css = ":root {\n  --a: #fff;\n  --b: {grey.100};\n}\n";
        assert_eq!(
            scan_placeholders(css),
            vec![Placeholder {
                line: 3,
                column: 8,
                text: "{grey.100}".to_string(),
            }]
        );
    }

    #[test]
    fn test_scan_finds_embedded_placeholders() {
        let found = scan_placeholders(".x { padding: {space.1} {space.2}; }");
        let texts: Vec<&str> = found.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["{space.1}", "{space.2}"]);
    }

    #[test]
    fn test_scan_ignores_comments_and_rule_blocks() {
        let css = "/* uses {grey.100}\n   and {grey.200} */\n.a { color: red; }\n.b { --c: {blue.500}; }\n";
        let found = scan_placeholders(css);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 4);
        assert_eq!(found[0].text, "{blue.500}");
    }

    #[test]
    fn test_scan_finds_keys_with_spaces() {
        let found = scan_placeholders(":root {\n  --a: {colors.brand blue};\n}\n");
        assert_eq!(
            found,
            vec![Placeholder {
                line: 2,
                column: 8,
                text: "{colors.brand blue}".to_string(),
            }]
        );
    }

    #[test]
    fn test_unterminated_comment_hides_rest() {
        assert!(scan_placeholders("/* {a.b}\n{c.d}").is_empty());
    }

    #[test]
    fn test_lint_files_and_display() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.css");
        fs::write(&path, ":root {\n  --a: {grey.100};\n}\n").unwrap();

        let findings = lint_files(&[path.clone()]).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].to_string(),
            format!("{}:2:8: unresolved placeholder {{grey.100}}", path.display())
        );
    }

    #[test]
    fn test_lint_missing_file_is_io_error() {
        let err = lint_files(&[PathBuf::from("/nonexistent/tokens.css")]).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[test]
    fn test_stylesheet_files_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("button")).unwrap();
        fs::write(root.join("button/button.scss"), "").unwrap();
        fs::write(root.join("button/button.tsx"), "").unwrap();
        fs::write(root.join("alert.css"), "").unwrap();

        let files = stylesheet_files(
            &[root.to_path_buf(), root.join("missing")],
            &["css".to_string(), ".scss".to_string()],
        )
        .unwrap();
        assert_eq!(files, vec![root.join("alert.css"), root.join("button/button.scss")]);
    }
}
