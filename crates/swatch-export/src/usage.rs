//! `var(--token-...)` usage check for component sources.

use crate::declarations::VariableIndex;
use crate::read_text;
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use swatch_core::ExportError;

/// Why a variable use was reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageKind {
    /// No token emits this variable.
    Unknown,
    /// The variable exists but its token is deprecated.
    Deprecated { replacement: Option<String> },
}

/// One reported `var(...)` use. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageFinding {
    pub line: usize,
    pub column: usize,
    pub name: String,
    pub kind: UsageKind,
}

impl UsageFinding {
    pub fn is_error(&self) -> bool {
        self.kind == UsageKind::Unknown
    }
}

impl fmt::Display for UsageFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            UsageKind::Unknown => write!(
                f,
                "{}:{}: unknown token variable {}",
                self.line, self.column, self.name
            ),
            UsageKind::Deprecated { replacement: Some(r) } => write!(
                f,
                "{}:{}: deprecated token variable {} (use {})",
                self.line, self.column, self.name, r
            ),
            UsageKind::Deprecated { replacement: None } => {
                write!(f, "{}:{}: deprecated token variable {}", self.line, self.column, self.name)
            }
        }
    }
}

fn usage_regex(prefix: &str) -> Result<Regex, ExportError> {
    let pattern = format!(r"var\(\s*(--{}-[A-Za-z0-9_-]+)", regex::escape(prefix));
    Regex::new(&pattern).map_err(|e| ExportError::Template(e.to_string()))
}

/// Report uses of unknown or deprecated token variables in `text`.
///
/// Only names carrying the index's prefix are checked; other custom
/// properties belong to the component itself.
pub fn check_usages(text: &str, index: &VariableIndex) -> Result<Vec<UsageFinding>, ExportError> {
    let re = usage_regex(index.prefix())?;
    Ok(scan(text, index, &re))
}

fn scan(text: &str, index: &VariableIndex, re: &Regex) -> Vec<UsageFinding> {
    let mut findings = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        for caps in re.captures_iter(line) {
            let Some(m) = caps.get(1) else { continue };
            let name = m.as_str();
            let kind = match index.get(name) {
                None => UsageKind::Unknown,
                Some(info) if info.deprecated => UsageKind::Deprecated {
                    replacement: info.replacement.clone(),
                },
                Some(_) => continue,
            };
            findings.push(UsageFinding {
                line: idx + 1,
                column: line[..m.start()].chars().count() + 1,
                name: name.to_string(),
                kind,
            });
        }
    }
    findings
}

/// Check every file, returning findings tagged with their file.
pub fn check_usage_files(
    paths: &[PathBuf],
    index: &VariableIndex,
) -> Result<Vec<(PathBuf, UsageFinding)>, ExportError> {
    let re = usage_regex(index.prefix())?;
    let mut findings = Vec::new();
    for path in paths {
        let text = read_text(path)?;
        let found = scan(&text, index, &re);
        tracing::debug!(path = %path.display(), findings = found.len(), "checked usages");
        findings.extend(found.into_iter().map(|f| (path.clone(), f)));
    }
    Ok(findings)
}
