//! Source migrations that rewrite token JSON files in place.
//!
//! Unlike the rest of the pipeline these operate on the raw files, keeping
//! key order and any keys the loader would drop.

use crate::{load_tier_json, read_json_object, tier_dirs, tier_files};
use regex::Captures;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use swatch_core::{reference, LoadError, MigrateError, Tier, TokenPath};

/// Outcome of a migration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationReport {
    /// Files that defined the renamed token or group.
    pub defined_in: Vec<PathBuf>,
    /// Every file whose contents changed.
    pub files_changed: Vec<PathBuf>,
    /// Number of `{...}` references and `replacedBy` values rewritten.
    pub references_rewritten: usize,
    pub dry_run: bool,
}

struct SourceFile {
    path: PathBuf,
    root: Map<String, Value>,
    changed: bool,
}

/// Rename the token or group at `from` to `to` across all token sources.
///
/// The node is moved inside every file that defines it, and every reference to
/// `from` (or to a token below it) is rewritten in every file. With `dry_run`
/// nothing is written.
pub fn rename_token(
    root: &Path,
    from: &TokenPath,
    to: &TokenPath,
    dry_run: bool,
) -> Result<MigrationReport, MigrateError> {
    if from.is_empty() {
        return Err(MigrateError::NotFound(from.clone()));
    }
    if to.is_empty() || to.starts_with(from) {
        return Err(MigrateError::TargetExists(to.clone()));
    }

    let mut files = Vec::new();
    for tier in Tier::ALL {
        for path in tier_files(root, tier)? {
            let object = read_json_object(&path)?;
            files.push(SourceFile {
                path,
                root: object,
                changed: false,
            });
        }
    }

    if files.iter().any(|f| is_blocked(&f.root, to.segments())) {
        return Err(MigrateError::TargetExists(to.clone()));
    }

    let mut report = MigrationReport {
        dry_run,
        ..Default::default()
    };

    for file in &mut files {
        if let Some(node) = take_node(&mut file.root, from.segments()) {
            insert_node(&mut file.root, to.segments(), node);
            file.changed = true;
            report.defined_in.push(file.path.clone());
        }
    }
    if report.defined_in.is_empty() {
        return Err(MigrateError::NotFound(from.clone()));
    }

    for file in &mut files {
        let rewritten = file
            .root
            .iter_mut()
            .map(|(key, value)| rewrite_value(key, value, from, to))
            .sum::<usize>();
        if rewritten > 0 {
            file.changed = true;
            report.references_rewritten += rewritten;
        }
    }

    for file in files.into_iter().filter(|f| f.changed) {
        if !dry_run {
            write_json(&file.path, file.root)?;
        }
        report.files_changed.push(file.path);
    }

    tracing::info!(
        from = %from,
        to = %to,
        files = report.files_changed.len(),
        references = report.references_rewritten,
        dry_run,
        "renamed token"
    );
    Ok(report)
}

/// Merge every source file of `tier` into a single document.
///
/// Same merge the loader performs, but the raw JSON is returned so it can be
/// written back out as one file.
pub fn merge_tier(root: &Path, tier: Tier) -> Result<Map<String, Value>, MigrateError> {
    if !root.is_dir() {
        return Err(LoadError::MissingRoot {
            path: root.to_path_buf(),
        }
        .into());
    }
    let merged = load_tier_json(root, tier)?;
    tracing::info!(tier = %tier, keys = merged.len(), "merged tier");
    Ok(merged)
}

/// Split a merged tier document into one source file per top-level group.
///
/// Each group `key` is written to `<tier dir>/<key>.json` (component groups go
/// to `componentTokens/components/`). Top-level `$` keys are not written.
/// Returns the files written, or that would be written with `dry_run`.
pub fn split_tier(
    root: &Path,
    tier: Tier,
    document: Map<String, Value>,
    dry_run: bool,
) -> Result<Vec<PathBuf>, MigrateError> {
    let dir = tier_dirs(root, tier)
        .pop()
        .unwrap_or_else(|| root.join(tier.dir_name()));

    // Plan every file before writing any, so a collision leaves the tree untouched.
    let mut planned: Vec<(PathBuf, String, Value)> = Vec::new();
    let mut stems: HashMap<String, String> = HashMap::new();
    for (key, value) in document {
        if key.starts_with('$') {
            continue;
        }
        let stem = file_stem(&key);
        let path = dir.join(format!("{}.json", stem));
        // Compared case-insensitively: `Text` and `text` share a file on some filesystems.
        if let Some(first) = stems.insert(stem.to_lowercase(), key.clone()) {
            return Err(MigrateError::SplitCollision {
                path,
                first,
                second: key,
            });
        }
        planned.push((path, key, value));
    }

    let mut written = Vec::with_capacity(planned.len());
    for (path, key, value) in planned {
        if !dry_run {
            std::fs::create_dir_all(&dir).map_err(|source| MigrateError::Write {
                path: dir.clone(),
                source,
            })?;
            let mut single = Map::new();
            single.insert(key, value);
            write_json(&path, single)?;
        }
        written.push(path);
    }

    tracing::info!(tier = %tier, files = written.len(), dry_run, "split tier");
    Ok(written)
}

/// A file name for a group key: path separators and other odd characters become `-`.
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '-' })
        .collect()
}

/// Write a JSON document pretty-printed with a trailing newline.
pub fn write_json(path: &Path, root: Map<String, Value>) -> Result<(), MigrateError> {
    let mut text =
        serde_json::to_string_pretty(&Value::Object(root)).map_err(|source| MigrateError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
    text.push('\n');
    std::fs::write(path, text).map_err(|source| MigrateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Whether a node exists at `segments`, or something on the way is a token or scalar.
fn is_blocked(map: &Map<String, Value>, segments: &[String]) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return false;
    };
    match map.get(first) {
        None => false,
        Some(_) if rest.is_empty() => true,
        Some(Value::Object(child)) if !child.contains_key("$value") => is_blocked(child, rest),
        Some(_) => true,
    }
}

/// Remove and return the node at `segments`, pruning groups left empty.
fn take_node(map: &mut Map<String, Value>, segments: &[String]) -> Option<Value> {
    let (first, rest) = segments.split_first()?;
    if rest.is_empty() {
        return map.shift_remove(first);
    }

    let child = map.get_mut(first)?.as_object_mut()?;
    let taken = take_node(child, rest)?;
    if child.is_empty() {
        map.shift_remove(first);
    }
    Some(taken)
}

fn insert_node(map: &mut Map<String, Value>, segments: &[String], node: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        map.insert(first.clone(), node);
        return;
    }

    let child = map
        .entry(first.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(child) = child {
        insert_node(child, rest, node);
    }
}

/// Rewrite references below `value`. `key` is the key `value` is stored under.
fn rewrite_value(key: &str, value: &mut Value, from: &TokenPath, to: &TokenPath) -> usize {
    match value {
        Value::String(s) if key == "replacedBy" => {
            let bare = s.trim_matches(|c| c == '{' || c == '}');
            match TokenPath::from_dotted(bare).rebase(from, to) {
                Some(new) if !s.starts_with('{') => {
                    *s = new.dotted();
                    1
                }
                Some(new) => {
                    *s = reference::format(&new);
                    1
                }
                None => 0,
            }
        }
        Value::String(s) => rewrite_string(s, from, to),
        Value::Array(items) => items
            .iter_mut()
            .map(|item| rewrite_value("", item, from, to))
            .sum(),
        Value::Object(map) => map
            .iter_mut()
            .map(|(k, v)| rewrite_value(k, v, from, to))
            .sum(),
        Value::Null | Value::Bool(_) | Value::Number(_) => 0,
    }
}

fn rewrite_string(s: &mut String, from: &TokenPath, to: &TokenPath) -> usize {
    let mut count = 0;
    let replaced = reference::placeholder_regex().replace_all(s, |caps: &Captures| {
        match TokenPath::from_dotted(&caps[1]).rebase(from, to) {
            Some(new) => {
                count += 1;
                reference::format(&new)
            }
            None => caps[0].to_string(),
        }
    });
    let replaced = replaced.into_owned();
    if count > 0 {
        *s = replaced;
    }
    count
}
