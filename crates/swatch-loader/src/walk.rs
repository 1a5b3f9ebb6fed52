//! Directory traversal.

use std::fs;
use std::path::{Path, PathBuf};
use swatch_core::{LoadError, Tier};

/// Sub-directories of `componentTokens/`, in load order.
const COMPONENT_SUBDIRS: [&str; 2] = ["shared", "components"];

/// Source directories of a tier, in load order.
pub fn tier_dirs(root: &Path, tier: Tier) -> Vec<PathBuf> {
    let base = root.join(tier.dir_name());
    match tier {
        Tier::Component => COMPONENT_SUBDIRS.iter().map(|sub| base.join(sub)).collect(),
        Tier::Primitive | Tier::Semantic => vec![base],
    }
}

/// All JSON files of a tier, in load order. Missing directories are skipped.
pub fn tier_files(root: &Path, tier: Tier) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();
    for dir in tier_dirs(root, tier) {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), tier = %tier, "token directory not found, skipping");
            continue;
        }
        files.extend(json_files(&dir)?);
    }
    Ok(files)
}

/// Recursively list `*.json` files under `dir`.
///
/// Entries of every directory are sorted by file name before descending, so the
/// order (and with it the merge tie-break) does not depend on the platform's
/// directory listing order.
pub fn json_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(io_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            files.extend(json_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    Ok(files)
}
