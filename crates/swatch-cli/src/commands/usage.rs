use crate::commands::load_resolved;
use crate::config::SwatchConfig;
use anyhow::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use swatch_export::{check_usage_files, stylesheet_files, VariableIndex};

pub fn run(config: &SwatchConfig, paths: Vec<PathBuf>, extensions: Vec<String>) -> Result<ExitCode> {
    let resolved = load_resolved(config)?;
    let index = VariableIndex::new(&resolved, &config.output.prefix)?;

    let roots = if paths.is_empty() {
        config.lint.components.clone()
    } else {
        paths
    };
    let extensions = if extensions.is_empty() {
        config.lint.extensions.clone()
    } else {
        extensions
    };

    let files = stylesheet_files(&roots, &extensions)?;
    let findings = check_usage_files(&files, &index)?;

    let mut errors = 0;
    for (file, finding) in &findings {
        let severity = if finding.is_error() {
            errors += 1;
            "error"
        } else {
            "warning"
        };
        eprintln!("{}: {}:{}", severity, file.display(), finding);
    }

    println!(
        "Checked {} file(s) against {} token variables",
        files.len(),
        index.len()
    );
    Ok(if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
