use crate::config::SwatchConfig;
use anyhow::{bail, Result};
use std::process::ExitCode;
use swatch_export::{lint_files, stylesheet_files};

pub fn run(config: &SwatchConfig, fix: bool, warn: bool, components: bool) -> Result<ExitCode> {
    if fix {
        super::build::run(config, false)?;
    }

    let css = &config.output.css;
    if !css.is_file() {
        bail!(
            "{} does not exist; run `swatch build` first or pass --fix",
            css.display()
        );
    }

    let mut files = vec![css.clone()];
    if components {
        files.extend(stylesheet_files(&config.lint.components, &config.lint.extensions)?);
    }

    let findings = lint_files(&files)?;
    for finding in &findings {
        eprintln!("{}: {}", if warn { "warning" } else { "error" }, finding);
    }

    if findings.is_empty() {
        println!("No placeholders in {} file(s)", files.len());
        return Ok(ExitCode::SUCCESS);
    }

    eprintln!("{} unresolved placeholder(s)", findings.len());
    if warn {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
