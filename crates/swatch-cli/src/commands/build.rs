use crate::commands::load_resolved;
use crate::config::SwatchConfig;
use anyhow::Result;
use std::process::ExitCode;
use swatch_export::{emit_artifacts, emit_docs, write_artifact};

pub fn run(config: &SwatchConfig, docs: bool) -> Result<ExitCode> {
    let resolved = load_resolved(config)?;
    let options = config.css_options();

    let artifacts = emit_artifacts(&resolved, &options)?;
    write_artifact(&config.output.css, &artifacts.css)?;
    write_artifact(&config.output.dts, &artifacts.dts)?;

    if docs {
        for page in emit_docs(&resolved, &options.prefix)? {
            write_artifact(&config.output.docs.join(&page.file_name), &page.content)?;
        }
    }

    println!(
        "Built {} tokens -> {}, {}",
        resolved.len(),
        config.output.css.display(),
        config.output.dts.display()
    );
    Ok(ExitCode::SUCCESS)
}
