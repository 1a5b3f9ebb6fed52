use crate::commands::load;
use crate::config::SwatchConfig;
use anyhow::Result;
use std::process::ExitCode;
use swatch_resolver::{audit, resolve};

pub fn run(config: &SwatchConfig) -> Result<ExitCode> {
    let set = load(config)?;
    let mut failed = false;

    match resolve(&set) {
        Ok(resolved) => println!("{} tokens resolved", resolved.len()),
        Err(err) => {
            eprintln!("error: {}", err);
            failed = true;
        }
    }

    for finding in audit(&set) {
        if finding.is_error() {
            eprintln!("error: {}", finding);
            failed = true;
        } else {
            eprintln!("warning: {}", finding);
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
