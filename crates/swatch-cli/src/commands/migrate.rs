use crate::config::SwatchConfig;
use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::process::ExitCode;
use swatch_core::{Tier, TokenPath};
use swatch_loader::{merge_tier, read_json_object, rename_token, split_tier, write_json};

pub fn rename(config: &SwatchConfig, from: &str, to: &str, dry_run: bool) -> Result<ExitCode> {
    let from = TokenPath::from_dotted(from);
    let to = TokenPath::from_dotted(to);

    let report = rename_token(&config.tokens.root, &from, &to, dry_run)
        .with_context(|| format!("Failed to rename {} to {}", from, to))?;

    let verb = if dry_run { "Would update" } else { "Updated" };
    for file in &report.files_changed {
        println!("{} {}", verb, file.display());
    }
    println!(
        "{} -> {}: {} reference(s) in {} file(s)",
        from,
        to,
        report.references_rewritten,
        report.files_changed.len()
    );
    Ok(ExitCode::SUCCESS)
}

fn parse_tier(name: &str) -> Result<Tier> {
    Tier::parse(name)
        .ok_or_else(|| anyhow!("Unknown tier '{}' (expected primitives, semantic or components)", name))
}

pub fn merge(config: &SwatchConfig, tier: &str, output: Option<&Path>) -> Result<ExitCode> {
    let tier = parse_tier(tier)?;

    let merged = merge_tier(&config.tokens.root, tier)?;
    match output {
        Some(path) => {
            write_json(path, merged)?;
            println!("Wrote merged {} tokens to {}", tier, path.display());
        }
        None => {
            let text = serde_json::to_string_pretty(&serde_json::Value::Object(merged))?;
            println!("{}", text);
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub fn split(config: &SwatchConfig, tier: &str, input: &Path, dry_run: bool) -> Result<ExitCode> {
    let tier = parse_tier(tier)?;
    let document = read_json_object(input)?;

    let files = split_tier(&config.tokens.root, tier, document, dry_run)
        .with_context(|| format!("Failed to split {}", input.display()))?;

    let verb = if dry_run { "Would write" } else { "Wrote" };
    for file in &files {
        println!("{} {}", verb, file.display());
    }
    Ok(ExitCode::SUCCESS)
}
