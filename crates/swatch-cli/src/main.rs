//! swatch: design-token build pipeline.
//!
//! ```bash
//! swatch build --docs            # CSS, .d.ts and MDX pages
//! swatch lint --components       # leaked {a.b} placeholders
//! swatch validate                # references, cycles, deprecations
//! swatch check-usage src/        # unknown var(--token-*) names
//! swatch rename grey.100 neutral.50 --dry-run
//! swatch merge primitives -o primitives.json
//! swatch split primitives primitives.json
//! ```

mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::SwatchConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swatch")]
#[command(version)]
#[command(about = "Build, lint, and migrate design tokens")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: ./swatch.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Tokens root directory, overriding the config file
    #[arg(long, global = true)]
    tokens: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve tokens and write CSS variables and TypeScript declarations
    Build {
        /// Also write Storybook MDX pages
        #[arg(long)]
        docs: bool,
    },

    /// Find unresolved `{a.b}` placeholders in emitted CSS
    Lint {
        /// Rebuild before scanning
        #[arg(long)]
        fix: bool,

        /// Report findings but exit successfully
        #[arg(long)]
        warn: bool,

        /// Also scan component stylesheets
        #[arg(long)]
        components: bool,
    },

    /// Check references, cycles, and deprecation metadata without writing files
    Validate,

    /// Report `var(--token-*)` uses of unknown or deprecated variables
    CheckUsage {
        /// Files or directories to scan (default: configured component dirs)
        paths: Vec<PathBuf>,

        /// File extensions to scan, overriding the config file
        #[arg(long = "ext")]
        extensions: Vec<String>,
    },

    /// Rename a token or group and rewrite every reference to it
    Rename {
        /// Current dotted path, e.g. `grey.100`
        from: String,

        /// New dotted path
        to: String,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Merge all source files of one tier into a single JSON document
    Merge {
        /// primitives, semantic, or components
        tier: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Split a merged tier document back into one file per top-level group
    Split {
        /// primitives, semantic, or components
        tier: String,

        /// Merged JSON document to split
        input: PathBuf,

        /// List the files that would be written without writing them
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = SwatchConfig::load(cli.config.as_deref())?;
    if let Some(tokens) = cli.tokens {
        config.tokens.root = tokens;
    }

    match cli.command {
        Commands::Build { docs } => commands::build::run(&config, docs),
        Commands::Lint {
            fix,
            warn,
            components,
        } => commands::lint::run(&config, fix, warn, components),
        Commands::Validate => commands::validate::run(&config),
        Commands::CheckUsage { paths, extensions } => {
            commands::usage::run(&config, paths, extensions)
        }
        Commands::Rename { from, to, dry_run } => {
            commands::migrate::rename(&config, &from, &to, dry_run)
        }
        Commands::Merge { tier, output } => {
            commands::migrate::merge(&config, &tier, output.as_deref())
        }
        Commands::Split {
            tier,
            input,
            dry_run,
        } => commands::migrate::split(&config, &tier, &input, dry_run),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
