//! seolint CLI tool.
//!
//! Usage:
//! ```bash
//! seolint check [OPTIONS] [INPUTS]...
//! seolint list-rules
//! seolint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use seolint::rules::Preset;
use seolint::{ConfigError, RunError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// SEO linter for rendered HTML pages and whole static sites
#[derive(Parser)]
#[command(name = "seolint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint HTML files, directories or URLs
    Check(commands::check::CheckArgs),

    /// List available plugins, rules and presets
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

/// Parses a preset name for `--preset`.
pub(crate) fn parse_preset(name: &str) -> Result<Preset, String> {
    Preset::from_name(name).ok_or_else(|| {
        let names: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
        format!("unknown preset `{name}` (expected one of: {})", names.join(", "))
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match dispatch(cli) {
        Ok(code) => code,
        Err(err) => {
            report_fatal(err);
            ExitCode::from(2)
        }
    }
}

fn dispatch(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Check(args) => commands::check::run(args, cli.config.as_deref()),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Renders library diagnostics through miette, everything else as a plain chain.
fn report_fatal(err: anyhow::Error) {
    let err = match err.downcast::<ConfigError>() {
        Ok(diagnostic) => {
            eprintln!("{:?}", miette::Report::new(diagnostic));
            return;
        }
        Err(err) => err,
    };
    match err.downcast::<RunError>() {
        Ok(diagnostic) => eprintln!("{:?}", miette::Report::new(diagnostic)),
        Err(err) => eprintln!("{:?}", miette::miette!("{err:#}")),
    }
}
