//! Check command implementation.

use anyhow::{Context, Result};
use clap::Args;
use seolint::rules::Preset;
use seolint::{ConfigOptions, FailurePolicy, Report, RunOptions, Severity, SiteReport};
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use crate::config_resolver;
use crate::OutputFormat;

/// Report key used for a document read from standard input.
const STDIN_KEY: &str = "<stdin>";

/// Arguments of `seolint check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Files, directories or URLs to lint (default: `inputs` from the config)
    pub inputs: Vec<String>,

    /// Site origin used to tell internal links from external ones
    #[arg(long)]
    pub host: Option<String>,

    /// Named preset applied beneath the config file
    #[arg(long, value_parser = crate::parse_preset)]
    pub preset: Option<Preset>,

    /// Also analyze the link graph across all pages
    #[arg(long)]
    pub site: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Keep checking a plugin's rules after its first failure
    #[arg(long)]
    pub every_rule: bool,

    /// Read a single HTML document from standard input
    #[arg(long, conflicts_with_all = ["inputs", "site"])]
    pub stdin: bool,
}

/// Runs the check command.
pub fn run(args: CheckArgs, explicit_config: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;

    let source = config_resolver::resolve(&cwd, explicit_config);
    match source.path() {
        Some(p) if source.is_global() => tracing::info!("Using global config: {}", p.display()),
        Some(p) => tracing::debug!("Using config: {}", p.display()),
        None => tracing::debug!("No config file found, using defaults"),
    }

    let config = seolint::config(&ConfigOptions {
        cwd: Some(cwd.clone()),
        config_file: source.path().map(Path::to_path_buf),
        preset: args.preset,
        inputs: args.inputs.clone(),
        host: args.host.clone(),
    })?;

    let policy = if args.every_rule {
        FailurePolicy::EveryRule
    } else {
        FailurePolicy::default()
    };

    let (report, site) = if args.stdin {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .context("Failed to read HTML from stdin")?;

        let mut report = Report::new();
        report.insert(
            STDIN_KEY,
            seolint::Linter::new(&config).with_policy(policy).lint(&html),
        );
        (report, None)
    } else {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start the async runtime")?;

        let options = RunOptions {
            cwd: Some(cwd),
            policy,
        };

        if args.site {
            let (report, site) = runtime.block_on(seolint::crawl(config, &options))?;
            (report, Some(site))
        } else {
            (runtime.block_on(seolint::run(config, &options))?, None)
        }
    };

    let report = if args.quiet {
        super::output::errors_only(&report)
    } else {
        report
    };

    super::output::print(&report, site.as_ref(), args.format)?;

    Ok(exit_code(&report, site.as_ref()))
}

/// Warnings alone never fail a run; errors and site problems do.
fn exit_code(report: &Report, site: Option<&SiteReport>) -> ExitCode {
    let site_failed = site.is_some_and(|s| !s.is_clean());
    if report.has_violations_at(Severity::Error) || site_failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
