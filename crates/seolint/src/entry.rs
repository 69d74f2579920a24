//! Library entry points: resolve a config, lint a string, run or crawl inputs.

use seolint_core::config::{load, load_file};
use seolint_core::{
    Config, ConfigError, FailurePolicy, Linter, Messages, Report, RunError, Runner, SiteReport,
};
use seolint_rules::{builtin_plugins, Preset};
use std::path::PathBuf;
use tracing::debug;

/// Options for [`config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    /// Directory the config file is looked up in (default: current directory).
    pub cwd: Option<PathBuf>,
    /// Explicit config file, bypassing lookup.
    pub config_file: Option<PathBuf>,
    /// Named preset applied beneath the config file.
    pub preset: Option<Preset>,
    /// Inputs overriding the config file's `inputs` when non-empty.
    pub inputs: Vec<String>,
    /// Host overriding the config file's `host`.
    pub host: Option<String>,
}

/// Options for [`run`] and [`crawl`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Directory relative inputs are resolved against (default: current directory).
    pub cwd: Option<PathBuf>,
    /// Failure policy for every plugin call.
    pub policy: FailurePolicy,
}

/// Resolves the effective config.
///
/// Layers, lowest first: the built-in plugins, the named preset, the config
/// file, then `inputs`/`host` overrides.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded, or if the resulting
/// `host` has no `http://`/`https://` protocol.
pub fn config(options: &ConfigOptions) -> Result<Config, ConfigError> {
    let cwd = resolve_cwd(options.cwd.clone()).map_err(|e| ConfigError::Io {
        path: PathBuf::from("."),
        source: e,
    })?;

    let file = match &options.config_file {
        Some(path) => load_file(&cwd.join(path))?,
        None => load(&cwd)?,
    };

    let mut base = Config::new();
    base.plugins = builtin_plugins();
    if let Some(preset) = options.preset {
        debug!("Applying preset {preset}");
        base.merge_into(&preset.config());
    }

    let mut value = base.merge(&file);
    if !options.inputs.is_empty() {
        value.inputs = Some(options.inputs.clone());
    }
    if let Some(host) = &options.host {
        value.host = Some(host.clone());
    }

    value.validate()?;
    Ok(value)
}

/// Lints a single HTML document.
///
/// An empty result means the document is clean.
#[must_use]
pub fn lint(html: &str, config: &Config) -> Messages {
    Linter::new(config).lint(html)
}

/// Lints every input of `config`.
///
/// # Errors
///
/// Returns an error for a missing or mixed input list.
pub async fn run(config: Config, options: &RunOptions) -> Result<Report, RunError> {
    runner(config, options)?.run().await
}

/// Lints every input of `config` and analyzes the site's link graph.
///
/// # Errors
///
/// Returns an error for a missing or mixed input list.
pub async fn crawl(config: Config, options: &RunOptions) -> Result<(Report, SiteReport), RunError> {
    runner(config, options)?.crawl().await
}

fn runner(config: Config, options: &RunOptions) -> Result<Runner, RunError> {
    let mut builder = Runner::builder().config(config).policy(options.policy);
    if let Some(cwd) = &options.cwd {
        builder = builder.cwd(cwd);
    }
    builder.build()
}

fn resolve_cwd(cwd: Option<PathBuf>) -> std::io::Result<PathBuf> {
    let current = std::env::current_dir()?;
    Ok(match cwd {
        Some(path) => current.join(path),
        None => current,
    })
}
