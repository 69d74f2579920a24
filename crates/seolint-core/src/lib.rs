//! # seolint-core
//!
//! Core framework for linting rendered HTML for SEO defects.
//!
//! This crate provides the foundational traits and types for building
//! SEO checks. It includes:
//!
//! - [`Config`] with cascading presets and per-rule toggles
//! - [`Plugin`] trait and the [`Context`] assertion protocol
//! - [`Linter`] for evaluating plugins against one document
//! - [`Runner`] for resolving files, directories and URLs concurrently
//! - [`LinkGraph`] for site-wide duplicate, orphan and broken-link analysis
//!
//! ## Example
//!
//! ```ignore
//! use seolint_core::{Config, Runner};
//!
//! let config = Config::new()
//!     .with_inputs(["public"])
//!     .plugin(MyPlugin);
//!
//! let runner = Runner::builder().config(config).build()?;
//! let report = runner.run().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
mod context;
mod document;
mod linter;
mod plugin;
mod runner;
mod site;
mod types;

pub use config::{Config, ConfigError, RuleOptions, RuleSetting, Rules, Toggle};
pub use context::{Assertion, Context, FailurePolicy};
pub use document::{AttributeRecord, Document, DocumentError};
pub use linter::Linter;
pub use plugin::{Plugin, PluginError, PluginFn, PluginRef, PluginResult};
pub use runner::{
    classify_inputs, fetch, FetchError, InputError, InputKind, RunError, Runner, RunnerBuilder,
};
pub use site::{BrokenLink, LinkGraph, SiteReport};
pub use types::{Message, Messages, Report, Severity};
