//! # seolint
//!
//! Lint rendered HTML for SEO defects, per page and across a whole site.
//!
//! This is the main facade crate that re-exports core functionality and the
//! built-in plugins.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use seolint::{config, run, ConfigOptions, RunOptions};
//!
//! let config = config(&ConfigOptions {
//!     inputs: vec!["public".into()],
//!     host: Some("https://example.com".into()),
//!     ..ConfigOptions::default()
//! })?;
//!
//! let report = run(config, &RunOptions::default()).await?;
//! for (input, messages) in &report {
//!     for (rule, message) in messages {
//!         println!("{input}: [{rule}] {message}");
//!     }
//! }
//! ```
//!
//! ## Single Documents
//!
//! ```rust,ignore
//! let messages = seolint::lint("<title>Hello</title>", &config);
//! ```
//!
//! ## Configuration
//!
//! `seolint.toml` (or `seolint.json`, `.seolint.toml`) in the working
//! directory:
//!
//! ```toml
//! host = "https://example.com"
//! inputs = ["public"]
//! presets = ["./base.toml"]
//!
//! [rules]
//! "canonical.href.match" = false
//! "title.content.length" = ["warn", { min = 20, max = 70 }]
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Re-export core types and traits
pub use seolint_core::*;

/// Built-in plugins and presets.
pub mod rules {
    pub use seolint_rules::*;
}

mod entry;

pub use entry::{config, crawl, lint, run, ConfigOptions, RunOptions};
