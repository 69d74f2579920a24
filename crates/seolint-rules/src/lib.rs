//! # seolint-rules
//!
//! Built-in check plugins for seolint.
//!
//! ## Available Plugins
//!
//! | Plugin | Rules | Checks |
//! |--------|-------|--------|
//! | `title` | `title.*` | Single plain-text `<title>` within length bounds |
//! | `canonical` | `canonical.*` | Single absolute, lowercase, https canonical URL on the host |
//! | `description` | `description.*` | Single meta description related to the title |
//! | `viewport` | `viewport.*` | `width=device-width, initial-scale=1` viewport |
//! | `image` | `image.alt.*` | Meaningful `alt` text on images |
//! | `link` | `link.*` | Internal link style and external link safety |
//! | `heading` | `h1.*` | Single plain-text `<h1>` (opt-in, `strict` preset) |
//!
//! ## Usage
//!
//! ```ignore
//! use seolint_core::{Config, Linter};
//! use seolint_rules::{builtin_plugins, Preset};
//!
//! let mut config = Config::new().preset(Preset::Strict.config());
//! config.plugins.splice(0..0, builtin_plugins());
//!
//! let messages = Linter::new(&Config::new().merge(&config)).lint(html);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bounds;
mod patterns;
mod presets;

pub mod canonical;
pub mod description;
pub mod heading;
pub mod image;
pub mod link;
pub mod title;
pub mod viewport;

pub use canonical::Canonical;
pub use description::Description;
pub use heading::Heading;
pub use image::Image;
pub use link::Link;
pub use presets::{all_plugins, builtin_plugins, recommended, relaxed, strict, Preset};
pub use title::Title;
pub use viewport::Viewport;

/// Re-export core types for convenience.
pub use seolint_core::{Context, Document, Plugin, PluginResult, Severity};
