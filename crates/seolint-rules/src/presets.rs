//! Plugin lists and named presets.

use crate::{Canonical, Description, Heading, Image, Link, Title, Viewport};
use seolint_core::{Config, PluginRef, Toggle};
use serde_json::json;
use std::sync::Arc;

/// Named preset configurations for seolint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// The default rules with their default options.
    Recommended,
    /// Adds the heading plugin and tightens length bounds.
    Strict,
    /// Downgrades internal link style rules to warnings.
    Relaxed,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Self; 3] = [Self::Recommended, Self::Strict, Self::Relaxed];

    /// Returns the preset's name (e.g. `"strict"`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Relaxed => "relaxed",
        }
    }

    /// Looks a preset up by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.name() == name)
    }

    /// Returns a one-line summary of the preset.
    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Self::Recommended => "built-in plugins, every rule an error (default)",
            Self::Strict => "adds h1 checks, title <= 70 and description 50..160 characters",
            Self::Relaxed => "internal link trailing/pretty/lowercase rules as warnings",
        }
    }

    /// Returns the preset as a partial config, to be merged like any other.
    #[must_use]
    pub fn config(self) -> Config {
        match self {
            Self::Recommended => recommended(),
            Self::Strict => strict(),
            Self::Relaxed => relaxed(),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The defaults: no extra plugins, no rule overrides.
#[must_use]
pub fn recommended() -> Config {
    Config::new()
}

/// Adds the heading plugin and tightens title and description lengths.
#[must_use]
pub fn strict() -> Config {
    Config::new()
        .plugin(Heading)
        .rule(
            "title.content.length",
            (Toggle::Error, json!({ "min": 10, "max": 70 })),
        )
        .rule(
            "description.content.length",
            (Toggle::Error, json!({ "min": 50, "max": 160 })),
        )
}

/// Reports internal link style problems as warnings.
#[must_use]
pub fn relaxed() -> Config {
    Config::new()
        .rule("link.internal.trailing", Toggle::Warn)
        .rule("link.internal.pretty", Toggle::Warn)
        .rule("link.internal.lowercase", Toggle::Warn)
}

/// Returns the plugins every config starts with, in evaluation order.
#[must_use]
pub fn builtin_plugins() -> Vec<PluginRef> {
    vec![
        Arc::new(Title),
        Arc::new(Canonical),
        Arc::new(Description),
        Arc::new(Viewport),
        Arc::new(Image),
        Arc::new(Link),
    ]
}

/// Returns every available plugin, including the opt-in ones.
#[must_use]
pub fn all_plugins() -> Vec<PluginRef> {
    let mut plugins = builtin_plugins();
    plugins.push(Arc::new(Heading));
    plugins
}
