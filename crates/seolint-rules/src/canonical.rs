//! Plugin checking `<link rel="canonical">`.
//!
//! # Configuration
//!
//! - `canonical.href.match`: `{ hostname }` overrides the configured host.
//!   Skipped when no hostname is known.

use seolint_core::{Context, Document, Plugin, PluginResult};

/// Plugin name.
pub const NAME: &str = "canonical";

/// Rule ids, in evaluation order.
pub const RULES: &[&str] = &[
    "canonical.exists",
    "canonical.single",
    "canonical.href.exists",
    "canonical.href.absolute",
    "canonical.href.lowercase",
    "canonical.href.https",
    "canonical.href.match",
];

/// Requires one lowercase, absolute, `https://` canonical URL on the site's host.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonical;

impl Canonical {
    /// Creates the plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for Canonical {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires a single absolute https canonical link on the configured host"
    }

    fn rules(&self) -> &'static [&'static str] {
        RULES
    }

    fn check(&self, ctx: &Context, document: &Document) -> PluginResult {
        let links = document.query("link[rel=canonical]")?;

        ctx.assert("canonical.exists", !links.is_empty(), "A canonical link must exist")?;
        ctx.assert(
            "canonical.single",
            links.len() <= 1,
            "Must have only one canonical link",
        )?;

        let Some(link) = links.first() else {
            return Ok(());
        };
        let href = link.attr_or_empty("href");

        ctx.assert(
            "canonical.href.exists",
            !href.is_empty(),
            "Must not have empty `href` target",
        )?;
        ctx.assert(
            "canonical.href.absolute",
            href.starts_with("http://") || href.starts_with("https://"),
            "Must point to an absolute URL target",
        )?;
        ctx.assert(
            "canonical.href.lowercase",
            !href.chars().any(char::is_uppercase),
            "Must not include uppercase characters",
        )?;
        ctx.assert(
            "canonical.href.https",
            href.starts_with("https://"),
            "Must point to an \"https://\" address",
        )?;

        let target = href.to_lowercase();
        ctx.assert_with(
            "canonical.href.match",
            |options| {
                let hostname = options
                    .get_str("hostname")
                    .map(str::to_lowercase)
                    .or_else(|| ctx.hostname());
                hostname.map_or(true, |hostname| target.contains(&hostname))
            },
            "Must include the provided `hostname` value",
        )
    }
}
