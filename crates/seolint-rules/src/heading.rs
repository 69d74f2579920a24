//! Plugin checking the top-level `<h1>` heading.
//!
//! Not part of the default plugin list; enabled by the `strict` preset.

use crate::patterns::has_markup;
use seolint_core::{Context, Document, Plugin, PluginResult};

/// Plugin name.
pub const NAME: &str = "heading";

/// Rule ids, in evaluation order.
pub const RULES: &[&str] = &["h1.exists", "h1.single", "h1.content.empty", "h1.content.html"];

/// Requires a single plain-text `<h1>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heading;

impl Heading {
    /// Creates the plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for Heading {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires a single non-empty plain-text <h1>"
    }

    fn rules(&self) -> &'static [&'static str] {
        RULES
    }

    fn check(&self, ctx: &Context, document: &Document) -> PluginResult {
        let headings = document.query("h1")?;

        ctx.assert("h1.exists", !headings.is_empty(), "An h1 tag must exist")?;
        ctx.assert("h1.single", headings.len() <= 1, "Must have only one h1 tag")?;

        let Some(heading) = headings.first() else {
            return Ok(());
        };

        ctx.assert(
            "h1.content.empty",
            !heading.inner_text.trim().is_empty(),
            "Must not be empty",
        )?;
        ctx.assert(
            "h1.content.html",
            !has_markup(heading)?,
            "Must not include HTML content",
        )
    }
}
