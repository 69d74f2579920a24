//! Plugin checking the document `<title>`.
//!
//! # Rules
//!
//! - `title.exists`, `title.single`
//! - `title.content.html`: the title must be plain text
//! - `title.content.undefined`, `title.content.null`: template leftovers
//! - `title.content.length`: `{ min, max }` characters (default 10..300)

use crate::bounds::check_length;
use crate::patterns::has_markup;
use seolint_core::{Context, Document, Plugin, PluginResult};

/// Plugin name.
pub const NAME: &str = "title";

/// Rule ids, in evaluation order.
pub const RULES: &[&str] = &[
    "title.exists",
    "title.single",
    "title.content.html",
    "title.content.undefined",
    "title.content.null",
    "title.content.length",
];

const DEFAULT_MIN: i64 = 10;
const DEFAULT_MAX: i64 = 300;

/// Requires a single plain-text `<title>` of reasonable length.
#[derive(Debug, Clone, Copy, Default)]
pub struct Title;

impl Title {
    /// Creates the plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for Title {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires a single plain-text <title> of reasonable length"
    }

    fn rules(&self) -> &'static [&'static str] {
        RULES
    }

    fn check(&self, ctx: &Context, document: &Document) -> PluginResult {
        let titles = document.query("title")?;

        ctx.assert("title.exists", !titles.is_empty(), "A title tag must exist")?;
        ctx.assert("title.single", titles.len() <= 1, "Must have only one title tag")?;

        let Some(title) = titles.first() else {
            return Ok(());
        };
        let text = &title.inner_text;

        ctx.assert(
            "title.content.html",
            !has_markup(title)?,
            "Must not include HTML content",
        )?;
        ctx.assert(
            "title.content.undefined",
            !text.contains("undefined"),
            "Must not include \"undefined\" in `title` value",
        )?;
        ctx.assert(
            "title.content.null",
            !text.contains("null"),
            "Must not include \"null\" in `title` value",
        )?;

        check_length(
            ctx,
            "title.content.length",
            text.chars().count(),
            DEFAULT_MIN,
            DEFAULT_MAX,
        )
    }
}
