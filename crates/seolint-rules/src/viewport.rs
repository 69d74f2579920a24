//! Plugin checking `<meta name="viewport">`.

use crate::description::named_meta;
use seolint_core::{Context, Document, Plugin, PluginResult};

/// Plugin name.
pub const NAME: &str = "viewport";

/// Rule ids, in evaluation order.
pub const RULES: &[&str] = &[
    "viewport.exists",
    "viewport.single",
    "viewport.content.empty",
    "viewport.content.device",
    "viewport.content.scale",
];

/// Requires a mobile-friendly viewport declaration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewport;

impl Viewport {
    /// Creates the plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for Viewport {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires a single device-width viewport meta tag"
    }

    fn rules(&self) -> &'static [&'static str] {
        RULES
    }

    fn check(&self, ctx: &Context, document: &Document) -> PluginResult {
        let metas = named_meta(document, "viewport")?;

        ctx.assert(
            "viewport.exists",
            !metas.is_empty(),
            "A \"meta[name=viewport]\" tag must exist",
        )?;
        ctx.assert(
            "viewport.single",
            metas.len() <= 1,
            "Must have only one \"viewport\" meta tag",
        )?;

        let Some(meta) = metas.first() else {
            return Ok(());
        };
        let content = meta.attr_or_empty("content");

        ctx.assert(
            "viewport.content.empty",
            !content.trim().is_empty(),
            "Must not have empty \"content\" value",
        )?;
        ctx.assert(
            "viewport.content.device",
            content.contains("width=device-width"),
            "Must include \"width=device-width\" value",
        )?;
        ctx.assert(
            "viewport.content.scale",
            content.contains("initial-scale=1"),
            "Must include \"initial-scale=1\" value",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seolint_core::{Config, Linter, Messages};

    fn lint(content: Option<&str>) -> Messages {
        let html = match content {
            Some(content) => format!(r#"<meta name="viewport" content="{content}">"#),
            None => "<title>x</title>".to_string(),
        };
        Linter::new(&Config::new().plugin(Viewport)).lint(&html)
    }

    #[test]
    fn standard_viewport_passes() {
        assert!(lint(Some("width=device-width, initial-scale=1")).is_empty());
    }

    #[test]
    fn missing_viewport() {
        assert!(lint(None).contains_key("viewport.exists"));
    }

    #[test]
    fn empty_content() {
        assert!(lint(Some(" ")).contains_key("viewport.content.empty"));
    }

    #[test]
    fn fixed_width() {
        assert!(lint(Some("width=1024, initial-scale=1")).contains_key("viewport.content.device"));
    }

    #[test]
    fn missing_scale() {
        let messages = lint(Some("width=device-width"));
        assert_eq!(
            messages["viewport.content.scale"].message,
            "Must include \"initial-scale=1\" value"
        );
    }
}
