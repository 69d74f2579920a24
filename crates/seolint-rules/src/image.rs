//! Plugin checking `alt` text of every `<img>`.

use seolint_core::{Context, Document, Plugin, PluginResult};

/// Plugin name.
pub const NAME: &str = "image";

/// Rule ids, in evaluation order.
pub const RULES: &[&str] = &[
    "image.alt.exists",
    "image.alt.content.undefined",
    "image.alt.content.null",
];

/// Requires meaningful `alt` text on images.
#[derive(Debug, Clone, Copy, Default)]
pub struct Image;

impl Image {
    /// Creates the plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for Image {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires non-empty alt text on every image"
    }

    fn rules(&self) -> &'static [&'static str] {
        RULES
    }

    fn check(&self, ctx: &Context, document: &Document) -> PluginResult {
        for img in document.query("img")? {
            let alt = img.attr_or_empty("alt");

            ctx.assert(
                "image.alt.exists",
                !alt.trim().is_empty(),
                "Must have an `alt` attribute",
            )?;
            ctx.assert(
                "image.alt.content.undefined",
                !alt.contains("undefined"),
                "Must not include \"undefined\" in `alt` value",
            )?;
            ctx.assert(
                "image.alt.content.null",
                !alt.contains("null"),
                "Must not include \"null\" in `alt` value",
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seolint_core::{Config, FailurePolicy, Linter, Messages};

    fn lint(html: &str) -> Messages {
        Linter::new(&Config::new().plugin(Image)).lint(html)
    }

    #[test]
    fn no_images_pass() {
        assert!(lint("<p>text only</p>").is_empty());
    }

    #[test]
    fn described_images_pass() {
        assert!(lint(r#"<img src="a.png" alt="A cat"><img src="b.png" alt="A dog">"#).is_empty());
    }

    #[test]
    fn missing_and_blank_alt() {
        assert!(lint(r#"<img src="a.png">"#).contains_key("image.alt.exists"));
        assert!(lint(r#"<img src="a.png" alt="  ">"#).contains_key("image.alt.exists"));
    }

    #[test]
    fn template_leftovers() {
        assert!(lint(r#"<img alt="undefined">"#).contains_key("image.alt.content.undefined"));
        assert!(lint(r#"<img alt="null">"#).contains_key("image.alt.content.null"));
    }

    #[test]
    fn first_failing_image_stops_the_plugin() {
        let html = r#"<img alt=""><img alt="null">"#;

        let messages = lint(html);
        assert_eq!(messages.len(), 1);

        let messages = Linter::new(&Config::new().plugin(Image))
            .with_policy(FailurePolicy::EveryRule)
            .lint(html);
        assert_eq!(messages.len(), 2);
    }
}
