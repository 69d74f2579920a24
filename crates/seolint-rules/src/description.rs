//! Plugin checking `<meta name="description">`.
//!
//! # Rules
//!
//! - `description.exists`, `description.single`
//! - `description.content.empty`, `description.content.html`
//! - `description.content.undefined`, `description.content.null`
//! - `description.content.length`: `{ min, max }` characters (default 10..300)
//! - `description.content.title`: shares at least one word with the title

use crate::bounds::check_length;
use crate::patterns::{compiled, words, MARKUP};
use seolint_core::{AttributeRecord, Context, Document, DocumentError, Plugin, PluginResult};
use std::collections::HashSet;

/// Plugin name.
pub const NAME: &str = "description";

/// Rule ids, in evaluation order.
pub const RULES: &[&str] = &[
    "description.exists",
    "description.single",
    "description.content.empty",
    "description.content.html",
    "description.content.undefined",
    "description.content.null",
    "description.content.length",
    "description.content.title",
];

const DEFAULT_MIN: i64 = 10;
const DEFAULT_MAX: i64 = 300;

/// Requires a single meaningful meta description related to the title.
#[derive(Debug, Clone, Copy, Default)]
pub struct Description;

impl Description {
    /// Creates the plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Returns the `<meta>` tags whose `name` matches, ignoring case.
pub(crate) fn named_meta(
    document: &Document,
    name: &str,
) -> Result<Vec<AttributeRecord>, DocumentError> {
    Ok(document
        .query("meta[name]")?
        .into_iter()
        .filter(|meta| meta.attr_or_empty("name").eq_ignore_ascii_case(name))
        .collect())
}

impl Plugin for Description {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires a single meta description that matches the title"
    }

    fn rules(&self) -> &'static [&'static str] {
        RULES
    }

    fn check(&self, ctx: &Context, document: &Document) -> PluginResult {
        let metas = named_meta(document, "description")?;

        ctx.assert(
            "description.exists",
            !metas.is_empty(),
            "A \"meta[name=description]\" must exist",
        )?;
        ctx.assert(
            "description.single",
            metas.len() <= 1,
            "Must have only one description meta tag",
        )?;

        let Some(meta) = metas.first() else {
            return Ok(());
        };
        let content = meta.attr_or_empty("content").trim();

        ctx.assert("description.content.empty", !content.is_empty(), "Must not be empty")?;
        let markup = compiled(&MARKUP)?;
        ctx.assert(
            "description.content.html",
            !markup.is_match(content),
            "Must not include HTML content",
        )?;
        ctx.assert(
            "description.content.undefined",
            !content.contains("undefined"),
            "Must not include \"undefined\" in value",
        )?;
        ctx.assert(
            "description.content.null",
            !content.contains("null"),
            "Must not include \"null\" in value",
        )?;

        check_length(
            ctx,
            "description.content.length",
            content.chars().count(),
            DEFAULT_MIN,
            DEFAULT_MAX,
        )?;

        let Some(title) = document.first("title")? else {
            return Ok(());
        };
        let described: HashSet<String> = words(content)?.into_iter().collect();
        let shared = words(title.inner_text.trim())?
            .iter()
            .any(|word| described.contains(word));

        ctx.assert(
            "description.content.title",
            shared,
            "Must include at least one word in the <title> tag.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seolint_core::{Config, Linter, Messages};

    fn lint(html: &str) -> Messages {
        Linter::new(&Config::new().plugin(Description)).lint(html)
    }

    fn page(title: &str, description: &str) -> String {
        format!(r#"<title>{title}</title><meta name="description" content="{description}">"#)
    }

    #[test]
    fn valid_description_passes() {
        assert!(lint(&page("Rust tips", "Practical tips for writing Rust")).is_empty());
    }

    #[test]
    fn missing_description() {
        let messages = lint("<title>Hello</title>");
        assert_eq!(
            messages["description.exists"].message,
            "A \"meta[name=description]\" must exist"
        );
    }

    #[test]
    fn name_is_matched_case_insensitively() {
        let messages = lint(r#"<title>Rust tips</title><meta name="Description" content="Practical tips for Rust">"#);
        assert!(messages.is_empty());
    }

    #[test]
    fn blank_content_is_empty() {
        let messages = lint(&page("Rust tips", "   "));
        assert_eq!(messages["description.content.empty"].message, "Must not be empty");
    }

    #[test]
    fn markup_in_content() {
        let messages = lint(&page("Rust tips", "Practical &lt;b&gt;tips&lt;/b&gt; for Rust"));
        assert!(messages.contains_key("description.content.html"));
    }

    #[test]
    fn template_leftovers() {
        assert!(lint(&page("Rust tips", "Rust tips for undefined")).contains_key("description.content.undefined"));
        assert!(lint(&page("Rust tips", "Rust tips for null people")).contains_key("description.content.null"));
    }

    #[test]
    fn short_content() {
        let messages = lint(&page("Rust", "Rust"));
        assert_eq!(
            messages["description.content.length"].message,
            "Must not have less than 10 characters"
        );
    }

    #[test]
    fn no_shared_word_with_title() {
        let messages = lint(&page("Gardening guide", "Practical tips for writing Rust"));
        assert_eq!(
            messages["description.content.title"].message,
            "Must include at least one word in the <title> tag."
        );
    }

    #[test]
    fn punctuation_does_not_count_as_shared_word() {
        let messages = lint(&page("Gardening - guide!", "Practical tips - for writing Rust!"));
        assert!(messages.contains_key("description.content.title"));
    }

    #[test]
    fn title_check_skipped_without_title() {
        let messages = lint(r#"<meta name="description" content="Practical tips for writing Rust">"#);
        assert!(messages.is_empty());
    }
}
