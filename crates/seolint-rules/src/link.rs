//! Plugin checking `<a href>` targets.
//!
//! Links are deduplicated by their fragment-free href. Fragment-only,
//! `mailto:`, `javascript:` and `tel:` links are ignored.
//!
//! A link is internal when it is relative, or when its hostname equals the
//! configured host. Without a configured host every absolute link counts as
//! external.
//!
//! # Configuration
//!
//! - `link.external.limit`: a bare number or `{ max }` (default 50)

use crate::patterns::{compiled, HTML_SUFFIX};
use reqwest::Url;
use seolint_core::{AttributeRecord, Context, Document, Plugin, PluginResult};
use std::collections::HashSet;
use tracing::debug;

/// Plugin name.
pub const NAME: &str = "link";

/// Rule ids, in evaluation order.
pub const RULES: &[&str] = &[
    "link.href.empty",
    "link.external.https",
    "link.internal.nofollow",
    "link.internal.lowercase",
    "link.internal.trailing",
    "link.internal.pretty",
    "link.internal.absolute",
    "link.internal.https",
    "link.internal.target",
    "link.external.limit",
];

const DEFAULT_EXTERNAL_LIMIT: i64 = 50;

/// Schemes that are not page links.
const SKIPPED_SCHEMES: &[&str] = &["mailto:", "javascript:", "tel:"];

/// Requires consistent internal links and a bounded number of safe external links.
#[derive(Debug, Clone, Copy, Default)]
pub struct Link;

impl Link {
    /// Creates the plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for Link {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires pretty internal links and a bounded number of https external links"
    }

    fn rules(&self) -> &'static [&'static str] {
        RULES
    }

    fn check(&self, ctx: &Context, document: &Document) -> PluginResult {
        let hostname = ctx.hostname();
        if hostname.is_none() {
            debug!("No host configured, absolute links are treated as external");
        }

        let mut seen = HashSet::new();
        let mut externals: i64 = 0;

        for anchor in document.query("a[href]")? {
            let raw = anchor.attr_or_empty("href");
            if raw.starts_with('#') || is_skipped_scheme(raw) {
                continue;
            }

            let href = raw.split('#').next().unwrap_or_default();
            if !seen.insert(href.to_string()) {
                continue;
            }

            ctx.assert(
                "link.href.empty",
                !href.trim().is_empty(),
                "Must not have empty `href` target",
            )?;
            if href.trim().is_empty() {
                continue;
            }

            if is_external(href, hostname.as_deref()) {
                externals += 1;
                ctx.assert(
                    "link.external.https",
                    href.starts_with("https://"),
                    "External link must include \"https://\" prefix",
                )?;
            } else {
                check_internal(ctx, &anchor, href)?;
            }
        }

        if externals > 0 {
            ctx.assert_with(
                "link.external.limit",
                |options| externals <= options.threshold("max", DEFAULT_EXTERNAL_LIMIT),
                "Exceeded external links maximum",
            )?;
        }

        Ok(())
    }
}

fn check_internal(ctx: &Context, anchor: &AttributeRecord, href: &str) -> PluginResult {
    let path = href.split('?').next().unwrap_or_default();

    ctx.assert(
        "link.internal.nofollow",
        !anchor.has_token("rel", "nofollow"),
        "Internal links must not include `rel=nofollow`",
    )?;
    ctx.assert(
        "link.internal.lowercase",
        !href.chars().any(char::is_uppercase),
        "Internal links should not include uppercase",
    )?;
    ctx.assert(
        "link.internal.trailing",
        path.ends_with('/') || has_file_suffix(path),
        "Internal links must end with a trailing slash",
    )?;

    let html_suffix = compiled(&HTML_SUFFIX)?;
    ctx.assert(
        "link.internal.pretty",
        !html_suffix.is_match(path),
        "Internal links should not include \".html\" suffix",
    )?;
    ctx.assert(
        "link.internal.absolute",
        href.starts_with('/') || href.starts_with("http://") || href.starts_with("https://"),
        "Must be an absolute URL format",
    )?;
    ctx.assert(
        "link.internal.https",
        !href.starts_with("http://"),
        "Must include \"https://\" prefix",
    )?;

    let opens_new_tab = anchor
        .attr("target")
        .is_some_and(|target| target.eq_ignore_ascii_case("_blank"));
    ctx.assert(
        "link.internal.target",
        !opens_new_tab || (anchor.has_token("rel", "noopener") && anchor.has_token("rel", "noreferrer")),
        "Links with `target=_blank` must include `rel=\"noopener noreferrer\"`",
    )
}

fn is_skipped_scheme(href: &str) -> bool {
    let lower = href.trim_start().to_ascii_lowercase();
    SKIPPED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

/// Base that relative hrefs resolve against; it never matches a real host.
const PLACEHOLDER_BASE: &str = "https://seolint.invalid/";
const PLACEHOLDER_HOST: &str = "seolint.invalid";

/// Relative hrefs are always internal; absolute ones are compared by hostname.
fn is_external(href: &str, hostname: Option<&str>) -> bool {
    let Ok(base) = Url::parse(PLACEHOLDER_BASE) else {
        return false;
    };
    let Ok(target) = base.join(href) else {
        return true;
    };

    match target.host_str() {
        Some(PLACEHOLDER_HOST) => false,
        Some(host) => hostname.map_or(true, |hostname| !host.eq_ignore_ascii_case(hostname)),
        None => true,
    }
}

/// Whether the last path segment looks like a file (`feed.xml`, `a.html`).
fn has_file_suffix(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .is_some_and(|segment| segment.contains('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use seolint_core::{Config, FailurePolicy, Linter, Messages, Toggle};
    use serde_json::json;

    fn anchors(hrefs: &[&str]) -> String {
        hrefs
            .iter()
            .map(|href| format!(r#"<a href="{href}">x</a>"#))
            .collect()
    }

    fn lint_with(config: Config, html: &str) -> Messages {
        Linter::new(&config.plugin(Link))
            .with_policy(FailurePolicy::EveryRule)
            .lint(html)
    }

    fn lint(html: &str) -> Messages {
        lint_with(Config::new().with_host("https://example.com"), html)
    }

    #[test]
    fn clean_links_pass() {
        let html = anchors(&[
            "/",
            "/about/",
            "/feed.xml",
            "https://example.com/blog/",
            "https://rust-lang.org/",
            "#top",
            "mailto:me@example.com",
            "javascript:void(0)",
            "tel:+123",
        ]);
        assert!(lint(&html).is_empty());
    }

    #[test]
    fn empty_href() {
        let messages = lint(r#"<a href="">x</a>"#);
        assert_eq!(messages["link.href.empty"].message, "Must not have empty `href` target");
    }

    #[test]
    fn insecure_external_link() {
        let messages = lint(&anchors(&["http://rust-lang.org/"]));
        assert!(messages.contains_key("link.external.https"));
        assert!(!messages.contains_key("link.internal.https"));
    }

    #[test]
    fn internal_style_rules() {
        let messages = lint(&anchors(&["/About/", "/about", "/about.html", "about/", "http://example.com/x/"]));

        let ids: Vec<&str> = messages.keys().map(String::as_str).collect();
        assert_eq!(
            ids,
            [
                "link.internal.absolute",
                "link.internal.https",
                "link.internal.lowercase",
                "link.internal.pretty",
                "link.internal.trailing",
            ]
        );
    }

    #[test]
    fn nofollow_on_internal_link() {
        let messages = lint(r#"<a href="/about/" rel="Nofollow">x</a>"#);
        assert!(messages.contains_key("link.internal.nofollow"));
    }

    #[test]
    fn blank_target_requires_rel_tokens() {
        let unsafe_link = lint(r#"<a href="/about/" target="_blank" rel="noopener">x</a>"#);
        assert!(unsafe_link.contains_key("link.internal.target"));

        let safe_link = lint(r#"<a href="/about/" target="_blank" rel="noreferrer noopener">x</a>"#);
        assert!(safe_link.is_empty());
    }

    #[test]
    fn fragments_are_stripped_before_dedup() {
        let html = r#"<a href="/About/#a">x</a><a href="/About/#b">y</a>"#;
        let messages = Linter::new(&Config::new().with_host("https://example.com").plugin(Link)).lint(html);
        assert_eq!(messages.len(), 1);
        assert!(messages.contains_key("link.internal.lowercase"));
    }

    #[test]
    fn external_limit_accepts_number_or_table() {
        let html = anchors(&["https://a.com/", "https://b.com/", "https://c.com/"]);

        let bare = Config::new().rule("link.external.limit", (Toggle::Error, json!(2)));
        assert_eq!(
            lint_with(bare, &html)["link.external.limit"].message,
            "Exceeded external links maximum"
        );

        let table = Config::new().rule("link.external.limit", (Toggle::Warn, json!({ "max": 3 })));
        assert!(lint_with(table, &html).is_empty());
    }

    #[test]
    fn without_host_absolute_links_are_external() {
        let messages = lint_with(Config::new(), &anchors(&["http://example.com/About"]));
        assert!(messages.contains_key("link.external.https"));
        assert!(!messages.contains_key("link.internal.lowercase"));
    }

    #[test]
    fn protocol_relative_links_use_hostname() {
        assert!(!is_external("//example.com/a/", Some("example.com")));
        assert!(is_external("//cdn.com/a/", Some("example.com")));
        assert!(!is_external("/a/", None));
        assert!(is_external("https://example.com/", None));
    }

    #[test]
    fn url_in_query_string_stays_internal() {
        assert!(!is_external("/go/?to=https://rust-lang.org/", Some("example.com")));
        assert!(!is_external("go/?to=https://rust-lang.org/", None));
        assert!(lint(&anchors(&["/go/?to=https://rust-lang.org/"])).is_empty());
    }
}
