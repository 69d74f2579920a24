//! Compiled regular expressions shared by the plugins.

use regex::Regex;
use seolint_core::{AttributeRecord, PluginError};
use std::sync::LazyLock;

type Pattern = LazyLock<Result<Regex, regex::Error>>;

/// Separators between word tokens (Unicode-aware `\w`).
pub(crate) static WORD_SEPARATOR: Pattern = LazyLock::new(|| Regex::new(r"[^\w]+"));

/// An opening, closing or comment tag.
pub(crate) static MARKUP: Pattern = LazyLock::new(|| Regex::new(r"<[A-Za-z!/][^>]*>"));

/// A `.htm` or `.html` suffix.
pub(crate) static HTML_SUFFIX: Pattern = LazyLock::new(|| Regex::new(r"(?i)\.html?$"));

/// Returns the compiled pattern, or a plugin fault if it failed to compile.
pub(crate) fn compiled(pattern: &'static Pattern) -> Result<&'static Regex, PluginError> {
    pattern
        .as_ref()
        .map_err(|e| PluginError::Fault(format!("invalid pattern: {e}")))
}

/// Whether an element holds markup: a child element or comment, or tag-like text.
///
/// Serialized inner HTML escapes `<` in text, so a raw `<` there always
/// opens a child node.
pub(crate) fn has_markup(record: &AttributeRecord) -> Result<bool, PluginError> {
    let markup = compiled(&MARKUP)?;
    Ok(record.inner_html.contains('<') || markup.is_match(&record.inner_text))
}

/// Lowercase word tokens of `text`, empty tokens dropped.
pub(crate) fn words(text: &str) -> Result<Vec<String>, PluginError> {
    let separator = compiled(&WORD_SEPARATOR)?;
    Ok(separator
        .split(&text.to_lowercase())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect())
}
