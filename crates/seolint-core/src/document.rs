//! Parsed HTML documents and their element projections.

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

/// Errors raised while querying a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The CSS selector could not be parsed.
    #[error("Invalid selector `{selector}`: {message}")]
    InvalidSelector {
        /// Selector source.
        selector: String,
        /// Parser message.
        message: String,
    },
}

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document. Parsing never fails; malformed markup
    /// is recovered the way browsers do.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// Returns a projection of every element matching `selector`, in
    /// document order.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidSelector`] for a malformed selector.
    pub fn query(&self, selector: &str) -> Result<Vec<AttributeRecord>, DocumentError> {
        let parsed = Selector::parse(selector).map_err(|e| DocumentError::InvalidSelector {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;
        Ok(self.html.select(&parsed).map(AttributeRecord::from).collect())
    }

    /// Returns the first element matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidSelector`] for a malformed selector.
    pub fn first(&self, selector: &str) -> Result<Option<AttributeRecord>, DocumentError> {
        Ok(self.query(selector)?.into_iter().next())
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

/// Normalized projection of one matched element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
    /// Lowercase tag name.
    pub tag: String,
    /// Serialized inner markup.
    pub inner_html: String,
    /// Concatenated text content.
    pub inner_text: String,
    /// Attributes keyed by lowercase name.
    pub attributes: BTreeMap<String, String>,
}

impl AttributeRecord {
    /// Returns an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns an attribute value, or `""` when missing.
    #[must_use]
    pub fn attr_or_empty(&self, name: &str) -> &str {
        self.attr(name).unwrap_or_default()
    }

    /// Checks whether a space-separated attribute (like `rel`) contains `token`.
    #[must_use]
    pub fn has_token(&self, name: &str, token: &str) -> bool {
        self.attr(name).is_some_and(|value| {
            value
                .split_ascii_whitespace()
                .any(|t| t.eq_ignore_ascii_case(token))
        })
    }
}

impl From<ElementRef<'_>> for AttributeRecord {
    fn from(element: ElementRef<'_>) -> Self {
        let value = element.value();
        Self {
            tag: value.name().to_ascii_lowercase(),
            inner_html: element.inner_html(),
            inner_text: element.text().collect(),
            attributes: value
                .attrs()
                .map(|(name, v)| (name.to_ascii_lowercase(), v.to_string()))
                .collect(),
        }
    }
}
