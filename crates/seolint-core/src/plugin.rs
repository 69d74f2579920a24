//! Plugin trait for defining check plugins.

use crate::context::{Assertion, Context};
use crate::document::{Document, DocumentError};
use std::sync::Arc;

/// Why a plugin stopped before completing its checks.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// A rule failed. Recorded as a report message, never treated as a fault.
    #[error("{0}")]
    Assertion(Assertion),

    /// The document could not be queried.
    #[error(transparent)]
    Query(#[from] DocumentError),

    /// Any other unexpected failure inside the plugin.
    #[error("{0}")]
    Fault(String),
}

/// Result type returned by plugin checks and assertions.
pub type PluginResult = Result<(), PluginError>;

/// A check plugin over one concern of a document.
///
/// Plugins report through the [`Context`] and propagate its result with `?`,
/// which stops the remaining checks of the plugin at the first failure.
///
/// # Example
///
/// ```ignore
/// use seolint_core::{Context, Document, Plugin, PluginResult};
///
/// pub struct HtmlLang;
///
/// impl Plugin for HtmlLang {
///     fn name(&self) -> &'static str { "lang" }
///
///     fn check(&self, ctx: &Context, document: &Document) -> PluginResult {
///         let html = document.first("html")?;
///         let lang = html.as_ref().and_then(|h| h.attr("lang")).unwrap_or_default();
///         ctx.assert("lang.exists", !lang.is_empty(), "The <html> tag must declare a `lang`")
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Returns the name of this plugin (e.g. "title").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this plugin checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the rule ids this plugin may report, in evaluation order.
    fn rules(&self) -> &'static [&'static str] {
        &[]
    }

    /// Checks a single document.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Assertion`] for the first failed rule, or a
    /// fault when the plugin cannot complete.
    fn check(&self, ctx: &Context, document: &Document) -> PluginResult;
}

/// Shared handle to a plugin.
pub type PluginRef = Arc<dyn Plugin>;

type CheckFn = dyn Fn(&Context, &Document) -> PluginResult + Send + Sync;

/// Adapts a closure into a [`Plugin`].
pub struct PluginFn {
    name: &'static str,
    check: Box<CheckFn>,
}

impl PluginFn {
    /// Wraps `check` as a plugin called `name`.
    pub fn new<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(&Context, &Document) -> PluginResult + Send + Sync + 'static,
    {
        Self {
            name,
            check: Box::new(check),
        }
    }
}

impl Plugin for PluginFn {
    fn name(&self) -> &'static str {
        self.name
    }

    fn check(&self, ctx: &Context, document: &Document) -> PluginResult {
        (self.check)(ctx, document)
    }
}

impl std::fmt::Debug for PluginFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginFn").field("name", &self.name).finish()
    }
}
