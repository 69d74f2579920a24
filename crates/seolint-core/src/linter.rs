//! Per-document evaluation of the plugin list.

use crate::config::{Config, Rules};
use crate::context::{Context, FailurePolicy};
use crate::document::Document;
use crate::plugin::{PluginError, PluginRef};
use crate::types::Messages;

use tracing::{debug, warn};

/// Runs every plugin of a config against single documents.
///
/// The rules and plugins are snapshotted from the [`Config`] at
/// construction, so the config can no longer change evaluation.
#[derive(Clone)]
pub struct Linter {
    plugins: Vec<PluginRef>,
    rules: Rules,
    host: String,
    policy: FailurePolicy,
}

impl Linter {
    /// Creates a linter from the effective config.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            plugins: config.plugins.clone(),
            rules: config.rules.clone(),
            host: config.host().to_string(),
            policy: FailurePolicy::default(),
        }
    }

    /// Sets the failure policy (default: [`FailurePolicy::FirstPerPlugin`]).
    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the number of registered plugins.
    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Parses and lints an HTML string.
    #[must_use]
    pub fn lint(&self, html: &str) -> Messages {
        self.lint_document(&Document::parse(html))
    }

    /// Lints a parsed document.
    ///
    /// Each plugin gets a fresh [`Context`]. A failed assertion is recorded
    /// under its rule id (first message wins); any other plugin error is
    /// logged and only abandons that plugin.
    #[must_use]
    pub fn lint_document(&self, document: &Document) -> Messages {
        let mut messages = Messages::new();

        for plugin in &self.plugins {
            let ctx = Context::new(&self.rules, self.policy).with_host(&self.host);
            let result = plugin.check(&ctx, document);

            for (rule_id, message) in ctx.into_failures() {
                messages.entry(rule_id).or_insert(message);
            }

            match result {
                Ok(()) => {}
                Err(PluginError::Assertion(assertion)) => {
                    debug!("{}: {}", plugin.name(), assertion);
                    messages
                        .entry(assertion.rule_id.clone())
                        .or_insert_with(|| assertion.into());
                }
                Err(e) => warn!("Plugin `{}` failed: {}", plugin.name(), e),
            }
        }

        messages
    }
}

impl std::fmt::Debug for Linter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plugins: Vec<&str> = self.plugins.iter().map(|p| p.name()).collect();
        f.debug_struct("Linter")
            .field("plugins", &plugins)
            .field("rules", &self.rules)
            .field("host", &self.host)
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Toggle;
    use crate::plugin::PluginFn;
    use crate::types::Severity;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn first_failure_stops_the_plugin() {
        let second_ran = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&second_ran);

        let config = Config::new().plugin(PluginFn::new("chained", move |ctx, _| {
            ctx.assert("chain.first", false, "first failed")?;
            ctx.assert_with(
                "chain.second",
                |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    false
                },
                "second failed",
            )
        }));

        let messages = Linter::new(&config).lint("<p></p>");

        assert_eq!(messages.len(), 1);
        assert_eq!(messages["chain.first"].message, "first failed");
        assert_eq!(second_ran.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn every_rule_policy_reports_all_failures() {
        let config = Config::new().plugin(PluginFn::new("chained", |ctx, _| {
            ctx.assert("chain.first", false, "first failed")?;
            ctx.assert("chain.second", false, "second failed")
        }));

        let messages = Linter::new(&config)
            .with_policy(FailurePolicy::EveryRule)
            .lint("<p></p>");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages["chain.second"].message, "second failed");
    }

    #[test]
    fn failure_in_one_plugin_does_not_stop_others() {
        let config = Config::new()
            .plugin(PluginFn::new("a", |ctx, _| ctx.report("a.rule", "from a")))
            .plugin(PluginFn::new("b", |ctx, _| ctx.report("b.rule", "from b")));

        let messages = Linter::new(&config).lint("");

        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn faults_are_logged_and_skipped() {
        let config = Config::new()
            .plugin(PluginFn::new("broken", |_, doc| {
                doc.query("a[")?;
                Ok(())
            }))
            .plugin(PluginFn::new("faulty", |_, _| {
                Err(PluginError::Fault("boom".to_string()))
            }))
            .plugin(PluginFn::new("after", |ctx, _| ctx.report("after.rule", "still ran")));

        let messages = Linter::new(&config).lint("");

        assert_eq!(messages.len(), 1);
        assert!(messages.contains_key("after.rule"));
    }

    #[test]
    fn rule_id_is_recorded_once_per_document() {
        let config = Config::new()
            .plugin(PluginFn::new("a", |ctx, _| ctx.report("shared", "from a")))
            .plugin(PluginFn::new("b", |ctx, _| ctx.report("shared", "from b")));

        let messages = Linter::new(&config).lint("");

        assert_eq!(messages.len(), 1);
        assert_eq!(messages["shared"].message, "from a");
    }

    #[test]
    fn severity_follows_rule_toggle() {
        let config = Config::new()
            .rule("warned", Toggle::Warn)
            .rule("muted", Toggle::Off)
            .plugin(PluginFn::new("a", |ctx, _| {
                ctx.report("muted", "never")?;
                ctx.report("warned", "soft")
            }));

        let messages = Linter::new(&config).lint("");

        assert_eq!(messages.len(), 1);
        assert_eq!(messages["warned"].level, Severity::Warning);
    }

    #[test]
    fn plugins_see_configured_host() {
        let config = Config::new()
            .with_host("https://example.com")
            .plugin(PluginFn::new("host", |ctx, _| {
                ctx.assert("host.known", ctx.hostname().is_none(), "example.com")
            }));

        let messages = Linter::new(&config).lint("");
        assert_eq!(messages["host.known"].message, "example.com");
    }

    #[test]
    fn lint_is_idempotent() {
        let config = Config::new().plugin(PluginFn::new("title", |ctx, doc| {
            let title = doc.first("title")?;
            ctx.assert("title.exists", title.is_some(), "A title tag must exist")
        }));
        let linter = Linter::new(&config);

        assert_eq!(linter.lint("<p>x</p>"), linter.lint("<p>x</p>"));
    }
}
