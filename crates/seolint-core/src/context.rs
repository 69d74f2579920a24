//! Per-plugin execution context and the assertion protocol.

use crate::config::{resolve_rule, RuleOptions, Rules};
use crate::plugin::{PluginError, PluginResult};
use crate::types::{Message, Messages, Severity};
use reqwest::Url;
use std::cell::RefCell;

/// How many failures a single plugin call may report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The first failing assertion stops the rest of the plugin call.
    #[default]
    FirstPerPlugin,
    /// Every failing rule of the plugin call is reported.
    EveryRule,
}

/// A failed rule, raised by [`Context::report`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{rule_id}] {message}")]
pub struct Assertion {
    /// Id of the failed rule.
    pub rule_id: String,
    /// Human-readable message.
    pub message: String,
    /// Severity of the rule.
    pub severity: Severity,
}

impl From<Assertion> for Message {
    fn from(assertion: Assertion) -> Self {
        Message::new(assertion.message, assertion.severity)
    }
}

/// Context handed to one plugin invocation for one document.
///
/// Carries the effective rule settings, the configured host and the
/// failure policy. Under [`FailurePolicy::EveryRule`] failures are buffered
/// here instead of unwinding the plugin.
#[derive(Debug)]
pub struct Context<'a> {
    rules: &'a Rules,
    host: &'a str,
    policy: FailurePolicy,
    failures: RefCell<Messages>,
}

impl<'a> Context<'a> {
    /// Creates a context over the effective rules.
    #[must_use]
    pub fn new(rules: &'a Rules, policy: FailurePolicy) -> Self {
        Self {
            rules,
            host: "",
            policy,
            failures: RefCell::new(Messages::new()),
        }
    }

    /// Binds the configured site origin.
    #[must_use]
    pub fn with_host(mut self, host: &'a str) -> Self {
        self.host = host;
        self
    }

    /// Configured site origin, `None` when unset.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        Some(self.host).filter(|h| !h.is_empty())
    }

    /// Lowercase hostname of the configured origin.
    #[must_use]
    pub fn hostname(&self) -> Option<String> {
        let url = Url::parse(self.host()?).ok()?;
        url.host_str().map(str::to_ascii_lowercase)
    }

    /// Resolves a rule, `None` when it is turned off.
    #[must_use]
    pub fn load(&self, rule_id: &str) -> Option<RuleOptions> {
        resolve_rule(self.rules, rule_id)
    }

    /// Reports `message` for `rule_id` unless `ok` holds.
    ///
    /// A disabled rule is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Assertion`] when the rule fails under
    /// [`FailurePolicy::FirstPerPlugin`].
    pub fn assert(&self, rule_id: &str, ok: bool, message: &str) -> PluginResult {
        self.assert_with(rule_id, |_| ok, message)
    }

    /// Like [`Context::assert`], with a predicate over the rule's options.
    ///
    /// The predicate is not evaluated when the rule is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Assertion`] when the rule fails under
    /// [`FailurePolicy::FirstPerPlugin`].
    pub fn assert_with<F>(&self, rule_id: &str, predicate: F, message: &str) -> PluginResult
    where
        F: FnOnce(&RuleOptions) -> bool,
    {
        let Some(options) = self.load(rule_id) else {
            return Ok(());
        };
        if predicate(&options) {
            return Ok(());
        }
        self.raise(rule_id, message, options.severity())
    }

    /// Reports a failure of `rule_id` unconditionally.
    ///
    /// Reporting a disabled rule is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Assertion`] under [`FailurePolicy::FirstPerPlugin`].
    pub fn report(&self, rule_id: &str, message: impl Into<String>) -> PluginResult {
        match self.load(rule_id) {
            Some(options) => self.raise(rule_id, message, options.severity()),
            None => Ok(()),
        }
    }

    fn raise(&self, rule_id: &str, message: impl Into<String>, severity: Severity) -> PluginResult {
        let assertion = Assertion {
            rule_id: rule_id.to_string(),
            message: message.into(),
            severity,
        };

        match self.policy {
            FailurePolicy::FirstPerPlugin => Err(PluginError::Assertion(assertion)),
            FailurePolicy::EveryRule => {
                self.failures
                    .borrow_mut()
                    .entry(assertion.rule_id.clone())
                    .or_insert_with(|| assertion.into());
                Ok(())
            }
        }
    }

    /// Consumes the context, returning failures buffered under
    /// [`FailurePolicy::EveryRule`].
    #[must_use]
    pub fn into_failures(self) -> Messages {
        self.failures.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Toggle;
    use std::cell::Cell;

    fn rules(entries: &[(&str, Toggle)]) -> Rules {
        entries
            .iter()
            .map(|(id, toggle)| ((*id).to_string(), (*toggle).into()))
            .collect()
    }

    #[test]
    fn load_defaults_to_enabled() {
        let rules = Rules::new();
        let ctx = Context::new(&rules, FailurePolicy::default());
        let options = ctx.load("title.exists").unwrap();
        assert_eq!(options.severity(), Severity::Error);
    }

    #[test]
    fn disabled_rule_skips_predicate() {
        let rules = rules(&[("title.exists", Toggle::Off)]);
        let ctx = Context::new(&rules, FailurePolicy::default());
        let calls = Cell::new(0);

        let result = ctx.assert_with(
            "title.exists",
            |_| {
                calls.set(calls.get() + 1);
                false
            },
            "never",
        );

        assert!(result.is_ok());
        assert_eq!(calls.get(), 0);
        assert!(ctx.assert("title.exists", false, "never").is_ok());
        assert!(ctx.report("title.exists", "never").is_ok());
    }

    #[test]
    fn failing_assert_raises_assertion() {
        let rules = rules(&[("title.single", Toggle::Warn)]);
        let ctx = Context::new(&rules, FailurePolicy::default());

        let err = ctx.assert("title.single", false, "Must have only one title tag").unwrap_err();
        match err {
            PluginError::Assertion(a) => {
                assert_eq!(a.rule_id, "title.single");
                assert_eq!(a.message, "Must have only one title tag");
                assert_eq!(a.severity, Severity::Warning);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn passing_assert_is_ok() {
        let rules = Rules::new();
        let ctx = Context::new(&rules, FailurePolicy::default());
        assert!(ctx.assert("title.exists", true, "unused").is_ok());
    }

    #[test]
    fn every_rule_policy_buffers_failures() {
        let rules = Rules::new();
        let ctx = Context::new(&rules, FailurePolicy::EveryRule);

        assert!(ctx.assert("a", false, "first a").is_ok());
        assert!(ctx.assert("a", false, "second a").is_ok());
        assert!(ctx.report("b", "only b").is_ok());

        let failures = ctx.into_failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures["a"].message, "first a");
        assert_eq!(failures["b"].message, "only b");
    }

    #[test]
    fn hostname_comes_from_host() {
        let rules = Rules::new();
        let ctx = Context::new(&rules, FailurePolicy::default());
        assert_eq!(ctx.host(), None);
        assert_eq!(ctx.hostname(), None);

        let ctx = ctx.with_host("https://Example.com:8080/base/");
        assert_eq!(ctx.host(), Some("https://Example.com:8080/base/"));
        assert_eq!(ctx.hostname().as_deref(), Some("example.com"));
    }

    #[test]
    fn predicate_receives_options() {
        let mut rules = Rules::new();
        rules.insert(
            "link.external.limit".to_string(),
            (Toggle::Error, serde_json::json!(2)).into(),
        );
        let ctx = Context::new(&rules, FailurePolicy::default());

        assert!(ctx
            .assert_with("link.external.limit", |o| 2 <= o.threshold("max", 50), "limit")
            .is_ok());
        assert!(ctx
            .assert_with("link.external.limit", |o| 3 <= o.threshold("max", 50), "limit")
            .is_err());
    }
}
