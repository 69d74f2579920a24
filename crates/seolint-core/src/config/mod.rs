//! Configuration types and merge semantics for seolint.
//!
//! A [`Config`] is assembled from several layers: the defaults, any presets,
//! the project config file and finally explicit overrides. Every layer is
//! folded in with [`Config::merge`]:
//!
//! - `host` and `inputs` are replaced wholesale, and only when present
//! - `presets` are merged recursively, in order, before the layer's own
//!   `plugins` and `rules`, so the layer itself always wins
//! - `plugins` are concatenated, never deduplicated
//! - `rules` are replaced key by key (options are not deep-merged)

mod dto;
mod loader;

pub use dto::{ConfigFile, Inputs, PresetEntry};
pub use loader::{find, load, load_file, loader_for, ConfigLoader, JsonLoader, TomlLoader, CONFIG_CANDIDATES};

use crate::plugin::{Plugin, PluginRef};
use crate::types::Severity;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Rule settings keyed by rule id (e.g. `"title.content.length"`).
pub type Rules = BTreeMap<String, RuleSetting>;

/// Top-level configuration for seolint.
#[derive(Clone, Default)]
pub struct Config {
    /// Expected site origin, e.g. `https://example.com`.
    pub host: Option<String>,
    /// Files, directories or URLs to analyze.
    pub inputs: Option<Vec<String>>,
    /// Partial configs merged in before this config's own plugins and rules.
    pub presets: Vec<Config>,
    /// Check plugins, in evaluation order.
    pub plugins: Vec<PluginRef>,
    /// Per-rule settings.
    pub rules: Rules,
}

impl Config {
    /// Creates a new empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the expected site origin.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the inputs to analyze.
    #[must_use]
    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = Some(inputs.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a preset.
    #[must_use]
    pub fn preset(mut self, preset: Config) -> Self {
        self.presets.push(preset);
        self
    }

    /// Adds a plugin.
    #[must_use]
    pub fn plugin<P: Plugin + 'static>(mut self, plugin: P) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    /// Adds a shared plugin.
    #[must_use]
    pub fn plugin_ref(mut self, plugin: PluginRef) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Sets a rule.
    #[must_use]
    pub fn rule(mut self, rule_id: impl Into<String>, setting: impl Into<RuleSetting>) -> Self {
        self.rules.insert(rule_id.into(), setting.into());
        self
    }

    /// Returns the configured host, or `""` when unset.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or_default()
    }

    /// Returns the configured inputs, or an empty slice when unset.
    #[must_use]
    pub fn inputs(&self) -> &[String] {
        self.inputs.as_deref().unwrap_or_default()
    }

    /// Merges `custom` onto this config and returns the result.
    ///
    /// See the module docs for the precedence rules.
    #[must_use]
    pub fn merge(mut self, custom: &Config) -> Self {
        self.merge_into(custom);
        self
    }

    /// In-place form of [`Config::merge`].
    pub fn merge_into(&mut self, custom: &Config) {
        for preset in &custom.presets {
            self.merge_into(preset);
        }

        if let Some(host) = custom.host.as_ref().filter(|h| !h.is_empty()) {
            self.host = Some(host.clone());
        }
        if let Some(inputs) = &custom.inputs {
            self.inputs = Some(inputs.clone());
        }

        self.plugins.extend(custom.plugins.iter().cloned());
        self.rules
            .extend(custom.rules.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Resolves a rule to its effective options.
    ///
    /// Unlisted rules are enabled at [`Severity::Error`] with empty options.
    /// Returns `None` when the rule is turned off.
    #[must_use]
    pub fn rule_options(&self, rule_id: &str) -> Option<RuleOptions> {
        resolve_rule(&self.rules, rule_id)
    }

    /// Checks the `host` value, if any, carries an `http(s)://` protocol.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHost`] for a host without protocol.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let host = self.host();
        if host.is_empty() || host.starts_with("http://") || host.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidHost {
                host: host.to_string(),
            })
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plugins: Vec<&str> = self.plugins.iter().map(|p| p.name()).collect();
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("inputs", &self.inputs)
            .field("presets", &self.presets)
            .field("plugins", &plugins)
            .field("rules", &self.rules)
            .finish()
    }
}

pub(crate) fn resolve_rule(rules: &Rules, rule_id: &str) -> Option<RuleOptions> {
    match rules.get(rule_id) {
        None => Some(RuleOptions::new(Severity::Error, empty_options())),
        Some(setting) => setting.options(),
    }
}

fn empty_options() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Enabled state of a rule.
///
/// Accepts `"off"`, `"warn"`, `"error"`, `0`, `1`, `2`, `false` and `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ToggleRepr", into = "String")]
pub enum Toggle {
    /// Rule is disabled.
    Off,
    /// Rule reports warnings.
    Warn,
    /// Rule reports errors.
    Error,
}

impl Toggle {
    /// Returns the severity for an enabled toggle.
    #[must_use]
    pub fn severity(self) -> Option<Severity> {
        match self {
            Self::Off => None,
            Self::Warn => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
        }
    }
}

impl From<Toggle> for String {
    fn from(toggle: Toggle) -> Self {
        match toggle {
            Toggle::Off => "off",
            Toggle::Warn => "warn",
            Toggle::Error => "error",
        }
        .to_string()
    }
}

impl From<bool> for Toggle {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Error
        } else {
            Self::Off
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ToggleRepr {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl TryFrom<ToggleRepr> for Toggle {
    type Error = String;

    fn try_from(repr: ToggleRepr) -> Result<Self, String> {
        match repr {
            ToggleRepr::Bool(b) => Ok(Self::from(b)),
            ToggleRepr::Int(0) => Ok(Self::Off),
            ToggleRepr::Int(1) => Ok(Self::Warn),
            ToggleRepr::Int(2) => Ok(Self::Error),
            ToggleRepr::Int(n) => Err(format!("unknown rule level `{n}`, expected: 0, 1, 2")),
            ToggleRepr::Str(s) => match s.as_str() {
                "off" => Ok(Self::Off),
                "warn" => Ok(Self::Warn),
                "error" => Ok(Self::Error),
                other => Err(format!(
                    "unknown rule level `{other}`, expected: off, warn, error"
                )),
            },
        }
    }
}

/// Setting for a single rule: a toggle, optionally paired with options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    /// Plain toggle, e.g. `"warn"` or `false`.
    Toggle(Toggle),
    /// Toggle with rule options, e.g. `["error", { min = 20 }]`.
    WithOptions(Toggle, Value),
}

impl RuleSetting {
    /// Resolves the setting to effective options, `None` when disabled.
    #[must_use]
    pub fn options(&self) -> Option<RuleOptions> {
        match self {
            Self::Toggle(toggle) => toggle
                .severity()
                .map(|severity| RuleOptions::new(severity, empty_options())),
            Self::WithOptions(toggle, value) => toggle
                .severity()
                .map(|severity| RuleOptions::new(severity, value.clone())),
        }
    }
}

impl From<Toggle> for RuleSetting {
    fn from(toggle: Toggle) -> Self {
        Self::Toggle(toggle)
    }
}

impl From<bool> for RuleSetting {
    fn from(enabled: bool) -> Self {
        Self::Toggle(Toggle::from(enabled))
    }
}

impl From<(Toggle, Value)> for RuleSetting {
    fn from((toggle, value): (Toggle, Value)) -> Self {
        Self::WithOptions(toggle, value)
    }
}

/// Effective options of an enabled rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOptions {
    severity: Severity,
    value: Value,
}

impl RuleOptions {
    /// Creates rule options.
    #[must_use]
    pub fn new(severity: Severity, value: Value) -> Self {
        Self { severity, value }
    }

    /// Severity assigned to the rule.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Raw options value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Gets an integer option with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.value
            .get(key)
            .and_then(Value::as_i64)
            .unwrap_or(default)
    }

    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.value
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets a string option.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(Value::as_str)
    }

    /// Gets a threshold given either as a bare number or as `{ key = n }`.
    #[must_use]
    pub fn threshold(&self, key: &str, default: i64) -> i64 {
        self.value
            .as_i64()
            .unwrap_or_else(|| self.get_int(key, default))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(seolint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config {path}: {message}")]
    #[diagnostic(code(seolint::config::parse))]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// No loader handles the file extension.
    #[error("Unsupported config format: {path}")]
    #[diagnostic(
        code(seolint::config::format),
        help("config files must end in `.toml` or `.json`")
    )]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },

    /// Host without protocol.
    #[error("A `host` value must include \"http://\" or \"https://\" protocol")]
    #[diagnostic(
        code(seolint::config::host),
        help("received `{host}`, try `https://{host}`")
    )]
    InvalidHost {
        /// The rejected host value.
        host: String,
    },

    /// Preset files include each other too deeply (most likely a cycle).
    #[error("Preset nesting too deep at {path}")]
    #[diagnostic(
        code(seolint::config::preset_depth),
        help("check the `presets` entries for a cycle")
    )]
    PresetDepth {
        /// Preset file that exceeded the limit.
        path: PathBuf,
    },
}
