//! On-disk representation of a config file (DTO layer).
//!
//! These types exist solely for serde deserialization. They are converted
//! to [`Config`] by the loader, which also resolves preset files.

use super::{Config, Rules};
use serde::Deserialize;

/// Raw contents of a `seolint.toml` / `seolint.json` file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Expected site origin.
    #[serde(default)]
    pub host: Option<String>,

    /// Inputs to analyze, a single string or a list.
    #[serde(default)]
    pub inputs: Option<Inputs>,

    /// Presets, each a path (relative to this file) or an inline table.
    #[serde(default)]
    pub presets: Vec<PresetEntry>,

    /// Per-rule settings.
    #[serde(default)]
    pub rules: Rules,
}

/// One entry of a `presets` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PresetEntry {
    /// Path to another config file.
    Path(String),
    /// Inline partial config.
    Inline(Box<ConfigFile>),
}

/// `inputs` accepts a single string as shorthand for a one-element list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Inputs {
    /// `inputs = "public"`
    One(String),
    /// `inputs = ["public", "docs"]`
    Many(Vec<String>),
}

impl From<Inputs> for Vec<String> {
    fn from(inputs: Inputs) -> Self {
        match inputs {
            Inputs::One(input) => vec![input],
            Inputs::Many(inputs) => inputs,
        }
    }
}

impl ConfigFile {
    /// Converts the file-level fields, leaving presets to the caller.
    pub(crate) fn into_parts(self) -> (Config, Vec<PresetEntry>) {
        let config = Config {
            host: self.host,
            inputs: self.inputs.map(Into::into),
            presets: Vec::new(),
            plugins: Vec::new(),
            rules: self.rules,
        };
        (config, self.presets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RuleSetting, Toggle};

    #[test]
    fn parses_full_toml() {
        let toml = r#"
host = "https://example.com"
inputs = ["public"]
presets = ["./base.toml", { rules = { "image.alt.exists" = "warn" } }]

[rules]
"canonical.href.match" = false
"title.content.length" = ["warn", { min = 20, max = 70 }]
"link.external.limit" = [2, 100]
"#;
        let file: ConfigFile = toml::from_str(toml).unwrap();

        assert_eq!(file.host.as_deref(), Some("https://example.com"));
        assert_eq!(file.presets.len(), 2);
        assert!(matches!(&file.presets[0], PresetEntry::Path(p) if p == "./base.toml"));
        assert!(matches!(&file.presets[1], PresetEntry::Inline(inline) if inline.rules.len() == 1));
        assert_eq!(
            file.rules["canonical.href.match"],
            RuleSetting::Toggle(Toggle::Off)
        );

        let length = file.rules["title.content.length"].options().unwrap();
        assert_eq!(length.get_int("min", 10), 20);

        let limit = file.rules["link.external.limit"].options().unwrap();
        assert_eq!(limit.threshold("max", 50), 100);
    }

    #[test]
    fn single_input_string_is_accepted() {
        let file: ConfigFile = toml::from_str(r#"inputs = "public""#).unwrap();
        let (config, _) = file.into_parts();
        assert_eq!(config.inputs(), ["public"]);
    }

    #[test]
    fn empty_file_has_no_overrides() {
        let file: ConfigFile = toml::from_str("").unwrap();
        let (config, presets) = file.into_parts();
        assert!(config.host.is_none());
        assert!(config.inputs.is_none());
        assert!(config.rules.is_empty());
        assert!(presets.is_empty());
    }
}
