//! Config file discovery and loading.

use super::dto::{ConfigFile, PresetEntry};
use super::{Config, ConfigError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file names to search for, in priority order.
pub const CONFIG_CANDIDATES: &[&str] = &["seolint.toml", "seolint.json", ".seolint.toml"];

/// Preset files may include other preset files up to this depth.
const MAX_PRESET_DEPTH: usize = 16;

/// Parses the contents of one on-disk config format.
pub trait ConfigLoader: Send + Sync {
    /// Short name of the format (e.g. `"toml"`).
    fn format(&self) -> &'static str;

    /// Parses file contents into the DTO form.
    ///
    /// # Errors
    ///
    /// Returns the parser's message when the content is malformed.
    fn parse(&self, content: &str) -> Result<ConfigFile, String>;
}

/// Loader for `.toml` config files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlLoader;

impl ConfigLoader for TomlLoader {
    fn format(&self) -> &'static str {
        "toml"
    }

    fn parse(&self, content: &str) -> Result<ConfigFile, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}

/// Loader for `.json` config files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLoader;

impl ConfigLoader for JsonLoader {
    fn format(&self) -> &'static str {
        "json"
    }

    fn parse(&self, content: &str) -> Result<ConfigFile, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }
}

/// Picks the loader for a path based on its extension.
#[must_use]
pub fn loader_for(path: &Path) -> Option<&'static dyn ConfigLoader> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Some(&TomlLoader),
        Some("json") => Some(&JsonLoader),
        _ => None,
    }
}

/// Walks upward from `start` looking for a config file.
///
/// Each directory is checked against [`CONFIG_CANDIDATES`] in order. The
/// walk never leaves `root`; `start` is resolved relative to `root`.
#[must_use]
pub fn find(root: &Path, start: &Path) -> Option<PathBuf> {
    let mut dir = root.join(start);

    loop {
        for name in CONFIG_CANDIDATES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!("Found config file: {}", candidate.display());
                return Some(candidate);
            }
        }

        match dir.parent() {
            Some(parent) if parent.starts_with(root) => dir = parent.to_path_buf(),
            _ => return None,
        }
    }
}

/// Loads the config found in `root`, merged onto the defaults.
///
/// Returns the default (empty) config when no file exists.
///
/// # Errors
///
/// Returns an error if the file (or one of its presets) cannot be read or parsed.
pub fn load(root: &Path) -> Result<Config, ConfigError> {
    let base = Config::default();
    match find(root, Path::new(".")) {
        Some(path) => Ok(base.merge(&load_file(&path)?)),
        None => Ok(base),
    }
}

/// Loads a single config file, resolving its presets.
///
/// Preset paths are relative to the file that declares them.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unknown extension,
/// fails to parse, or nests presets too deeply.
pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
    load_nested(path, 0)
}

fn load_nested(path: &Path, depth: usize) -> Result<Config, ConfigError> {
    let loader = loader_for(path).ok_or_else(|| ConfigError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!("Loading {} config: {}", loader.format(), path.display());

    let file = loader.parse(&content).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    convert(file, path, dir, depth)
}

fn convert(file: ConfigFile, path: &Path, dir: &Path, depth: usize) -> Result<Config, ConfigError> {
    if depth > MAX_PRESET_DEPTH {
        return Err(ConfigError::PresetDepth {
            path: path.to_path_buf(),
        });
    }

    let (mut config, presets) = file.into_parts();

    for entry in presets {
        let preset = match entry {
            PresetEntry::Path(relative) => load_nested(&dir.join(relative), depth + 1)?,
            PresetEntry::Inline(inline) => convert(*inline, path, dir, depth + 1)?,
        };
        config.presets.push(preset);
    }

    Ok(config)
}
