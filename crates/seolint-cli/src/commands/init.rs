//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# seolint configuration

# Site origin; links to other hosts count as external
# host = "https://example.com"

# Files, directories or URLs to lint (all of one kind)
inputs = ["public"]

# Configs merged beneath this one, paths relative to this file
# presets = ["./base.toml"]

# Rule settings: false/"off", true/"error", "warn",
# or [severity, options]
[rules]
# "canonical.href.match" = false
# "title.content.length" = ["warn", { min = 20, max = 70 }]
# "link.external.limit" = ["error", 100]
"#;

const CONFIG_NAME: &str = "seolint.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_NAME), force)?;

    println!("Created {CONFIG_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to set your host, inputs and rules");
    println!("  2. Run: seolint check");
    println!("  3. Run: seolint check --site   (duplicates, orphans, broken links)");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}
