//! List rules command implementation.

use seolint::rules::{all_plugins, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available plugins:\n");
    println!("{:<12} Description", "Plugin");
    println!("{}", "-".repeat(80));

    for plugin in all_plugins() {
        println!("{:<12} {}", plugin.name(), plugin.description());
        for rule in plugin.rules() {
            println!("{:<12}   {rule}", "");
        }
    }

    println!("\nPresets:");
    for preset in Preset::ALL {
        println!("  {:<12} - {}", preset.name(), preset.summary());
    }

    println!("\nDisable or downgrade rules in seolint.toml, e.g.:");
    println!("  [rules]");
    println!("  \"canonical.href.match\" = false");
    println!("  \"image.alt.exists\" = \"warn\"");
}
