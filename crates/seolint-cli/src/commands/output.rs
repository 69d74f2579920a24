//! Shared output formatting for lint results.

use anyhow::Result;
use seolint::{Messages, Report, Severity, SiteReport};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(report: &Report, site: Option<&SiteReport>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report, site),
        OutputFormat::Json => return print_json(report, site),
        OutputFormat::Compact => {
            for line in compact_lines(report, site) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

/// Keeps only error-level messages.
pub fn errors_only(report: &Report) -> Report {
    let mut filtered = Report::new();
    for (input, messages) in report {
        let errors: Messages = messages
            .iter()
            .filter(|(_, m)| m.level == Severity::Error)
            .map(|(rule, m)| (rule.clone(), m.clone()))
            .collect();
        filtered.insert(input.clone(), errors);
    }
    filtered
}

fn severity_indicator(level: Severity) -> &'static str {
    match level {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
    }
}

fn print_text(report: &Report, site: Option<&SiteReport>) {
    let (errors, warnings) = report.count_by_severity();

    for (input, messages) in report {
        println!("\x1b[4m{input}\x1b[0m");
        for (rule, message) in messages {
            let position = match (message.line, message.col) {
                (Some(line), Some(col)) => format!("{line}:{col} "),
                _ => String::new(),
            };
            println!(
                "  {position}{} {}  \x1b[2m{rule}\x1b[0m",
                severity_indicator(message.level),
                message.message
            );
        }
        println!();
    }

    let problems = site.map_or(0, site_problems);
    if let Some(site) = site {
        print_site_text(site);
    }

    let summary_color = if errors > 0 || problems > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s) in {} document(s)\x1b[0m",
        summary_color,
        errors,
        warnings,
        report.len()
    );
    if site.is_some() {
        println!("{summary_color}Found {problems} site problem(s)\x1b[0m");
    }
}

fn print_site_text(site: &SiteReport) {
    let section = |title: &str, lines: Vec<String>| {
        if lines.is_empty() {
            return;
        }
        println!("\x1b[4m{title}\x1b[0m");
        for line in lines {
            println!("  {line}");
        }
        println!();
    };

    let pair = |(first, current): &(String, String)| format!("{current} (same as {first})");

    section(
        "Duplicate titles",
        site.duplicate_titles.iter().map(pair).collect(),
    );
    section(
        "Duplicate descriptions",
        site.duplicate_descriptions.iter().map(pair).collect(),
    );
    section("Orphan pages", site.orphan_pages.clone());
    section(
        "Broken internal links",
        site.broken_internal_links
            .iter()
            .map(|b| format!("{} (linked from {})", b.link, b.linker))
            .collect(),
    );
}

fn site_problems(site: &SiteReport) -> usize {
    site.duplicate_titles.len()
        + site.duplicate_descriptions.len()
        + site.orphan_pages.len()
        + site.broken_internal_links.len()
}

fn print_json(report: &Report, site: Option<&SiteReport>) -> Result<()> {
    let json = match site {
        Some(site) => serde_json::to_string_pretty(&serde_json::json!({
            "report": report,
            "site": site,
        }))?,
        None => serde_json::to_string_pretty(report)?,
    };
    println!("{json}");
    Ok(())
}

fn compact_lines(report: &Report, site: Option<&SiteReport>) -> Vec<String> {
    let mut lines = Vec::new();

    for (input, messages) in report {
        for (rule, message) in messages {
            let position = match (message.line, message.col) {
                (Some(line), Some(col)) => format!(":{line}:{col}"),
                _ => String::new(),
            };
            lines.push(format!(
                "{input}{position}: {} [{rule}] {}",
                message.level, message.message
            ));
        }
    }

    if let Some(site) = site {
        for (first, current) in &site.duplicate_titles {
            lines.push(format!(
                "{current}: error [site.duplicate-title] Same title as {first}"
            ));
        }
        for (first, current) in &site.duplicate_descriptions {
            lines.push(format!(
                "{current}: error [site.duplicate-description] Same description as {first}"
            ));
        }
        for page in &site.orphan_pages {
            lines.push(format!("{page}: error [site.orphan] No page links here"));
        }
        for broken in &site.broken_internal_links {
            lines.push(format!(
                "{}: error [site.broken-link] Links to missing page {}",
                broken.linker, broken.link
            ));
        }
    }

    lines
}
