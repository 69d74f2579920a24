//! Integration test: config file → runner → link graph on a fixture site.
//!
//! Uses fixture files under `tests/fixtures/site/` to verify that a loaded
//! config drives input resolution, rule severities and the site report.

use seolint_core::{config, BrokenLink, Config, PluginFn, Runner, Severity};
use std::path::PathBuf;

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/site")
}

fn effective_config() -> Config {
    let loaded = config::load(&fixture_root()).expect("fixture config should load");
    Config::new()
        .plugin(PluginFn::new("title", |ctx, doc| {
            let title = doc.first("title")?;
            ctx.assert("title.exists", title.is_some(), "A title tag must exist")
        }))
        .merge(&loaded)
}

fn runner() -> Runner {
    Runner::builder()
        .config(effective_config())
        .cwd(fixture_root())
        .build()
        .expect("runner should build")
}

#[test]
fn config_file_supplies_inputs_and_rules() {
    let config = effective_config();

    assert_eq!(config.inputs(), ["public"]);
    assert_eq!(
        config.rule_options("title.exists").map(|o| o.severity()),
        Some(Severity::Warning)
    );
}

#[tokio::test]
async fn reports_documents_by_relative_path() {
    let report = runner().run().await.expect("run should succeed");

    assert_eq!(report.len(), 1, "only the untitled page has messages");
    let messages = report
        .get("public/blog/first.html")
        .expect("untitled page should be reported");
    assert_eq!(messages["title.exists"].level, Severity::Warning);
}

#[tokio::test]
async fn crawl_reconciles_the_site() {
    let (_, site) = runner().crawl().await.expect("crawl should succeed");

    assert_eq!(
        site.duplicate_titles,
        vec![("/blog/".to_string(), "/draft.html".to_string())]
    );
    assert_eq!(
        site.duplicate_descriptions,
        vec![("/blog/".to_string(), "/".to_string())]
    );
    assert_eq!(site.orphan_pages, vec!["/draft.html".to_string()]);
    assert_eq!(
        site.broken_internal_links,
        vec![BrokenLink {
            link: "/missing/".to_string(),
            linker: "/".to_string(),
        }]
    );
    assert_eq!(
        site.what_links_where["/blog/"],
        vec!["/blog/first.html".to_string(), "/".to_string()]
    );
}

#[tokio::test]
async fn crawl_is_deterministic() {
    let runner = runner();
    let (first_report, first_site) = runner.crawl().await.expect("crawl should succeed");
    let (second_report, second_site) = runner.crawl().await.expect("crawl should succeed");

    assert_eq!(first_report, second_report);
    assert_eq!(first_site, second_site);
}
