//! Site-wide link graph: duplicate metadata, orphan pages and broken links.

use crate::document::{Document, DocumentError};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

/// Schemes that never point at a page of the site.
const NON_PAGE_SCHEMES: &[&str] = &["mailto:", "javascript:", "tel:"];

/// Prefixes of links that carry their own origin.
const ABSOLUTE_PREFIXES: &[&str] = &["http://", "https://", "//"];

/// Accumulates per-page facts while a site is linted.
///
/// Pages are fed with [`LinkGraph::record`] in a deterministic order; the
/// first page to claim a title or description is the one reported as the
/// original of a duplicate pair.
#[derive(Debug, Default)]
pub struct LinkGraph {
    pages_seen: Vec<String>,
    seen_index: BTreeSet<String>,
    internal_links: Vec<(String, String)>,
    title_registry: HashMap<String, String>,
    description_registry: HashMap<String, String>,
    outbound_by_page: Vec<(String, Vec<String>)>,
    duplicate_titles: Vec<(String, String)>,
    duplicate_descriptions: Vec<(String, String)>,
}

impl LinkGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of pages recorded so far.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages_seen.len()
    }

    /// Records one linted page.
    ///
    /// Page ids are relative to their directory input, so two inputs can
    /// yield the same id; only the first page recorded under an id counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be queried.
    pub fn record(&mut self, page_id: &str, document: &Document) -> Result<(), DocumentError> {
        debug!("Recording page {page_id}");

        if !self.seen_index.insert(page_id.to_string()) {
            warn!("Page `{page_id}` was already recorded; keeping the first");
            return Ok(());
        }
        self.pages_seen.push(page_id.to_string());

        if let Some(title) = document.first("title")? {
            let text = title.inner_text.trim();
            if !text.is_empty() {
                claim(
                    &mut self.title_registry,
                    &mut self.duplicate_titles,
                    text,
                    page_id,
                );
            }
        }

        let description = document
            .query("meta[name]")?
            .into_iter()
            .find(|meta| meta.attr_or_empty("name").eq_ignore_ascii_case("description"));
        if let Some(content) = description.as_ref().and_then(|m| m.attr("content")) {
            if !content.is_empty() {
                claim(
                    &mut self.description_registry,
                    &mut self.duplicate_descriptions,
                    content,
                    page_id,
                );
            }
        }

        let mut outbound = Vec::new();
        for anchor in document.query("a[href]")? {
            let href = anchor.attr_or_empty("href");
            if href.is_empty() {
                continue;
            }
            if !outbound.iter().any(|seen: &String| seen == href) {
                outbound.push(href.to_string());
            }
            if let Some(target) = internal_target(href, page_id) {
                self.internal_links.push((target, page_id.to_string()));
            }
        }
        self.outbound_by_page.push((page_id.to_string(), outbound));

        Ok(())
    }

    /// Reconciles the graph into a [`SiteReport`].
    #[must_use]
    pub fn finish(self) -> SiteReport {
        let targets: BTreeSet<&str> = self
            .internal_links
            .iter()
            .map(|(target, _)| target.as_str())
            .collect();

        let orphan_pages = self
            .pages_seen
            .iter()
            .filter(|page| !targets.contains(page.as_str()))
            .cloned()
            .collect();

        let broken_internal_links = self
            .internal_links
            .iter()
            .filter(|(target, _)| !self.seen_index.contains(target))
            .map(|(target, linker)| BrokenLink {
                link: target.clone(),
                linker: linker.clone(),
            })
            .collect();

        let mut what_links_where: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (page, hrefs) in &self.outbound_by_page {
            for href in hrefs {
                let linkers = what_links_where.entry(href.clone()).or_default();
                if !linkers.contains(page) {
                    linkers.push(page.clone());
                }
            }
        }

        SiteReport {
            duplicate_titles: self.duplicate_titles,
            duplicate_descriptions: self.duplicate_descriptions,
            orphan_pages,
            broken_internal_links,
            what_links_where,
        }
    }
}

fn claim(
    registry: &mut HashMap<String, String>,
    duplicates: &mut Vec<(String, String)>,
    value: &str,
    page_id: &str,
) {
    match registry.get(value) {
        Some(first) => duplicates.push((first.clone(), page_id.to_string())),
        None => {
            registry.insert(value.to_string(), page_id.to_string());
        }
    }
}

/// Returns the fragment-free target of an internal link, or `None` when
/// `href` leaves the site, is not a page link, or points back at `page_id`.
fn internal_target(href: &str, page_id: &str) -> Option<String> {
    if href.starts_with('#') {
        return None;
    }
    let lower = href.to_ascii_lowercase();
    if ABSOLUTE_PREFIXES
        .iter()
        .chain(NON_PAGE_SCHEMES)
        .any(|prefix| lower.starts_with(prefix))
    {
        return None;
    }

    let target = href.split('#').next().unwrap_or(href);
    if target.is_empty() || target == page_id {
        return None;
    }
    if page_id != "/" && target.ends_with(page_id) {
        return None;
    }

    Some(target.to_string())
}

/// A link to a page that was never seen during the crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    /// Link target.
    pub link: String,
    /// Page holding the link.
    pub linker: String,
}

/// Site-wide findings; empty categories are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteReport {
    /// `(first, current)` pairs of pages sharing a title.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub duplicate_titles: Vec<(String, String)>,
    /// `(first, current)` pairs of pages sharing a meta description.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub duplicate_descriptions: Vec<(String, String)>,
    /// Pages no other page links to.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub orphan_pages: Vec<String>,
    /// Internal links to pages that were not found.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub broken_internal_links: Vec<BrokenLink>,
    /// Pages linking to each href.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub what_links_where: BTreeMap<String, Vec<String>>,
}

impl SiteReport {
    /// Returns true when no site-wide problem was found.
    ///
    /// The `what_links_where` index is informational and not counted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicate_titles.is_empty()
            && self.duplicate_descriptions.is_empty()
            && self.orphan_pages.is_empty()
            && self.broken_internal_links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, description: &str, links: &[&str]) -> Document {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a href="{href}">x</a>"#))
            .collect();
        Document::parse(&format!(
            r#"<html><head><title>{title}</title><meta name="description" content="{description}"></head><body>{anchors}</body></html>"#
        ))
    }

    fn crawl(pages: &[(&str, Document)]) -> SiteReport {
        let mut graph = LinkGraph::new();
        for (id, doc) in pages {
            graph.record(id, doc).unwrap();
        }
        graph.finish()
    }

    #[test]
    fn duplicate_titles_keep_first_claimant() {
        let report = crawl(&[
            ("/", page("Home", "one", &["/a/", "/b/"])),
            ("/a/", page("Same", "two", &["/"])),
            ("/b/", page(" Same ", "three", &["/"])),
        ]);

        assert_eq!(
            report.duplicate_titles,
            vec![("/a/".to_string(), "/b/".to_string())]
        );
        assert!(report.duplicate_descriptions.is_empty());
    }

    #[test]
    fn duplicate_descriptions_are_paired() {
        let report = crawl(&[
            ("/", page("Home", "shared", &["/a/"])),
            ("/a/", page("About", "shared", &["/"])),
        ]);

        assert_eq!(
            report.duplicate_descriptions,
            vec![("/".to_string(), "/a/".to_string())]
        );
    }

    #[test]
    fn empty_descriptions_are_not_registered() {
        let report = crawl(&[
            ("/", page("Home", "", &["/a/"])),
            ("/a/", page("About", "", &["/"])),
        ]);

        assert!(report.duplicate_descriptions.is_empty());
    }

    #[test]
    fn unlinked_page_is_orphan() {
        let report = crawl(&[
            ("/", page("Home", "h", &["/a/"])),
            ("/a/", page("About", "a", &["/"])),
            ("/lonely/", page("Lonely", "l", &["/"])),
        ]);

        assert_eq!(report.orphan_pages, vec!["/lonely/".to_string()]);
    }

    #[test]
    fn link_to_unseen_page_is_broken() {
        let report = crawl(&[
            ("/", page("Home", "h", &["/a/", "/missing/#top"])),
            ("/a/", page("About", "a", &["/"])),
        ]);

        assert_eq!(
            report.broken_internal_links,
            vec![BrokenLink {
                link: "/missing/".to_string(),
                linker: "/".to_string(),
            }]
        );
    }

    #[test]
    fn external_and_special_links_are_not_internal() {
        let report = crawl(&[(
            "/",
            page(
                "Home",
                "h",
                &["https://other.com/", "#top", "mailto:a@b.c", "javascript:void(0)", "tel:123"],
            ),
        )]);

        assert!(report.broken_internal_links.is_empty());
        assert_eq!(report.orphan_pages, vec!["/".to_string()]);
        assert_eq!(report.what_links_where.len(), 5);
    }

    #[test]
    fn paths_mentioning_http_are_internal() {
        let report = crawl(&[
            ("/", page("Home", "h", &["/http-guide/", "//cdn.example.com/app.js"])),
            ("/http-guide/", page("Guide", "g", &["/"])),
        ]);

        assert!(report.orphan_pages.is_empty());
        assert!(report.broken_internal_links.is_empty());
    }

    #[test]
    fn repeated_page_id_keeps_first_record() {
        let report = crawl(&[
            ("/", page("Home", "shared", &["/a/"])),
            ("/a/", page("About", "about", &["/"])),
            ("/", page("Home", "shared", &["/missing/"])),
        ]);

        assert!(report.duplicate_titles.is_empty());
        assert!(report.duplicate_descriptions.is_empty());
        assert!(report.broken_internal_links.is_empty());
        assert!(report.orphan_pages.is_empty());
    }

    #[test]
    fn self_references_are_ignored() {
        let report = crawl(&[
            ("/a/", page("About", "a", &["/a/", "../a/", "/b/"])),
            ("/b/", page("B", "b", &["/a/"])),
        ]);

        assert!(report.broken_internal_links.is_empty());
        assert!(report.orphan_pages.is_empty());
    }

    #[test]
    fn what_links_where_lists_linkers_in_order() {
        let report = crawl(&[
            ("/", page("Home", "h", &["/a/", "/a/"])),
            ("/b/", page("B", "b", &["/a/"])),
        ]);

        assert_eq!(
            report.what_links_where["/a/"],
            vec!["/".to_string(), "/b/".to_string()]
        );
    }

    #[test]
    fn serializes_camel_case_and_skips_empty() {
        let report = crawl(&[
            ("/", page("Home", "h", &["/gone/"])),
        ]);

        insta::assert_json_snapshot!(report, @r###"
        {
          "orphanPages": [
            "/"
          ],
          "brokenInternalLinks": [
            {
              "link": "/gone/",
              "linker": "/"
            }
          ],
          "whatLinksWhere": {
            "/gone/": [
              "/"
            ]
          }
        }
        "###);
        assert!(!report.is_clean());
        assert!(SiteReport::default().is_clean());
    }
}
