//! Input resolution and dispatch across files, directories and URLs.

use crate::config::Config;
use crate::context::FailurePolicy;
use crate::document::Document;
use crate::linter::Linter;
use crate::site::{LinkGraph, SiteReport};
use crate::types::Report;

use miette::Diagnostic;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Fixed timeout for URL inputs.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// Errors that abort a whole run.
#[derive(Debug, Error, Diagnostic)]
pub enum RunError {
    /// No inputs were configured.
    #[error("Missing input(s) to analyze")]
    #[diagnostic(
        code(seolint::run::missing_inputs),
        help("pass files, directories or URLs, or set `inputs` in the config file")
    )]
    MissingInputs,

    /// Paths and URLs were mixed.
    #[error("Input array cannot contain both file-system and URL targets")]
    #[diagnostic(code(seolint::run::mixed_inputs))]
    MixedInputs,

    /// IO error resolving the working directory.
    #[error("IO error: {0}")]
    #[diagnostic(code(seolint::run::io))]
    Io(#[from] std::io::Error),

    /// The HTTP client could not be created.
    #[error("Failed to create HTTP client: {0}")]
    #[diagnostic(code(seolint::run::client))]
    Client(#[from] reqwest::Error),

    /// An input task panicked or was cancelled.
    #[error("Input task failed: {0}")]
    #[diagnostic(code(seolint::run::join))]
    Join(#[from] tokio::task::JoinError),
}

/// Errors fetching a URL input.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("Unexpected status {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },

    /// The response is not an HTML document.
    #[error("Invalid \"Content-Type\" header: `{content_type}`")]
    ContentType {
        /// Received content type (empty when missing).
        content_type: String,
    },
}

/// Errors resolving a single input. These are logged and the input dropped.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file or directory could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The URL could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The directory walk did not complete.
    #[error("Directory walk failed: {0}")]
    Walk(#[from] tokio::task::JoinError),
}

/// Kind of a configured input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A file or directory.
    Path,
    /// An `http(s)://` URL.
    Url,
}

impl InputKind {
    /// Classifies a raw input.
    #[must_use]
    pub fn of(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            Self::Url
        } else {
            Self::Path
        }
    }
}

/// Classifies every input, rejecting an empty or mixed list.
///
/// # Errors
///
/// Returns [`RunError::MissingInputs`] or [`RunError::MixedInputs`].
pub fn classify_inputs(inputs: &[String]) -> Result<InputKind, RunError> {
    let mut kinds = inputs.iter().map(|input| InputKind::of(input));
    let first = kinds.next().ok_or(RunError::MissingInputs)?;
    if kinds.any(|kind| kind != first) {
        return Err(RunError::MixedInputs);
    }
    Ok(first)
}

/// One resolved HTML document awaiting evaluation.
#[derive(Debug, Clone)]
struct Page {
    /// Report key: path relative to the working directory, or the raw URL.
    key: String,
    /// Site-relative id used by the link graph.
    page_id: String,
    html: String,
}

/// Builder for configuring a [`Runner`].
#[derive(Debug, Default)]
pub struct RunnerBuilder {
    config: Option<Config>,
    cwd: Option<PathBuf>,
    policy: FailurePolicy,
    client: Option<Client>,
}

impl RunnerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the effective configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the directory relative paths are resolved against.
    #[must_use]
    pub fn cwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.cwd = Some(path.into());
        self
    }

    /// Sets the failure policy used by every plugin call.
    #[must_use]
    pub fn policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Uses a preconfigured HTTP client for URL inputs.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the runner.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be resolved or the
    /// HTTP client cannot be created.
    pub fn build(self) -> Result<Runner, RunError> {
        let cwd = self.cwd.unwrap_or_else(|| PathBuf::from("."));
        let cwd = if cwd.is_absolute() {
            cwd
        } else {
            std::env::current_dir()?.join(&cwd)
        };

        let client = match self.client {
            Some(client) => client,
            None => Client::builder().timeout(REQUEST_TIMEOUT).build()?,
        };

        let config = self.config.unwrap_or_default();

        Ok(Runner {
            cwd,
            inputs: config.inputs().to_vec(),
            linter: Linter::new(&config).with_policy(self.policy),
            client,
        })
    }
}

/// Resolves the configured inputs and lints every document found.
///
/// Use [`Runner::builder()`] to construct an instance.
#[derive(Debug)]
pub struct Runner {
    cwd: PathBuf,
    inputs: Vec<String>,
    linter: Linter,
    client: Client,
}

impl Runner {
    /// Creates a new builder for configuring a runner.
    #[must_use]
    pub fn builder() -> RunnerBuilder {
        RunnerBuilder::new()
    }

    /// Returns the working directory.
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Lints every input and returns the per-document report.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing or mixed input list.
    pub async fn run(&self) -> Result<Report, RunError> {
        let pages = self.resolve().await?;
        let (report, _) = self.evaluate(pages, None);
        Ok(report)
    }

    /// Lints every input and also analyzes the site's link graph.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing or mixed input list.
    pub async fn crawl(&self) -> Result<(Report, SiteReport), RunError> {
        let pages = self.resolve().await?;
        let (report, graph) = self.evaluate(pages, Some(LinkGraph::new()));
        Ok((report, graph.unwrap_or_default().finish()))
    }

    /// Fetches or reads every input concurrently and returns the pages in
    /// input order.
    async fn resolve(&self) -> Result<Vec<Page>, RunError> {
        let kind = classify_inputs(&self.inputs)?;
        info!("Resolving {} input(s)", self.inputs.len());

        let mut tasks = JoinSet::new();
        for (index, input) in self.inputs.iter().enumerate() {
            let input = input.clone();
            let cwd = self.cwd.clone();
            let client = self.client.clone();
            tasks.spawn(async move {
                let result = match kind {
                    InputKind::Path => resolve_path(&input, &cwd).await,
                    InputKind::Url => resolve_url(&input, &client).await,
                };
                (index, input, result)
            });
        }

        let mut resolved = Vec::with_capacity(self.inputs.len());
        while let Some(joined) = tasks.join_next().await {
            let (index, input, result) = joined?;
            match result {
                Ok(pages) => resolved.push((index, pages)),
                Err(e) => warn!("Skipping {}: {}", input, e),
            }
        }

        resolved.sort_by_key(|(index, _)| *index);
        Ok(resolved.into_iter().flat_map(|(_, pages)| pages).collect())
    }

    fn evaluate(&self, pages: Vec<Page>, mut graph: Option<LinkGraph>) -> (Report, Option<LinkGraph>) {
        let mut report = Report::new();
        let total = pages.len();

        for page in pages {
            debug!("Linting {}", page.key);
            let document = Document::parse(&page.html);
            let messages = self.linter.lint_document(&document);

            if let Some(graph) = graph.as_mut() {
                if let Err(e) = graph.record(&page.page_id, &document) {
                    warn!("Failed to record {} in link graph: {}", page.key, e);
                }
            }

            report.insert(page.key, messages);
        }

        info!(
            "Linted {} document(s), {} with messages",
            total,
            report.len()
        );
        (report, graph)
    }
}

async fn resolve_path(input: &str, cwd: &Path) -> Result<Vec<Page>, InputError> {
    let path = cwd.join(input);
    let metadata = tokio::fs::metadata(&path).await.map_err(|e| InputError::Io {
        path: path.clone(),
        source: e,
    })?;

    if !metadata.is_dir() {
        let root = path.parent().unwrap_or(cwd);
        let html = read(&path).await?;
        return Ok(vec![Page {
            key: relative_key(cwd, &path),
            page_id: page_id(root, &path),
            html,
        }]);
    }

    let dir = path.clone();
    let files = tokio::task::spawn_blocking(move || collect_html_files(&dir)).await?;
    debug!("Found {} HTML file(s) in {}", files.len(), path.display());

    let mut pages = Vec::with_capacity(files.len());
    for file in files {
        match read(&file).await {
            Ok(html) => pages.push(Page {
                key: relative_key(cwd, &file),
                page_id: page_id(&path, &file),
                html,
            }),
            Err(e) => warn!("Skipping {}", e),
        }
    }
    Ok(pages)
}

async fn read(path: &Path) -> Result<String, InputError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| InputError::Io {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Recursively collects `.html`/`.htm` files, sorted by file name.
fn collect_html_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && SKIPPED_DIRS
                    .iter()
                    .any(|skipped| entry.file_name() == *skipped))
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_html(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
}

async fn resolve_url(url: &str, client: &Client) -> Result<Vec<Page>, InputError> {
    let html = fetch(client, url).await?;
    let page_id = Url::parse(url)
        .map(|parsed| parsed.path().to_string())
        .unwrap_or_else(|_| "/".to_string());

    Ok(vec![Page {
        key: url.to_string(),
        page_id,
        html,
    }])
}

/// Fetches a URL, accepting only successful `text/html` responses.
///
/// # Errors
///
/// Returns a [`FetchError`] for transport failures, non-success statuses and
/// non-HTML content types.
pub async fn fetch(client: &Client, url: &str) -> Result<String, FetchError> {
    debug!("Fetching {url}");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !content_type.contains("text/html") {
        return Err(FetchError::ContentType { content_type });
    }

    Ok(response.text().await?)
}

/// Report key for a file: its path relative to `cwd`, with `/` separators.
fn relative_key(cwd: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(cwd).unwrap_or(file);
    join_components(relative)
}

/// Site-relative page id: `/` + the path under `root`, minus a trailing
/// `index.html`.
fn page_id(root: &Path, file: &Path) -> String {
    let relative = match file.strip_prefix(root) {
        Ok(relative) => join_components(relative),
        Err(_) => file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let id = format!("/{relative}");
    match id.strip_suffix("index.html") {
        Some(dir) => dir.to_string(),
        None => id,
    }
}

fn join_components(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
