//! Fragment loading pipeline: fetch -> parse -> extract -> sanitize -> rewrite.
//!
//! Given a source document path, produce a [`LoadedFragment`]: the sanitized
//! primary content region plus the metadata the shell needs to splice it in.
//! Failure leaves the caller's mounted content untouched; the navigation
//! layer decides the fallback.

pub mod extract;
pub mod fetch;
pub mod rewrite;
pub mod sanitize;

pub use extract::ToolAssets;
pub use fetch::{DocumentFetcher, FsFetcher};

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::config::ToolsSection;
use crate::route::RouteTable;

/// Errors from one load operation.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch `{path}`")]
    Fetch {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("document `{0}` has no parsable markup")]
    Parse(String),

    #[error("no source document registered for route `{0}`")]
    RouteMiss(String),

    #[error("mount element `#{0}` not found in shell document")]
    MountMissing(String),
}

/// One document's sanitized content, ready for splicing.
#[derive(Debug, Clone)]
pub struct LoadedFragment {
    /// Root-relative source document path this fragment came from
    pub source: String,
    /// Document title, if the source declared one
    pub title: Option<String>,
    /// Meta description, if the source declared one
    pub description: Option<String>,
    /// Sanitized region markup
    pub html: String,
    /// Element ids present in the region (hash scroll targeting)
    pub ids: FxHashSet<String>,
    /// Captured assets when the source is tool-bearing
    pub tool: Option<ToolAssets>,
}

/// Fetch-and-sanitize pipeline over a [`DocumentFetcher`].
pub struct FragmentLoader<'a, F> {
    fetcher: &'a F,
    table: &'a RouteTable,
    tools: &'a ToolsSection,
}

impl<'a, F: DocumentFetcher> FragmentLoader<'a, F> {
    pub fn new(fetcher: &'a F, table: &'a RouteTable, tools: &'a ToolsSection) -> Self {
        Self { fetcher, table, tools }
    }

    /// Check whether a source path is tool-bearing.
    pub fn is_tool_page(&self, source: &str) -> bool {
        source
            .trim_start_matches('/')
            .starts_with(&format!("{}/", self.tools.folder))
            || source.contains(&format!("/{}/", self.tools.folder))
    }

    /// Load and sanitize one source document.
    pub fn load(&self, source: &str) -> Result<LoadedFragment, LoadError> {
        // Resolve against the site root regardless of the current address
        let source = if source.starts_with('/') || source.starts_with("http") {
            source.to_string()
        } else {
            format!("/{source}")
        };

        let raw = self.fetcher.fetch(&source).map_err(|e| LoadError::Fetch {
            path: source.clone(),
            source: e,
        })?;

        let dom = tl::parse(&raw, tl::ParserOptions::default())
            .map_err(|_| LoadError::Parse(source.clone()))?;
        let parser = dom.parser();
        let roots: Vec<_> = dom.children().iter().copied().collect();

        let is_tool = self.is_tool_page(&source);

        // Capture before sanitization strips the elements
        let tool = is_tool.then(|| extract::capture_tool_assets(parser, &roots, self.tools));

        let title = extract::title(parser, &roots);
        let description = extract::description(parser, &roots);

        let region = extract::select_region(parser, &roots)
            .ok_or_else(|| LoadError::Parse(source.clone()))?;

        let sanitizer = sanitize::Sanitizer::new(self.table, is_tool);
        let sanitized = match region {
            extract::Region::Container(handle) => sanitizer.serialize(parser, &[handle]),
            extract::Region::BodyChildren(handles) => sanitizer.serialize(parser, &handles),
        };

        Ok(LoadedFragment {
            source,
            title,
            description,
            html: sanitized.html,
            ids: sanitized.ids,
            tool,
        })
    }
}
