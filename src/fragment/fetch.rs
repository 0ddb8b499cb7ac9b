//! Source document fetching.
//!
//! The loader is generic over a [`DocumentFetcher`] so tests can serve
//! documents from memory and a future transport can swap in without touching
//! the pipeline. Paths are always resolved against the site root, never the
//! current address.

use std::io;
use std::path::PathBuf;

/// Fetches whole source documents by repository-relative path.
pub trait DocumentFetcher {
    /// Fetch the document at `path` (with or without a leading `/`).
    fn fetch(&self, path: &str) -> io::Result<String>;
}

/// Filesystem-backed fetcher rooted at the site directory.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a document path against the site root.
    fn local_path(&self, path: &str) -> io::Result<PathBuf> {
        let clean = path.trim_start_matches('/');
        if clean.split('/').any(|seg| seg == "..") {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path escapes site root: {path}"),
            ));
        }
        Ok(self.root.join(clean))
    }
}

impl DocumentFetcher for FsFetcher {
    fn fetch(&self, path: &str) -> io::Result<String> {
        std::fs::read_to_string(self.local_path(path)?)
    }
}
