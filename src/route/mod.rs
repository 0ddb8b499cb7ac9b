//! Route table and canonical route keys.
//!
//! A route key is a canonical absolute path string (`/blogs/slug`): always a
//! leading `/`, never a trailing `/` except for the root itself. The route
//! table maps keys to repository-relative source documents and is immutable
//! after construction.

mod resolve;

pub use resolve::{is_external, resolve, split_hash};

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// RouteKey
// ============================================================================

/// Canonical route key.
///
/// Invariants:
/// - Always starts with `/`
/// - No trailing slash except the root (`/` stays `/`)
/// - No query string or hash fragment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey(Arc<str>);

impl RouteKey {
    /// Create from an already route-shaped string, normalizing slashes.
    pub fn new(path: &str) -> Self {
        let trimmed = path.trim();
        if trimmed.is_empty() || trimmed == "/" {
            return Self(Arc::from("/"));
        }

        let with_leading = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };

        let normalized = with_leading.trim_end_matches('/');
        if normalized.is_empty() {
            Self(Arc::from("/"))
        } else {
            Self(Arc::from(normalized))
        }
    }

    /// Create from a browser address (decode percent-encoding, strip query
    /// string and fragment).
    pub fn from_browser(encoded: &str) -> Self {
        use percent_encoding::percent_decode_str;

        let path = strip_query_fragment(encoded);
        let decoded = percent_decode_str(&path)
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or(path);
        Self::new(&decoded)
    }

    /// Get the route key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the root route.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.as_ref() == "/"
    }
}

/// Strip query string and fragment from a path using the url crate.
fn strip_query_fragment(path: &str) -> String {
    static BASE: std::sync::OnceLock<url::Url> = std::sync::OnceLock::new();
    let base = BASE.get_or_init(|| url::Url::parse("http://x").expect("static base url"));

    match base.join(path) {
        Ok(parsed) => parsed.path().to_string(),
        // Fallback to simple split if url parsing fails
        Err(_) => path.split(['?', '#']).next().unwrap_or(path).to_string(),
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RouteKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RouteKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for RouteKey {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for RouteKey {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for RouteKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

// ============================================================================
// Sections
// ============================================================================

/// A content section: a source folder mapped to a route prefix.
///
/// `blog/<slug>.html` lives under folder `blog` and is served under the
/// `/blogs` section; the bare folder name maps to the section listing route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Source folder name (no slashes), e.g. `blog`
    pub folder: String,
    /// Route section prefix, e.g. `/blogs`
    pub route: String,
}

impl Section {
    pub fn new(folder: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            route: route.into(),
        }
    }
}

// ============================================================================
// RouteTable
// ============================================================================

/// Static mapping from route key to source document path.
///
/// Built once at startup, read-only thereafter. No dynamic registration.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: FxHashMap<RouteKey, String>,
    sections: Vec<Section>,
}

impl RouteTable {
    /// Build a table from explicit entries and section mappings.
    pub fn new<I, K, V>(entries: I, sections: Vec<Section>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (RouteKey::new(k.as_ref()), v.into()))
            .collect();
        Self { entries, sections }
    }

    /// The built-in table for the stock site layout.
    pub fn builtin() -> Self {
        Self::new(
            [
                ("/", "index.html"),
                ("/home", "index.html"),
                ("/blogs", "blog.html"),
                (
                    "/blogs/art-and-science-of-coffee-brewing",
                    "blog/art-and-science-of-coffee-brewing.html",
                ),
                (
                    "/blogs/moka-pot-vs-aeropress",
                    "blog/moka-pot-vs-aeropress.html",
                ),
                ("/blogs/araku-valley-spotlight", "blog/araku-valley-spotlight.html"),
                (
                    "/blogs/timing-caffeine-for-engineers",
                    "blog/timing-caffeine-for-engineers.html",
                ),
                ("/tools", "tools.html"),
                ("/tools/calculator", "tools/calculator.html"),
                ("/tools/quiz", "tools/quiz.html"),
            ],
            vec![Section::new("blog", "/blogs"), Section::new("tools", "/tools")],
        )
    }

    /// Look up the source document for a route key.
    pub fn source_for(&self, key: &RouteKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Check if the exact key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Check if a route-shaped path falls under a recognized section prefix.
    pub fn in_section(&self, route: &str) -> bool {
        self.sections
            .iter()
            .any(|s| route.starts_with(&format!("{}/", s.route)))
    }

    /// Recognized section mappings.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Iterate all (key, source) entries in key order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&RouteKey, &str)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_key_normalization() {
        assert_eq!(RouteKey::new("/blogs/"), "/blogs");
        assert_eq!(RouteKey::new("blogs"), "/blogs");
        assert_eq!(RouteKey::new("/"), "/");
        assert_eq!(RouteKey::new(""), "/");
        assert_eq!(RouteKey::new("//"), "/");
    }

    #[test]
    fn test_route_key_from_browser() {
        assert_eq!(RouteKey::from_browser("/blogs/slug?v=1"), "/blogs/slug");
        assert_eq!(RouteKey::from_browser("/blogs/slug#brewing"), "/blogs/slug");
        assert_eq!(RouteKey::from_browser("/tools/"), "/tools");
        assert_eq!(RouteKey::from_browser("/a%20b"), "/a b");
    }

    #[test]
    fn test_builtin_lookup() {
        let table = RouteTable::builtin();
        assert_eq!(table.source_for(&RouteKey::new("/")), Some("index.html"));
        assert_eq!(
            table.source_for(&RouteKey::new("/tools/quiz")),
            Some("tools/quiz.html")
        );
        assert_eq!(table.source_for(&RouteKey::new("/nonexistent")), None);
    }

    #[test]
    fn test_in_section() {
        let table = RouteTable::builtin();
        assert!(table.in_section("/blogs/some-future-post"));
        assert!(table.in_section("/tools/grinder"));
        assert!(!table.in_section("/blogs"));
        assert!(!table.in_section("/about"));
    }
}
