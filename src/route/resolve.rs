//! Href to route key resolution.
//!
//! Pure and deterministic: no filesystem or shell access. `None` means "not a
//! recognized internal route" and the caller must leave the link to default
//! handling.

use std::sync::LazyLock;

use regex::Regex;

use super::{RouteKey, RouteTable};

/// Leading `./` or `../` on a relative file reference.
static DOT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.\.?/").expect("static regex"));

/// Trailing `.html` extension.
static HTML_EXT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.html$").expect("static regex"));

/// Check if an href is external to the router: absolute URLs, mail/phone
/// schemes, and same-page hash-only links are never intercepted.
pub fn is_external(href: &str) -> bool {
    href.starts_with('#')
        || href.starts_with("http")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
}

/// Split an href into its path part and optional hash fragment (without `#`).
pub fn split_hash(href: &str) -> (&str, Option<&str>) {
    match href.split_once('#') {
        Some((path, hash)) if !hash.is_empty() => (path, Some(hash)),
        Some((path, _)) => (path, None),
        None => (href, None),
    }
}

/// Resolve an arbitrary href into a canonical route key.
///
/// First match wins:
/// 1. Hash fragment is stripped for matching.
/// 2. Absolute paths: trailing slash trimmed (root stays root); accepted if
///    registered or under a recognized section prefix.
/// 3. Relative file references: leading `./`/`../` and trailing `.html`
///    stripped; `index`/empty maps to root; then table lookup, section folder
///    rewrite, and bare folder to listing route.
pub fn resolve(table: &RouteTable, href: &str) -> Option<RouteKey> {
    if href.is_empty() {
        return None;
    }

    let (path, _hash) = split_hash(href);

    if path.starts_with('/') {
        let route = trim_trailing_slash(path);
        if table.contains(route) || table.in_section(route) {
            return Some(RouteKey::new(route));
        }
        return None;
    }

    // Relative file reference: strip leading ./ or ../ and trailing .html
    let cleaned = DOT_PREFIX.replace(path, "");
    let cleaned = HTML_EXT.replace(&cleaned, "");

    if cleaned.is_empty() || cleaned == "index" {
        return Some(RouteKey::new("/"));
    }

    let as_route = format!("/{cleaned}");
    if table.contains(&as_route) {
        return Some(RouteKey::new(&as_route));
    }

    // Section folder rewrite: blog/<slug> -> /blogs/<slug>
    for section in table.sections() {
        if let Some(slug) = cleaned.strip_prefix(&format!("{}/", section.folder)) {
            return Some(RouteKey::new(&format!("{}/{slug}", section.route)));
        }
    }

    // Bare folder name maps to the section listing route
    for section in table.sections() {
        if cleaned == section.folder {
            return Some(RouteKey::new(&section.route));
        }
    }

    None
}

/// Trim a trailing slash, keeping the root as `/`.
fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::builtin()
    }

    #[test]
    fn test_table_keys_are_fixed_points() {
        let table = table();
        let keys: Vec<_> = table.iter_sorted().map(|(k, _)| k.clone()).collect();
        for key in keys {
            let resolved = resolve(&table, key.as_str());
            assert_eq!(resolved.as_ref(), Some(&key), "key {key} must resolve to itself");
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let table = table();
        for href in ["blog/moka-pot-vs-aeropress.html", "./tools.html", "index.html"] {
            let first = resolve(&table, href).unwrap();
            let second = resolve(&table, first.as_str()).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_relative_blog_paths() {
        let table = table();
        assert_eq!(
            resolve(&table, "blog/moka-pot-vs-aeropress.html").unwrap(),
            "/blogs/moka-pot-vs-aeropress"
        );
        assert_eq!(
            resolve(&table, "../blog/araku-valley-spotlight.html").unwrap(),
            "/blogs/araku-valley-spotlight"
        );
    }

    #[test]
    fn test_relative_tool_paths() {
        let table = table();
        assert_eq!(resolve(&table, "tools/quiz.html").unwrap(), "/tools/quiz");
        assert_eq!(resolve(&table, "./tools/calculator.html").unwrap(), "/tools/calculator");
    }

    #[test]
    fn test_index_maps_to_root() {
        let table = table();
        assert_eq!(resolve(&table, "index.html").unwrap(), "/");
        assert_eq!(resolve(&table, "./index.html").unwrap(), "/");
        assert_eq!(resolve(&table, "index").unwrap(), "/");
    }

    #[test]
    fn test_bare_folder_maps_to_listing() {
        let table = table();
        assert_eq!(resolve(&table, "blog.html").unwrap(), "/blogs");
        assert_eq!(resolve(&table, "blog").unwrap(), "/blogs");
        assert_eq!(resolve(&table, "tools").unwrap(), "/tools");
    }

    #[test]
    fn test_absolute_paths() {
        let table = table();
        assert_eq!(resolve(&table, "/blogs/").unwrap(), "/blogs");
        // Unregistered slugs under a section prefix pass through as-is
        assert_eq!(
            resolve(&table, "/blogs/some-future-post").unwrap(),
            "/blogs/some-future-post"
        );
        assert_eq!(resolve(&table, "/about"), None);
    }

    #[test]
    fn test_hash_stripped_for_matching() {
        let table = table();
        assert_eq!(
            resolve(&table, "/blogs/moka-pot-vs-aeropress#verdict").unwrap(),
            "/blogs/moka-pot-vs-aeropress"
        );
        assert_eq!(
            split_hash("/blogs/moka-pot-vs-aeropress#verdict"),
            ("/blogs/moka-pot-vs-aeropress", Some("verdict"))
        );
        assert_eq!(split_hash("/blogs"), ("/blogs", None));
        assert_eq!(split_hash("/blogs#"), ("/blogs", None));
    }

    #[test]
    fn test_external_hrefs() {
        assert!(is_external("https://example.com/x"));
        assert!(is_external("http://example.com"));
        assert!(is_external("mailto:hello@example.com"));
        assert!(is_external("tel:+1234567890"));
        assert!(is_external("#brewing"));
        assert!(!is_external("/blogs"));
        assert!(!is_external("blog/post.html"));
    }

    #[test]
    fn test_unknown_relative_is_none() {
        let table = table();
        assert_eq!(resolve(&table, "about.html"), None);
        assert_eq!(resolve(&table, "assets/styles.css"), None);
        assert_eq!(resolve(&table, ""), None);
    }
}
