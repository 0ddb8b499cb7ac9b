//! Asset path rewriting.
//!
//! Fetched documents are authored against their own directory; once spliced
//! into the shell everything must resolve from the site root. Parent-escape
//! prefixes are stripped, paths are made root-relative, and a legacy fix maps
//! `.jpg` blog images to their canonical `.png` files.

use std::sync::LazyLock;

use regex::Regex;

/// Blog images were renamed from `.jpg` to `.png` in place.
static BLOG_JPG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*images/blog/[^/]+)\.jpg$").expect("static regex"));

/// Rewrite an asset path (img src, external script src) to be root-relative.
///
/// Returns `None` when the path must be left untouched (absolute URLs and
/// data URIs).
pub fn rewrite_asset_path(src: &str) -> Option<String> {
    if src.is_empty() || src.starts_with("http") || src.starts_with("data:") {
        return None;
    }

    // Strip all parent-escape prefixes; content mounts at the site root
    let mut path = src;
    while let Some(rest) = path.strip_prefix("../") {
        path = rest;
    }
    let path = path.strip_prefix("./").unwrap_or(path);

    let path = match BLOG_JPG.captures(path) {
        Some(caps) => format!("{}.png", &caps[1]),
        None => path.to_string(),
    };

    if path.starts_with('/') {
        Some(path)
    } else {
        Some(format!("/{path}"))
    }
}

/// File name component of a script src, for matching against the shell's
/// own already-loaded scripts.
pub fn script_file_name(src: &str) -> &str {
    src.rsplit('/').next().unwrap_or(src)
}
