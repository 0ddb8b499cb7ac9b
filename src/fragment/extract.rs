//! Document decomposition: title, meta description, primary content region,
//! and tool-page asset capture.
//!
//! Everything here operates on a parsed `tl` tree. Helpers are small and
//! recursive; the region selector tries the site's known content containers
//! in priority order before falling back to the whole body.

use crate::config::ToolsSection;
use crate::fragment::rewrite::{rewrite_asset_path, script_file_name};

/// Content container classes, in selection priority order.
const REGION_CLASSES: [&str; 3] = ["blog-page", "tools-page", "blog-post"];

/// Generic content container tags, tried after the known classes.
const REGION_TAGS: [&str; 2] = ["main", "article"];

// ============================================================================
// Walk helpers
// ============================================================================

/// Lowercased tag name.
pub fn tag_name(tag: &tl::HTMLTag) -> String {
    tag.name().as_utf8_str().to_lowercase()
}

/// Get an attribute value by (case-insensitive) name.
pub fn attr(tag: &tl::HTMLTag, name: &str) -> Option<String> {
    for (key, value) in tag.attributes().iter() {
        if key.as_ref().eq_ignore_ascii_case(name) {
            return Some(value.map(|v| v.to_string()).unwrap_or_default());
        }
    }
    None
}

/// Check class attribute membership.
pub fn has_class(tag: &tl::HTMLTag, class: &str) -> bool {
    attr(tag, "class")
        .map(|c| c.split_whitespace().any(|part| part == class))
        .unwrap_or(false)
}

/// Depth-first search for the first tag matching a predicate.
pub fn find_first(
    parser: &tl::Parser,
    roots: &[tl::NodeHandle],
    pred: &dyn Fn(&tl::HTMLTag) -> bool,
) -> Option<tl::NodeHandle> {
    for handle in roots {
        let Some(node) = handle.get(parser) else {
            continue;
        };
        if let tl::Node::Tag(tag) = node {
            if pred(tag) {
                return Some(*handle);
            }
            let children: Vec<_> = tag.children().top().iter().copied().collect();
            if let Some(found) = find_first(parser, &children, pred) {
                return Some(found);
            }
        }
    }
    None
}

/// Visit every tag in document order.
pub fn for_each_tag(
    parser: &tl::Parser,
    roots: &[tl::NodeHandle],
    visit: &mut dyn FnMut(&tl::HTMLTag),
) {
    for handle in roots {
        let Some(node) = handle.get(parser) else {
            continue;
        };
        if let tl::Node::Tag(tag) = node {
            visit(tag);
            let children: Vec<_> = tag.children().top().iter().copied().collect();
            for_each_tag(parser, &children, visit);
        }
    }
}

/// Concatenated raw text of a tag's descendants.
pub fn text_content(parser: &tl::Parser, tag: &tl::HTMLTag) -> String {
    let mut out = String::new();
    collect_text(parser, &tag.children().top().iter().copied().collect::<Vec<_>>(), &mut out);
    out
}

fn collect_text(parser: &tl::Parser, handles: &[tl::NodeHandle], out: &mut String) {
    for handle in handles {
        match handle.get(parser) {
            Some(tl::Node::Raw(bytes)) => out.push_str(&bytes.as_utf8_str()),
            Some(tl::Node::Tag(tag)) => {
                let children: Vec<_> = tag.children().top().iter().copied().collect();
                collect_text(parser, &children, out);
            }
            _ => {}
        }
    }
}

// ============================================================================
// Title / description
// ============================================================================

/// Extract the document title text.
pub fn title(parser: &tl::Parser, roots: &[tl::NodeHandle]) -> Option<String> {
    let handle = find_first(parser, roots, &|tag| tag_name(tag) == "title")?;
    let tl::Node::Tag(tag) = handle.get(parser)? else {
        return None;
    };
    let text = text_content(parser, tag).trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Extract the meta description content.
pub fn description(parser: &tl::Parser, roots: &[tl::NodeHandle]) -> Option<String> {
    let handle = find_first(parser, roots, &|tag| {
        tag_name(tag) == "meta" && attr(tag, "name").as_deref() == Some("description")
    })?;
    let tl::Node::Tag(tag) = handle.get(parser)? else {
        return None;
    };
    attr(tag, "content").filter(|c| !c.is_empty())
}

// ============================================================================
// Region selection
// ============================================================================

/// The primary content region of a fetched document.
pub enum Region {
    /// A single matched container element.
    Container(tl::NodeHandle),
    /// Fallback: the body's children (header/footer removed downstream).
    BodyChildren(Vec<tl::NodeHandle>),
}

/// Select the primary content region.
///
/// Tries the known listing/post container classes, then generic main/article
/// elements, then falls back to the body content. Returns `None` only when
/// the markup has no body and no elements at all.
pub fn select_region(parser: &tl::Parser, roots: &[tl::NodeHandle]) -> Option<Region> {
    for class in REGION_CLASSES {
        if let Some(handle) = find_first(parser, roots, &|tag| has_class(tag, class)) {
            return Some(Region::Container(handle));
        }
    }
    for name in REGION_TAGS {
        if let Some(handle) = find_first(parser, roots, &|tag| tag_name(tag) == name) {
            return Some(Region::Container(handle));
        }
    }

    let body = find_first(parser, roots, &|tag| tag_name(tag) == "body");
    if let Some(handle) = body
        && let Some(tl::Node::Tag(tag)) = handle.get(parser)
    {
        return Some(Region::BodyChildren(
            tag.children().top().iter().copied().collect(),
        ));
    }

    // Headerless fragment documents: treat all top-level nodes as the body
    if roots.is_empty() {
        None
    } else {
        Some(Region::BodyChildren(roots.to_vec()))
    }
}

// ============================================================================
// Tool-page asset capture
// ============================================================================

/// Styles and scripts captured from a tool-bearing document, in document
/// order, before sanitization strips them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolAssets {
    /// Inline style blocks
    pub styles: Vec<String>,
    /// Root-relative external script paths, shell-owned scripts excluded
    pub external_scripts: Vec<String>,
    /// Inline script bodies, analytics tags excluded
    pub inline_scripts: Vec<String>,
}

impl ToolAssets {
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty() && self.external_scripts.is_empty() && self.inline_scripts.is_empty()
    }
}

/// Capture styles and scripts from a tool-bearing document.
pub fn capture_tool_assets(
    parser: &tl::Parser,
    roots: &[tl::NodeHandle],
    tools: &ToolsSection,
) -> ToolAssets {
    let mut assets = ToolAssets::default();

    for_each_tag(parser, roots, &mut |tag| {
        match tag_name(tag).as_str() {
            "style" => {
                let css = text_content(parser, tag);
                if !css.trim().is_empty() {
                    assets.styles.push(css);
                }
            }
            "script" => {
                if let Some(src) = attr(tag, "src").filter(|s| !s.is_empty()) {
                    let normalized = rewrite_asset_path(&src).unwrap_or(src);
                    let name = script_file_name(&normalized).to_string();
                    let shell_owned = tools.shell_scripts.iter().any(|s| *s == name);
                    if !shell_owned && !assets.external_scripts.contains(&normalized) {
                        assets.external_scripts.push(normalized);
                    }
                } else {
                    let body = text_content(parser, tag);
                    let is_analytics = tools
                        .analytics_markers
                        .iter()
                        .any(|marker| body.contains(marker.as_str()));
                    if !body.trim().is_empty() && !is_analytics {
                        assets.inline_scripts.push(body);
                    }
                }
            }
            _ => {}
        }
    });

    assets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> tl::VDom<'_> {
        tl::parse(html, tl::ParserOptions::default()).unwrap()
    }

    fn roots(dom: &tl::VDom) -> Vec<tl::NodeHandle> {
        dom.children().iter().copied().collect()
    }

    #[test]
    fn test_title_and_description() {
        let dom = parse(
            "<html><head><title> Moka Pot vs Aeropress </title>\
             <meta name=\"description\" content=\"A showdown\"></head><body></body></html>",
        );
        let roots = roots(&dom);
        assert_eq!(title(dom.parser(), &roots).as_deref(), Some("Moka Pot vs Aeropress"));
        assert_eq!(description(dom.parser(), &roots).as_deref(), Some("A showdown"));
    }

    #[test]
    fn test_region_priority_class_over_main() {
        let dom = parse("<body><main><div class=\"blog-page\">listing</div></main></body>");
        let region = select_region(dom.parser(), &roots(&dom)).unwrap();
        let Region::Container(handle) = region else {
            panic!("expected container region");
        };
        let tl::Node::Tag(tag) = handle.get(dom.parser()).unwrap() else {
            panic!("expected tag");
        };
        assert!(has_class(tag, "blog-page"));
    }

    #[test]
    fn test_region_falls_back_to_body() {
        let dom = parse("<body><header>h</header><p>text</p><footer>f</footer></body>");
        let region = select_region(dom.parser(), &roots(&dom)).unwrap();
        assert!(matches!(region, Region::BodyChildren(_)));
    }

    #[test]
    fn test_capture_tool_assets() {
        let tools = ToolsSection::default();
        let dom = parse(
            "<html><head><style>.quiz{color:red}</style>\
             <script src=\"../js/router.js\"></script>\
             <script src=\"../tools/quiz.js\"></script>\
             <script>gtag('config', 'G-XYZ');</script>\
             <script>let answers = [];</script></head><body></body></html>",
        );
        let assets = capture_tool_assets(dom.parser(), &roots(&dom), &tools);

        assert_eq!(assets.styles, vec![".quiz{color:red}"]);
        // Shell-owned router.js excluded, quiz.js normalized root-relative
        assert_eq!(assets.external_scripts, vec!["/tools/quiz.js"]);
        // Analytics snippet excluded
        assert_eq!(assets.inline_scripts, vec!["let answers = [];"]);
    }
}
