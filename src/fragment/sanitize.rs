//! Tree-walking sanitizer and serializer.
//!
//! The extracted content region is re-serialized through a single traversal
//! that drops disallowed node kinds (script, noscript, header, footer) by
//! construction - nothing string-level survives to auto-execute on parse -
//! while rewriting asset paths and annotating internal anchors with their
//! canonical route.

use rustc_hash::FxHashSet;

use crate::fragment::extract::tag_name;
use crate::fragment::rewrite::rewrite_asset_path;
use crate::route::{self, RouteTable};
use crate::utils::html::{is_raw_text_element, is_void_element};

/// Elements removed from any sanitized region.
const DISALLOWED: [&str; 4] = ["script", "noscript", "header", "footer"];

/// A sanitized, serialized content region.
#[derive(Debug, Clone)]
pub struct SanitizedRegion {
    /// Serialized markup, ready for splicing into the mount element
    pub html: String,
    /// All element ids present in the region, for hash scroll targeting
    pub ids: FxHashSet<String>,
}

/// Region sanitizer. Borrow-only; one instance per load.
pub struct Sanitizer<'a> {
    table: &'a RouteTable,
    /// Tool pages have their styles captured separately and stripped here
    strip_styles: bool,
}

impl<'a> Sanitizer<'a> {
    pub fn new(table: &'a RouteTable, strip_styles: bool) -> Self {
        Self { table, strip_styles }
    }

    /// Serialize the nodes rooted at `handles` into sanitized markup.
    pub fn serialize(&self, parser: &tl::Parser, handles: &[tl::NodeHandle]) -> SanitizedRegion {
        let mut region = SanitizedRegion {
            html: String::new(),
            ids: FxHashSet::default(),
        };
        self.emit_nodes(parser, handles, &mut region);
        region
    }

    fn emit_nodes(
        &self,
        parser: &tl::Parser,
        handles: &[tl::NodeHandle],
        out: &mut SanitizedRegion,
    ) {
        for handle in handles {
            match handle.get(parser) {
                Some(tl::Node::Tag(tag)) => self.emit_tag(parser, tag, out),
                Some(tl::Node::Raw(bytes)) => out.html.push_str(&bytes.as_utf8_str()),
                // Comments carry no content worth splicing
                Some(tl::Node::Comment(_)) | None => {}
            }
        }
    }

    fn emit_tag(&self, parser: &tl::Parser, tag: &tl::HTMLTag, out: &mut SanitizedRegion) {
        let name = tag_name(tag);

        if DISALLOWED.contains(&name.as_str()) {
            return;
        }
        if name == "style" && self.strip_styles {
            return;
        }

        let attrs = self.process_attributes(tag, &name, out);

        out.html.push('<');
        out.html.push_str(&name);
        for (key, value) in &attrs {
            out.html.push(' ');
            out.html.push_str(key);
            if let Some(value) = value {
                out.html.push_str("=\"");
                out.html.push_str(&value.replace('"', "&quot;"));
                out.html.push('"');
            }
        }
        out.html.push('>');

        if is_void_element(&name) {
            return;
        }

        let children: Vec<_> = tag.children().top().iter().copied().collect();
        if is_raw_text_element(&name) {
            // Style content passes through verbatim (scripts never get here)
            for child in &children {
                if let Some(tl::Node::Raw(bytes)) = child.get(parser) {
                    out.html.push_str(&bytes.as_utf8_str());
                }
            }
        } else {
            self.emit_nodes(parser, &children, out);
        }

        out.html.push_str("</");
        out.html.push_str(&name);
        out.html.push('>');
    }

    /// Collect attributes, rewriting image sources and annotating internal
    /// anchors with `data-route`.
    fn process_attributes(
        &self,
        tag: &tl::HTMLTag,
        name: &str,
        out: &mut SanitizedRegion,
    ) -> Vec<(String, Option<String>)> {
        let mut attrs: Vec<(String, Option<String>)> = Vec::new();
        let mut has_data_route = false;
        let mut resolved_route: Option<String> = None;

        for (key, value) in tag.attributes().iter() {
            let key = key.as_ref().to_lowercase();
            let mut value = value.map(|v| v.to_string());

            match (name, key.as_str()) {
                (_, "id") => {
                    if let Some(id) = &value {
                        out.ids.insert(id.clone());
                    }
                }
                ("img", "src") => {
                    if let Some(src) = &value
                        && let Some(fixed) = rewrite_asset_path(src)
                    {
                        value = Some(fixed);
                    }
                }
                ("a", "href") => {
                    if let Some(href) = &value
                        && !route::is_external(href)
                        && let Some(route_key) = route::resolve(self.table, href)
                    {
                        let (_, hash) = route::split_hash(href);
                        let canonical = match hash {
                            Some(hash) => format!("{route_key}#{hash}"),
                            None => route_key.as_str().to_string(),
                        };
                        resolved_route = Some(route_key.as_str().to_string());
                        value = Some(canonical);
                    }
                }
                ("a", "data-route") => has_data_route = true,
                _ => {}
            }

            attrs.push((key, value));
        }

        if name == "a"
            && !has_data_route
            && let Some(route) = resolved_route
        {
            attrs.push(("data-route".into(), Some(route)));
        }

        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(html: &str) -> SanitizedRegion {
        sanitize_with(html, false)
    }

    fn sanitize_with(html: &str, strip_styles: bool) -> SanitizedRegion {
        let table = RouteTable::builtin();
        let dom = tl::parse(html, tl::ParserOptions::default()).unwrap();
        let roots: Vec<_> = dom.children().iter().copied().collect();
        Sanitizer::new(&table, strip_styles).serialize(dom.parser(), &roots)
    }

    #[test]
    fn test_scripts_never_survive() {
        let region = sanitize(
            "<div><script>alert(1)</script><p>safe</p>\
             <section><noscript>nojs</noscript><script src=\"x.js\"></script></section></div>",
        );
        assert!(!region.html.contains("<script"));
        assert!(!region.html.contains("noscript"));
        assert!(region.html.contains("<p>safe</p>"));
    }

    #[test]
    fn test_header_footer_removed() {
        let region = sanitize("<header>nav</header><article>post</article><footer>legal</footer>");
        assert!(!region.html.contains("<header"));
        assert!(!region.html.contains("<footer"));
        assert!(region.html.contains("<article>post</article>"));
    }

    #[test]
    fn test_img_src_rewritten() {
        let region = sanitize("<img src=\"../images/blog/moka.jpg\" alt=\"moka\">");
        assert!(region.html.contains("src=\"/images/blog/moka.png\""));
        assert!(!region.html.contains("../"));
        // Void element: no closing tag
        assert!(!region.html.contains("</img>"));
    }

    #[test]
    fn test_anchor_annotation() {
        let region = sanitize("<a href=\"blog/moka-pot-vs-aeropress.html\">read</a>");
        assert!(region.html.contains("href=\"/blogs/moka-pot-vs-aeropress\""));
        assert!(region.html.contains("data-route=\"/blogs/moka-pot-vs-aeropress\""));
    }

    #[test]
    fn test_anchor_hash_preserved() {
        let region = sanitize("<a href=\"blog/moka-pot-vs-aeropress.html#verdict\">jump</a>");
        assert!(region.html.contains("href=\"/blogs/moka-pot-vs-aeropress#verdict\""));
        assert!(region.html.contains("data-route=\"/blogs/moka-pot-vs-aeropress\""));
    }

    #[test]
    fn test_external_anchor_untouched() {
        let region = sanitize("<a href=\"https://example.com\">out</a>");
        assert!(region.html.contains("href=\"https://example.com\""));
        assert!(!region.html.contains("data-route"));
    }

    #[test]
    fn test_existing_data_route_kept() {
        let region = sanitize("<a href=\"/blogs\" data-route=\"/blogs\">all</a>");
        assert_eq!(region.html.matches("data-route").count(), 1);
    }

    #[test]
    fn test_ids_collected() {
        let region = sanitize("<div id=\"brewing\"><span id=\"verdict\">x</span></div>");
        assert!(region.ids.contains("brewing"));
        assert!(region.ids.contains("verdict"));
    }

    #[test]
    fn test_styles_stripped_only_for_tools() {
        let kept = sanitize_with("<div><style>.a{}</style>ok</div>", false);
        assert!(kept.html.contains("<style>.a{}</style>"));

        let stripped = sanitize_with("<div><style>.a{}</style>ok</div>", true);
        assert!(!stripped.html.contains("<style"));
        assert!(stripped.html.contains("ok"));
    }

    #[test]
    fn test_text_passes_through_comments_dropped() {
        let region = sanitize("<p>a &amp; b</p><!-- note -->");
        assert!(region.html.contains("a &amp; b"));
        assert!(!region.html.contains("note"));
    }
}
