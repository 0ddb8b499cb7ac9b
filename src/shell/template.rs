//! Shell document template.
//!
//! The shell is parsed once and compiled into a flat segment list: literal
//! markup interleaved with slots for everything navigation mutates (title,
//! meta description, mount content, tagged tool styles, tool scripts, footer
//! year). Rendering is then a single pass over the segments; no re-parsing
//! per navigation.

use crate::fragment::LoadError;
use crate::fragment::extract::{attr, tag_name};
use crate::fragment::rewrite::rewrite_asset_path;
use crate::utils::html::{is_raw_text_element, is_void_element};

use super::ShellState;

/// Attribute tagging dynamically injected tool-page styles so a reader of
/// the rendered document can tell them from shell-owned styles.
pub const TOOL_STYLE_TAG: &str = "data-tool-style";

/// One compiled piece of the shell document.
#[derive(Debug, Clone)]
enum Segment {
    /// Verbatim markup
    Lit(String),
    /// Document title text
    Title,
    /// Meta description content attribute
    MetaDescription,
    /// Mounted content region
    Mount,
    /// Tagged tool-page style blocks (end of head)
    ToolStyles,
    /// Tool-page scripts (end of body)
    ToolScripts,
    /// Footer year text
    Year,
}

/// Initial shell-authored values, captured at compile time.
#[derive(Debug, Clone, Default)]
pub struct ShellDefaults {
    pub title: String,
    pub description: String,
    pub mounted: String,
}

/// Compiled shell document.
#[derive(Debug, Clone)]
pub struct ShellTemplate {
    segments: Vec<Segment>,
    defaults: ShellDefaults,
}

impl ShellTemplate {
    /// Parse and compile the shell markup.
    ///
    /// Fails when the mount element is absent; the shell contract requires
    /// exactly one element with the mount id.
    pub fn compile(html: &str, mount_id: &str) -> Result<Self, LoadError> {
        let dom = tl::parse(html, tl::ParserOptions::default())
            .map_err(|_| LoadError::Parse("shell document".into()))?;
        let parser = dom.parser();
        let roots: Vec<_> = dom.children().iter().copied().collect();

        let mut compiler = Compiler {
            mount_id,
            segments: Vec::new(),
            lit: String::new(),
            found_mount: false,
            did_stylesheet: false,
            defaults: ShellDefaults::default(),
        };

        // tl drops the doctype; re-emit it from the raw prefix
        if html.trim_start().get(..9).is_some_and(|p| p.eq_ignore_ascii_case("<!doctype")) {
            compiler.lit.push_str("<!DOCTYPE html>\n");
        }

        compiler.walk(parser, &roots);
        compiler.flush();

        if !compiler.found_mount {
            return Err(LoadError::MountMissing(mount_id.to_string()));
        }

        Ok(Self {
            segments: compiler.segments,
            defaults: compiler.defaults,
        })
    }

    /// Shell-authored initial values (title, description, mount content).
    pub fn defaults(&self) -> &ShellDefaults {
        &self.defaults
    }

    /// Render the shell with the given live state.
    pub fn render(&self, state: &ShellState) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Lit(s) => out.push_str(s),
                Segment::Title => out.push_str(&state.title),
                Segment::MetaDescription => out.push_str(&state.description.replace('"', "&quot;")),
                Segment::Mount => out.push_str(&state.mounted),
                Segment::Year => out.push_str(&state.year),
                Segment::ToolStyles => {
                    for css in &state.tool_styles {
                        out.push_str("<style ");
                        out.push_str(TOOL_STYLE_TAG);
                        out.push('>');
                        out.push_str(css);
                        out.push_str("</style>");
                    }
                }
                Segment::ToolScripts => {
                    for src in &state.tool_scripts.external {
                        out.push_str("<script src=\"");
                        out.push_str(&src.replace('"', "&quot;"));
                        out.push_str("\"></script>");
                    }
                    for body in &state.tool_scripts.inline {
                        out.push_str("<script>");
                        out.push_str(body);
                        out.push_str("</script>");
                    }
                }
            }
        }
        out
    }
}

// ============================================================================
// Compiler
// ============================================================================

struct Compiler<'a> {
    mount_id: &'a str,
    segments: Vec<Segment>,
    lit: String,
    found_mount: bool,
    did_stylesheet: bool,
    defaults: ShellDefaults,
}

impl Compiler<'_> {
    fn flush(&mut self) {
        if !self.lit.is_empty() {
            self.segments.push(Segment::Lit(std::mem::take(&mut self.lit)));
        }
    }

    fn slot(&mut self, segment: Segment) {
        self.flush();
        self.segments.push(segment);
    }

    fn walk(&mut self, parser: &tl::Parser, handles: &[tl::NodeHandle]) {
        for handle in handles {
            match handle.get(parser) {
                Some(tl::Node::Tag(tag)) => self.emit_tag(parser, tag),
                Some(tl::Node::Raw(bytes)) => self.lit.push_str(&bytes.as_utf8_str()),
                Some(tl::Node::Comment(_)) | None => {}
            }
        }
    }

    fn emit_tag(&mut self, parser: &tl::Parser, tag: &tl::HTMLTag) {
        let name = tag_name(tag);
        let id = attr(tag, "id");
        let children: Vec<_> = tag.children().top().iter().copied().collect();

        // Mount element: slot replaces the shell's own content
        if id.as_deref() == Some(self.mount_id) && !self.found_mount {
            self.found_mount = true;
            self.defaults.mounted = serialize_verbatim(parser, &children);
            self.open_tag(tag, &name);
            self.slot(Segment::Mount);
            self.close_tag(&name);
            return;
        }

        // Footer year element
        if id.as_deref() == Some("year") {
            self.open_tag(tag, &name);
            self.slot(Segment::Year);
            self.close_tag(&name);
            return;
        }

        match name.as_str() {
            "title" => {
                self.defaults.title = text_of(parser, &children).trim().to_string();
                self.lit.push_str("<title>");
                self.slot(Segment::Title);
                self.lit.push_str("</title>");
            }
            "meta" if attr(tag, "name").as_deref() == Some("description") => {
                self.defaults.description = attr(tag, "content").unwrap_or_default();
                self.lit.push_str("<meta name=\"description\" content=\"");
                self.slot(Segment::MetaDescription);
                self.lit.push_str("\">");
            }
            // Primary stylesheet link: repair href to root-relative
            "link" if !self.did_stylesheet && attr(tag, "rel").as_deref() == Some("stylesheet") => {
                self.did_stylesheet = true;
                self.lit.push('<');
                self.lit.push_str(&name);
                for (key, value) in tag.attributes().iter() {
                    let key = key.as_ref().to_lowercase();
                    let mut value = value.map(|v| v.to_string());
                    if key == "href"
                        && let Some(href) = &value
                        && let Some(fixed) = rewrite_asset_path(href)
                    {
                        value = Some(fixed);
                    }
                    push_attr(&mut self.lit, &key, value.as_deref());
                }
                self.lit.push('>');
            }
            "head" => {
                self.open_tag(tag, &name);
                self.walk(parser, &children);
                self.slot(Segment::ToolStyles);
                self.close_tag(&name);
            }
            "body" => {
                self.open_tag(tag, &name);
                self.walk(parser, &children);
                self.slot(Segment::ToolScripts);
                self.close_tag(&name);
            }
            _ => {
                self.open_tag(tag, &name);
                if is_void_element(&name) {
                    return;
                }
                if is_raw_text_element(&name) {
                    // Shell-owned scripts and styles pass through verbatim
                    self.lit.push_str(&text_of(parser, &children));
                } else {
                    self.walk(parser, &children);
                }
                self.close_tag(&name);
            }
        }
    }

    fn open_tag(&mut self, tag: &tl::HTMLTag, name: &str) {
        self.lit.push('<');
        self.lit.push_str(name);
        for (key, value) in tag.attributes().iter() {
            let value = value.map(|v| v.to_string());
            push_attr(&mut self.lit, key.as_ref(), value.as_deref());
        }
        self.lit.push('>');
    }

    fn close_tag(&mut self, name: &str) {
        self.lit.push_str("</");
        self.lit.push_str(name);
        self.lit.push('>');
    }
}

fn push_attr(out: &mut String, key: &str, value: Option<&str>) {
    out.push(' ');
    out.push_str(key);
    if let Some(value) = value {
        out.push_str("=\"");
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
}

/// Raw text of child nodes (for title and raw-text elements).
fn text_of(parser: &tl::Parser, handles: &[tl::NodeHandle]) -> String {
    let mut out = String::new();
    for handle in handles {
        if let Some(tl::Node::Raw(bytes)) = handle.get(parser) {
            out.push_str(&bytes.as_utf8_str());
        }
    }
    out
}

/// Serialize a subtree without transformation (shell-authored content).
fn serialize_verbatim(parser: &tl::Parser, handles: &[tl::NodeHandle]) -> String {
    let mut out = String::new();
    emit_verbatim(parser, handles, &mut out);
    out
}

fn emit_verbatim(parser: &tl::Parser, handles: &[tl::NodeHandle], out: &mut String) {
    for handle in handles {
        match handle.get(parser) {
            Some(tl::Node::Tag(tag)) => {
                let name = tag_name(tag);
                out.push('<');
                out.push_str(&name);
                for (key, value) in tag.attributes().iter() {
                    let value = value.map(|v| v.to_string());
                    push_attr(out, key.as_ref(), value.as_deref());
                }
                out.push('>');
                if is_void_element(&name) {
                    continue;
                }
                let children: Vec<_> = tag.children().top().iter().copied().collect();
                if is_raw_text_element(&name) {
                    out.push_str(&text_of(parser, &children));
                } else {
                    emit_verbatim(parser, &children, out);
                }
                out.push_str("</");
                out.push_str(&name);
                out.push('>');
            }
            Some(tl::Node::Raw(bytes)) => out.push_str(&bytes.as_utf8_str()),
            Some(tl::Node::Comment(_)) | None => {}
        }
    }
}
