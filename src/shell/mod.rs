//! The persistent shell document and its live state.
//!
//! The shell is compiled once into a [`ShellTemplate`]; a [`LiveShell`] holds
//! the mutable pieces (title, description, mounted region, tool assets) and
//! re-renders the full document on demand. Splicing a fragment replaces the
//! mounted content and swaps tool assets wholesale, so nothing from a
//! previous page lingers.

pub mod hooks;
pub mod template;

pub use template::{ShellTemplate, TOOL_STYLE_TAG};

use crate::fragment::{LoadError, LoadedFragment};

/// Tool-page scripts scheduled for re-emission, external sources first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolScripts {
    pub external: Vec<String>,
    pub inline: Vec<String>,
}

impl ToolScripts {
    pub fn is_empty(&self) -> bool {
        self.external.is_empty() && self.inline.is_empty()
    }
}

/// The mutable document state the template renders from.
#[derive(Debug, Clone)]
pub struct ShellState {
    pub title: String,
    pub description: String,
    pub mounted: String,
    pub tool_styles: Vec<String>,
    pub tool_scripts: ToolScripts,
    pub year: String,
}

/// A compiled shell plus its current state.
#[derive(Debug, Clone)]
pub struct LiveShell {
    template: ShellTemplate,
    state: ShellState,
    /// Newsletter forms found on the last splice
    newsletter_forms: usize,
}

impl LiveShell {
    /// Compile the shell markup and seed the state from its own content.
    pub fn new(html: &str, mount_id: &str) -> Result<Self, LoadError> {
        let template = ShellTemplate::compile(html, mount_id)?;
        let defaults = template.defaults().clone();
        let mut shell = Self {
            template,
            state: ShellState {
                title: defaults.title,
                description: defaults.description,
                mounted: defaults.mounted,
                tool_styles: Vec::new(),
                tool_scripts: ToolScripts::default(),
                year: String::new(),
            },
            newsletter_forms: 0,
        };
        shell.run_hooks();
        Ok(shell)
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Number of newsletter forms bound after the last splice.
    pub fn newsletter_forms(&self) -> usize {
        self.newsletter_forms
    }

    /// Splice a loaded fragment into the shell.
    ///
    /// Title and description fall back to the shell's own values when the
    /// fragment declares none. Tool assets are replaced, not appended, so a
    /// non-tool page clears any previous tool styles and scripts.
    pub fn splice(&mut self, frag: &LoadedFragment) {
        let defaults = self.template.defaults();
        self.state.title = frag.title.clone().unwrap_or_else(|| defaults.title.clone());
        self.state.description = frag
            .description
            .clone()
            .unwrap_or_else(|| defaults.description.clone());
        self.state.mounted = frag.html.clone();

        match &frag.tool {
            Some(assets) => {
                self.state.tool_styles = assets.styles.clone();
                self.state.tool_scripts = ToolScripts {
                    external: assets.external_scripts.clone(),
                    inline: assets.inline_scripts.clone(),
                };
            }
            None => {
                self.state.tool_styles.clear();
                self.state.tool_scripts = ToolScripts::default();
            }
        }

        self.run_hooks();
    }

    /// Restore the shell's own content (navigation back to the root).
    pub fn restore_home(&mut self) {
        let defaults = self.template.defaults();
        self.state.title = defaults.title.clone();
        self.state.description = defaults.description.clone();
        self.state.mounted = defaults.mounted.clone();
        self.state.tool_styles.clear();
        self.state.tool_scripts = ToolScripts::default();
        self.run_hooks();
    }

    /// Render the full document.
    pub fn render(&self) -> String {
        self.template.render(&self.state)
    }

    fn run_hooks(&mut self) {
        self.state.year = hooks::current_year().to_string();
        self.newsletter_forms = hooks::count_newsletter_forms(&self.state.mounted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::ToolAssets;
    use rustc_hash::FxHashSet;

    const SHELL: &str = r#"<!DOCTYPE html>
<html>
<head><title>Coffeeclub</title>
<meta name="description" content="Coffee for engineers">
</head>
<body>
<main id="app"><section>Welcome home</section></main>
<footer><span id="year"></span></footer>
</body>
</html>"#;

    fn fragment(title: Option<&str>, html: &str, tool: Option<ToolAssets>) -> LoadedFragment {
        LoadedFragment {
            source: "/blog.html".into(),
            title: title.map(String::from),
            description: None,
            html: html.into(),
            ids: FxHashSet::default(),
            tool,
        }
    }

    #[test]
    fn test_splice_and_restore() {
        let mut shell = LiveShell::new(SHELL, "app").unwrap();
        assert!(shell.render().contains("Welcome home"));

        shell.splice(&fragment(Some("Blog | Coffeeclub"), "<div>posts</div>", None));
        let rendered = shell.render();
        assert!(rendered.contains("<title>Blog | Coffeeclub</title>"));
        assert!(rendered.contains("<div>posts</div>"));
        assert!(!rendered.contains("Welcome home"));
        // Missing description falls back to the shell's own
        assert!(rendered.contains("Coffee for engineers"));

        shell.restore_home();
        assert!(shell.render().contains("Welcome home"));
        assert!(shell.render().contains("<title>Coffeeclub</title>"));
    }

    #[test]
    fn test_tool_assets_cleared_on_plain_page() {
        let mut shell = LiveShell::new(SHELL, "app").unwrap();
        let assets = ToolAssets {
            styles: vec![".quiz{}".into()],
            external_scripts: vec!["/tools/quiz.js".into()],
            inline_scripts: vec!["go();".into()],
        };
        shell.splice(&fragment(Some("Quiz"), "<div class=\"tools-page\"></div>", Some(assets)));
        let rendered = shell.render();
        assert!(rendered.contains("data-tool-style"));
        assert!(rendered.contains("/tools/quiz.js"));

        shell.splice(&fragment(Some("Blog"), "<div>posts</div>", None));
        let rendered = shell.render();
        assert!(!rendered.contains("data-tool-style"));
        assert!(!rendered.contains("/tools/quiz.js"));
    }

    #[test]
    fn test_year_always_populated() {
        let shell = LiveShell::new(SHELL, "app").unwrap();
        let year: i32 = shell.state().year.parse().unwrap();
        assert!(year >= 2025);
        assert!(shell.render().contains(&format!("<span id=\"year\">{year}</span>")));
    }

    #[test]
    fn test_newsletter_forms_counted_per_splice() {
        let mut shell = LiveShell::new(SHELL, "app").unwrap();
        assert_eq!(shell.newsletter_forms(), 0);

        shell.splice(&fragment(
            None,
            "<div><form class=\"newsletter-form\"></form></div>",
            None,
        ));
        assert_eq!(shell.newsletter_forms(), 1);

        shell.restore_home();
        assert_eq!(shell.newsletter_forms(), 0);
    }
}
