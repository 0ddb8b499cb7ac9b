//! Navigation controller.
//!
//! Owns the live shell, the address history, and the load pipeline. A
//! navigation is Idle or Loading; each load carries a generation number and
//! a completed load applies only while its generation is still current, so a
//! slow superseded load can never overwrite a newer one's content.

pub mod history;

pub use history::History;

use std::time::Duration;

use crate::config::ToolsSection;
use crate::fragment::{DocumentFetcher, FragmentLoader, LoadError, LoadedFragment};
use crate::route::{self, RouteKey, RouteTable};
use crate::shell::LiveShell;
use crate::{debug, log};

/// Observable navigation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Loading,
}

/// Where the viewport should end up after a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    /// Scroll to the element with this id, present in the loaded region
    Element(String),
}

/// Result of one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Content swapped in
    Loaded { route: RouteKey, scroll: ScrollTarget },
    /// Root route; the shell's own content is showing
    Home,
    /// Load failed; previous content kept, address reset to root
    Failed { route: RouteKey },
    /// A newer navigation superseded this one; result discarded
    Superseded,
}

/// What to do with an activated link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Internal route; the session handled it
    Intercepted(NavOutcome),
    /// External or unrecognized; default handling applies
    Default,
}

/// An in-flight load. Completing it applies the result only if no newer
/// navigation has started since.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    route: RouteKey,
    hash: Option<String>,
}

impl LoadTicket {
    pub fn route(&self) -> &RouteKey {
        &self.route
    }
}

/// One navigation session over a fetcher and a compiled shell.
pub struct Session<F> {
    fetcher: F,
    table: RouteTable,
    tools: ToolsSection,
    shell: LiveShell,
    history: History,
    state: NavState,
    generation: u64,
}

impl<F: DocumentFetcher> Session<F> {
    /// Compile the shell and start a session at the root address.
    pub fn new(
        fetcher: F,
        table: RouteTable,
        tools: ToolsSection,
        shell_html: &str,
        mount_id: &str,
    ) -> Result<Self, LoadError> {
        Ok(Self {
            fetcher,
            table,
            tools,
            shell: LiveShell::new(shell_html, mount_id)?,
            history: History::new("/"),
            state: NavState::Idle,
            generation: 0,
        })
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn shell(&self) -> &LiveShell {
        &self.shell
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current address, as the browser bar would show it.
    pub fn address(&self) -> &str {
        self.history.current()
    }

    /// Render the current document.
    pub fn render(&self) -> String {
        self.shell.render()
    }

    /// Delay before scroll targeting, letting layout settle.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.tools.scroll_settle_ms)
    }

    /// Handle the initial address. The root stays idle; its content is
    /// already present in the shell.
    pub fn initial(&mut self, address: &str) -> NavOutcome {
        let (path, hash) = route::split_hash(address);
        let key = RouteKey::from_browser(path);
        let canonical = match hash {
            Some(hash) => format!("{key}#{hash}"),
            None => key.as_str().to_string(),
        };
        self.history.replace(canonical);
        if key.is_root() {
            return NavOutcome::Home;
        }
        match route::resolve(&self.table, key.as_str()) {
            Some(route) => self.load(route, hash.map(String::from)),
            None => {
                debug!("nav"; "initial address {key} has no route");
                NavOutcome::Home
            }
        }
    }

    /// Handle a link activation.
    ///
    /// A `data-route` annotation takes priority over href resolution; any
    /// hash in the href is appended to the annotated route. External hrefs
    /// and resolution misses fall through to default handling.
    pub fn click(&mut self, href: &str, data_route: Option<&str>) -> ClickAction {
        if let Some(annotated) = data_route {
            let (_, hash) = route::split_hash(href);
            let target = match hash {
                Some(hash) => format!("{annotated}#{hash}"),
                None => annotated.to_string(),
            };
            return ClickAction::Intercepted(self.navigate(&target));
        }

        if route::is_external(href) || route::resolve(&self.table, href).is_none() {
            return ClickAction::Default;
        }
        ClickAction::Intercepted(self.navigate(href))
    }

    /// Navigate to a target, pushing a history entry.
    ///
    /// Unresolvable targets degrade to the failure policy: previous content
    /// stays visible and the address falls back to the root.
    pub fn navigate(&mut self, target: &str) -> NavOutcome {
        let (path, hash) = route::split_hash(target);
        let Some(route) = route::resolve(&self.table, path) else {
            log!("error"; "no route for `{target}`");
            return NavOutcome::Failed {
                route: RouteKey::new(path),
            };
        };

        let address = match hash {
            Some(hash) => format!("{route}#{hash}"),
            None => route.as_str().to_string(),
        };
        self.history.push(address);

        self.load(route, hash.map(String::from))
    }

    /// History pop: move back one entry and reload it without pushing.
    pub fn back(&mut self) -> Option<NavOutcome> {
        let address = self.history.back()?.to_string();
        Some(self.visit(&address))
    }

    /// History pop: move forward one entry and reload it without pushing.
    pub fn forward(&mut self) -> Option<NavOutcome> {
        let address = self.history.forward()?.to_string();
        Some(self.visit(&address))
    }

    /// Load the route behind an address already in history.
    fn visit(&mut self, address: &str) -> NavOutcome {
        let (path, hash) = route::split_hash(address);
        let route = RouteKey::from_browser(path);
        self.load(route, hash.map(String::from))
    }

    fn load(&mut self, route: RouteKey, hash: Option<String>) -> NavOutcome {
        if route.is_root() {
            self.shell.restore_home();
            return NavOutcome::Home;
        }
        let ticket = self.begin(route, hash);
        let result = self.run(&ticket);
        self.complete(ticket, result)
    }

    /// Start a load, superseding any outstanding one.
    pub fn begin(&mut self, route: RouteKey, hash: Option<String>) -> LoadTicket {
        self.generation += 1;
        self.state = NavState::Loading;
        LoadTicket {
            generation: self.generation,
            route,
            hash,
        }
    }

    /// Fetch and sanitize the ticket's document. Pure with respect to
    /// session state; [`complete`](Self::complete) applies the result.
    pub fn run(&self, ticket: &LoadTicket) -> Result<LoadedFragment, LoadError> {
        let source = self
            .source_of(&ticket.route)
            .ok_or_else(|| LoadError::RouteMiss(ticket.route.as_str().to_string()))?;
        let loader = FragmentLoader::new(&self.fetcher, &self.table, &self.tools);
        loader.load(&source)
    }

    /// Apply a finished load, unless a newer navigation superseded it.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<LoadedFragment, LoadError>,
    ) -> NavOutcome {
        if ticket.generation != self.generation {
            debug!("nav"; "discarding superseded load for {}", ticket.route);
            return NavOutcome::Superseded;
        }
        self.state = NavState::Idle;

        match result {
            Ok(frag) => {
                self.shell.splice(&frag);
                let scroll = match ticket.hash {
                    Some(hash) if frag.ids.contains(&hash) => ScrollTarget::Element(hash),
                    _ => ScrollTarget::Top,
                };
                debug!("nav"; "{} <- {}", ticket.route, frag.source);
                NavOutcome::Loaded {
                    route: ticket.route,
                    scroll,
                }
            }
            Err(err) => {
                log!("error"; "load failed for {}: {err}", ticket.route);
                // Keep the last good content; only the address falls back
                if !ticket.route.is_root() {
                    self.history.replace("/");
                }
                NavOutcome::Failed {
                    route: ticket.route,
                }
            }
        }
    }

    /// Source document for a route: exact table entry first, then
    /// section-derived (`/blogs/<slug>` -> `blog/<slug>.html`).
    fn source_of(&self, route: &RouteKey) -> Option<String> {
        if let Some(source) = self.table.source_for(route) {
            return Some(source.to_string());
        }
        for section in self.table.sections() {
            if let Some(slug) = route.as_str().strip_prefix(&format!("{}/", section.route)) {
                return Some(format!("{}/{slug}.html", section.folder));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests;
