//! Check command: validate the shell and every registered route.

use anyhow::{Result, bail};

use crate::config::SiteConfig;
use crate::fragment::{FragmentLoader, FsFetcher};
use crate::log;
use crate::logger::{status_error, status_success};
use crate::shell::ShellTemplate;

/// Walk the route table, loading each source document through the full
/// pipeline. Failures stack on screen; the command fails if any route does.
pub fn run_check(config: &SiteConfig) -> Result<()> {
    let mut failures = 0usize;

    // The shell must compile before any route can render
    let shell_path = config.shell_path();
    match std::fs::read_to_string(&shell_path) {
        Ok(html) => match ShellTemplate::compile(&html, &config.site.mount_id) {
            Ok(_) => status_success(&format!("shell: {}", config.site.shell)),
            Err(e) => {
                status_error(&format!("shell: {}", config.site.shell), &e.to_string());
                failures += 1;
            }
        },
        Err(e) => {
            status_error(&format!("shell: {}", config.site.shell), &e.to_string());
            failures += 1;
        }
    }

    let table = config.route_table();
    let fetcher = FsFetcher::new(&config.root);
    let loader = FragmentLoader::new(&fetcher, &table, &config.tools);

    let entries: Vec<(String, String)> = table
        .iter_sorted()
        .map(|(key, source)| (key.as_str().to_string(), source.to_string()))
        .collect();

    for (route, source) in &entries {
        match loader.load(source) {
            Ok(frag) => {
                let mut notes = Vec::new();
                if frag.title.is_none() {
                    notes.push("no <title>");
                }
                if frag.description.is_none() {
                    notes.push("no meta description");
                }
                if notes.is_empty() {
                    status_success(&format!("{route} <- {source}"));
                } else {
                    status_success(&format!("{route} <- {source} ({})", notes.join(", ")));
                }
            }
            Err(e) => {
                status_error(&format!("{route} <- {source}"), &e.to_string());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} checks failed", entries.len() + 1);
    }
    log!("check"; "{} routes ok", entries.len());
    Ok(())
}
