//! Render command: splice one route and emit the full document.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::config::SiteConfig;
use crate::log;
use crate::nav::NavOutcome;

use super::common::open_session;

/// Render `route` through the full load pipeline and write the result.
pub fn run_render(route: &str, output: Option<&PathBuf>, config: &SiteConfig) -> Result<()> {
    let table = config.route_table();
    let (path, _hash) = crate::route::split_hash(route);
    if path != "/" && crate::route::resolve(&table, path).is_none() {
        bail!("no route for `{route}`");
    }

    let mut session = open_session(config)?;

    match session.initial(route) {
        NavOutcome::Home | NavOutcome::Loaded { .. } => {}
        NavOutcome::Failed { route } => bail!("failed to load route `{route}`"),
        NavOutcome::Superseded => unreachable!("single navigation cannot be superseded"),
    }

    let rendered = session.render();
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log!("render"; "{} -> {} ({} bytes)", session.address(), path.display(), rendered.len());
        }
        None => {
            use std::io::Write;
            std::io::stdout()
                .write_all(rendered.as_bytes())
                .context("failed to write to stdout")?;
        }
    }
    Ok(())
}
