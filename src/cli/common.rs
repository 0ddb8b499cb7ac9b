//! Shared helpers for CLI commands.

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::fragment::FsFetcher;
use crate::nav::Session;

/// Build a navigation session over the configured site root.
pub fn open_session(config: &SiteConfig) -> Result<Session<FsFetcher>> {
    let shell_path = config.shell_path();
    let shell_html = std::fs::read_to_string(&shell_path)
        .with_context(|| format!("failed to read shell document {}", shell_path.display()))?;

    Session::new(
        FsFetcher::new(&config.root),
        config.route_table(),
        config.tools.clone(),
        &shell_html,
        &config.site.mount_id,
    )
    .context("failed to compile shell document")
}
