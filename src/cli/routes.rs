//! Routes command: print the resolved route table.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::route::Section;

#[derive(Serialize)]
struct RouteListing<'a> {
    routes: Vec<RouteEntry>,
    sections: &'a [Section],
}

#[derive(Serialize)]
struct RouteEntry {
    route: String,
    source: String,
}

/// Print every route and section mapping, aligned or as JSON. With an href
/// argument, resolve it instead.
pub fn run_routes(href: Option<&str>, json: bool, config: &SiteConfig) -> Result<()> {
    let table = config.route_table();

    if let Some(href) = href {
        return resolve_one(href, &table, json);
    }

    if json {
        let listing = RouteListing {
            routes: table
                .iter_sorted()
                .map(|(key, source)| RouteEntry {
                    route: key.as_str().to_string(),
                    source: source.to_string(),
                })
                .collect(),
            sections: table.sections(),
        };
        let out = serde_json::to_string_pretty(&listing).context("failed to encode routes")?;
        println!("{out}");
        return Ok(());
    }

    let width = table
        .iter_sorted()
        .map(|(key, _)| key.as_str().len())
        .max()
        .unwrap_or(0);

    for (key, source) in table.iter_sorted() {
        println!("{:width$}  {}", key.as_str().bright_green(), source.dimmed());
    }
    for section in table.sections() {
        println!(
            "{:width$}  {}",
            format!("{}/*", section.route).bright_yellow(),
            format!("{}/*.html", section.folder).dimmed()
        );
    }
    Ok(())
}

/// Resolve a single href the way the navigation layer would.
fn resolve_one(href: &str, table: &crate::route::RouteTable, json: bool) -> Result<()> {
    use crate::route;

    let resolved = if route::is_external(href) {
        None
    } else {
        route::resolve(table, href)
    };

    if json {
        let out = serde_json::json!({
            "href": href,
            "external": route::is_external(href),
            "route": resolved.as_ref().map(|r| r.as_str()),
        });
        println!("{}", serde_json::to_string_pretty(&out).context("failed to encode resolution")?);
        return Ok(());
    }

    match resolved {
        Some(route) => println!("{}  {}", href.dimmed(), route.as_str().bright_green()),
        None if route::is_external(href) => {
            println!("{}  {}", href.dimmed(), "external".bright_yellow());
        }
        None => println!("{}  {}", href.dimmed(), "no route".bright_red()),
    }
    Ok(())
}
