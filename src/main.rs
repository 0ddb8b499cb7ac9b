//! Percolate - a content router and fragment splicer for static sites.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod fragment;
mod logger;
mod nav;
mod quiz;
mod route;
mod shell;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = init_config(SiteConfig::load(&cli.config)?);

    match &cli.command {
        Commands::Serve { interface, port } => cli::serve::run_serve(*interface, *port),
        Commands::Render { route, output } => {
            cli::render::run_render(route, output.as_ref(), &config)
        }
        Commands::Routes { href, json } => {
            cli::routes::run_routes(href.as_deref(), *json, &config)
        }
        Commands::Check => cli::check::run_check(&config),
        Commands::Quiz => cli::quiz::run_quiz(),
    }
}
