//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Percolate content router CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: percolate.toml)
    #[arg(short = 'C', long, default_value = "percolate.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve the site with shell fallback for extensionless routes
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Render one route's spliced document
    #[command(visible_alias = "r")]
    Render {
        /// Route key to render (e.g. /blogs/moka-pot-vs-aeropress)
        route: String,

        /// Write output to a file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// List the route table, or resolve an href against it
    Routes {
        /// Resolve this href instead of listing (e.g. blog/post.html)
        href: Option<String>,

        /// Emit machine-readable JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Check every route: source present, fetches, sanitizes cleanly
    #[command(visible_alias = "c")]
    Check,

    /// Run the roast quiz in the terminal
    #[command(visible_alias = "q")]
    Quiz,
}
