//! Command-line interface module.

mod args;
pub mod check;
pub mod common;
pub mod quiz;
pub mod render;
pub mod routes;
pub mod serve;

pub use args::{Cli, Commands};
