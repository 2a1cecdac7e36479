//! Daphne - a static site generator built around front-matter metadata,
//! template wrapping and include expansion.

mod build;
mod cli;
mod config;
mod content;
mod logger;
mod render;
mod serve;
mod watch;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use serve::serve_site;
use std::path::Path;
use watch::watch_site;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.debug {
        logger::enable_debug();
    }

    let root = cli.root.as_deref().unwrap_or(Path::new("."));

    match cli.command {
        Commands::Build => build::build(root).await.map(|_| ()),
        Commands::Serve => serve_site(),
        Commands::Watch => watch_site(),
    }
}
