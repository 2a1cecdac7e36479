//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Daphne static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Enable diagnostic output
    #[arg(long)]
    pub debug: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the site into the configured output folder
    Build,

    /// Serve the built site over local HTTP (not implemented yet)
    Serve,

    /// Rebuild on file changes (not implemented yet)
    Watch,
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build)
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve)
    }
    pub const fn is_watch(&self) -> bool {
        matches!(self.command, Commands::Watch)
    }
}
