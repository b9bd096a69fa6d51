//! Command-line interface definition for nook.
//!
//! Defined with clap v4 derive macros.
//!
//! # Command Structure
//!
//! - `nook dev` - Development server with hot reload
//! - `nook list` - Print discovered components and fixtures
//! - `nook check` - Validate configuration

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Nook - browse component fixtures in isolation
#[derive(Parser, Debug)]
#[command(
    name = "nook",
    version,
    about = "A component fixture explorer with a live-reloading dev server"
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available nook subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the development server
    ///
    /// Discovers fixtures, compiles the fixture entry bundle and serves a
    /// playground for browsing each fixture, rebuilding on file changes.
    Dev(DevArgs),

    /// List discovered components and fixtures
    List(ListArgs),

    /// Validate configuration and component paths
    Check(CheckArgs),
}

/// Arguments for the dev command
#[derive(Args, Debug)]
pub struct DevArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Port to listen on (overrides config)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Hostname to bind to (overrides config)
    #[arg(long, value_name = "HOST")]
    pub hostname: Option<String>,

    /// Disable hot reload even if the config enables it
    #[arg(long)]
    pub no_hot: bool,

    /// Open the playground in the default browser on start
    #[arg(long)]
    pub open: bool,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print the fixture mapping as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Flags shared by every command that reads the project config.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Project root directory
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Explicit config file (defaults to <root>/nook.config.json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
