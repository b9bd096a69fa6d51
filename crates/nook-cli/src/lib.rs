//! Nook CLI - component fixture explorer.
//!
//! This crate provides the `nook` binary: a development server that lets a
//! developer browse and interact with each component fixture in isolation,
//! plus small inspection commands.
//!
//! # Architecture
//!
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Terminal status messages
//! - [`bundler`] - Compiler and middleware factory boundaries
//! - [`dev`] - Dev server: state, routes, file watcher
//! - `commands` - Individual CLI command implementations

pub mod bundler;
pub mod cli;
pub mod commands;
pub mod dev;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
