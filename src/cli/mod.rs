//! Command-line interface for create-app.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ResolveArgs, TemplatesArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
