//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations with a shared [`ResolverConfig`].
//!
//! [`ResolverConfig`]: crate::config::ResolverConfig

pub mod dispatcher;
pub mod resolve;
pub mod templates;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
