//! create-app - Template source resolution for project scaffolding.
//!
//! Turns a user-supplied template source into a validated template directory.
//! A source is one of:
//!
//! - a built-in template key (`basic`, `react-router`)
//! - the `source` of an entry in the community template registry
//! - a GitHub specifier (`owner/repo[#ref]` or
//!   `https://github.com/owner/repo[.git][#ref]`)
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Resolver configuration
//! - [`error`] - Error types and result aliases
//! - [`registry`] - Specifier parsing, community registry, fetching and resolution
//! - [`shell`] - External command execution
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use create_app::registry::TemplateSpecifier;
//!
//! let spec = TemplateSpecifier::parse("octocat/hello-world#main").unwrap();
//! assert_eq!(spec.repo_url, "https://github.com/octocat/hello-world.git");
//! assert_eq!(spec.git_ref.as_deref(), Some("main"));
//! ```
//!
//! For fetching with a stubbed git, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod registry;
pub mod shell;
pub mod ui;

pub use error::{CreateError, Result};
