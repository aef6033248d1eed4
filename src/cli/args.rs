//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{default_builtin_root, RegistryLocation, ResolverConfig};

/// create-app - Resolve project templates from built-ins, the community
/// registry, or GitHub.
#[derive(Debug, Parser)]
#[command(name = "create-app")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory containing the built-in templates
    /// (defaults to `templates/` next to the create-app executable)
    #[arg(long, global = true, env = "CREATE_APP_TEMPLATES_DIR", value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Community registry file (defaults to the bundled registry)
    #[arg(long, global = true, env = "CREATE_APP_REGISTRY", value_name = "FILE")]
    pub registry: Option<PathBuf>,

    /// Directory for temporary clones (defaults to the system temp dir)
    #[arg(long, global = true, env = "CREATE_APP_TEMP_DIR", value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Git executable used for cloning
    #[arg(long, global = true, env = "CREATE_APP_GIT", default_value = "git")]
    pub git: String,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Build the resolver configuration from the parsed flags.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            builtin_root: self
                .templates_dir
                .clone()
                .unwrap_or_else(default_builtin_root),
            registry: self
                .registry
                .clone()
                .map(RegistryLocation::File)
                .unwrap_or_default(),
            temp_root: self.temp_dir.clone(),
            git_program: self.git.clone(),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a template source to a validated template directory
    Resolve(ResolveArgs),

    /// List built-in and community templates
    Templates(TemplatesArgs),
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ResolveArgs {
    /// Built-in key, community source, or GitHub specifier
    /// (`owner/repo[#ref]` or `https://github.com/owner/repo[.git][#ref]`)
    pub template: String,

    /// Classify and parse the source without cloning
    #[arg(long)]
    pub dry_run: bool,

    /// Keep the temporary clone and print its path
    #[arg(long)]
    pub keep: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `templates` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TemplatesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
