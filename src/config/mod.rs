//! Resolver configuration.
//!
//! Everything the resolver would otherwise pick up from the process
//! environment is passed in explicitly through [`ResolverConfig`]. The CLI
//! is the only place that reads flags and environment variables.
//!
//! # Example
//!
//! ```
//! use create_app::config::{RegistryLocation, ResolverConfig};
//!
//! let config = ResolverConfig::default()
//!     .with_builtin_root("/opt/create-app/templates")
//!     .with_registry(RegistryLocation::File("registry.yaml".into()));
//!
//! assert_eq!(config.git_program, "git");
//! assert!(config.temp_root.is_none());
//! ```

pub mod settings;

pub use crate::registry::community::RegistryLocation;
pub use settings::{default_builtin_root, ResolverConfig, BUILTIN_DIR};
