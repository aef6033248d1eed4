//! Resolver settings.

use std::path::PathBuf;

use crate::registry::community::RegistryLocation;

/// Name of the built-in templates directory installed next to the binary.
pub const BUILTIN_DIR: &str = "templates";

/// Directory holding the built-in templates when none is configured.
///
/// This is `templates/` beside the running executable, or `./templates`
/// when the executable path cannot be determined.
pub fn default_builtin_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(BUILTIN_DIR)))
        .unwrap_or_else(|| PathBuf::from(BUILTIN_DIR))
}

/// Explicit configuration for template resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Directory containing the built-in template folders.
    pub builtin_root: PathBuf,

    /// Community registry document to load.
    pub registry: RegistryLocation,

    /// Parent directory for fetch workspaces (None = OS temp dir).
    pub temp_root: Option<PathBuf>,

    /// Git executable used for cloning.
    pub git_program: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            builtin_root: default_builtin_root(),
            registry: RegistryLocation::default(),
            temp_root: None,
            git_program: "git".to_string(),
        }
    }
}

impl ResolverConfig {
    /// Use `root` for built-in templates.
    pub fn with_builtin_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.builtin_root = root.into();
        self
    }

    /// Load the community registry from `registry`.
    pub fn with_registry(mut self, registry: RegistryLocation) -> Self {
        self.registry = registry;
        self
    }

    /// Create fetch workspaces under `root`.
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    /// Clone with `program` instead of `git`.
    pub fn with_git_program(mut self, program: impl Into<String>) -> Self {
        self.git_program = program.into();
        self
    }
}
