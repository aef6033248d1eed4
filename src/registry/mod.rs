//! Template source resolution.
//!
//! This module turns a raw template source into a template directory:
//! - Built-in templates (shipped with the tool)
//! - Community templates (listed in the community registry)
//! - External templates (any GitHub specifier)
//!
//! # Resolution Order
//!
//! Sources are classified in this order (first match wins):
//! 1. Built-in key
//! 2. Community registry source
//! 3. External specifier
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

pub mod builtin;
pub mod community;
pub mod fetch;
pub mod resolver;
pub mod source;
pub mod specifier;
pub mod validate;

// Re-exports
pub use builtin::{BuiltinTemplates, BUILTIN_TEMPLATES};
pub use community::{Attribution, CommunityRegistry, CommunityTemplateEntry, RegistryLocation};
pub use fetch::{FetchedTemplate, GitFetcher};
pub use resolver::{ResolutionPlan, TemplateResolver};
pub use source::{classify, ResolvedTemplateSource, SourceKind};
pub use specifier::{looks_like_git_source, TemplateSpecifier};
pub use validate::{validate_template_directory, TEMPLATE_MANIFEST};
