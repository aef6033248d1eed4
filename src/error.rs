//! Error types for template resolution.
//!
//! This module defines [`CreateError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every failure the resolver can detect has its own variant carrying the
//!   offending input, so callers branch on the variant instead of the message
//! - Fetch-time failures are wrapped in [`CreateError::TemplateResolution`];
//!   use [`CreateError::root_cause`] to get at the underlying variant
//! - Use `anyhow::Error` (via `CreateError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for template resolution.
#[derive(Debug, Error)]
pub enum CreateError {
    /// The raw template source is not a well-formed specifier.
    #[error("Invalid template source \"{input}\". {reason}")]
    InvalidSpecifier { input: String, reason: String },

    /// The specifier is a well-formed URL on a host other than GitHub.
    #[error("Unsupported template host \"{host}\" in \"{input}\". Only github.com repositories are supported.")]
    UnsupportedHost { input: String, host: String },

    /// The source is neither a known template nor anything git-shaped.
    #[error(
        "Unknown template \"{input}\". Use one of [{}] or a GitHub template specifier like \"owner/repo#ref\".",
        alternatives.join(", ")
    )]
    UnknownTemplate {
        input: String,
        alternatives: Vec<String>,
    },

    /// The community registry document could not be read.
    #[error("Failed to read community template registry \"{}\". {message}", path.display())]
    RegistryRead { path: PathBuf, message: String },

    /// The community registry document is not valid YAML.
    #[error("Failed to parse community template registry \"{}\". {message}", path.display())]
    RegistryParse { path: PathBuf, message: String },

    /// The community registry document violates the registry schema.
    #[error("Invalid community template registry \"{}\": \"{field}\" {message}", path.display())]
    RegistryValidation {
        path: PathBuf,
        field: String,
        message: String,
    },

    /// The shallow clone exited unsuccessfully.
    #[error("git clone of {url} failed with exit code {code:?}: {output}")]
    CloneFailure {
        url: String,
        code: Option<i32>,
        output: String,
    },

    /// A resolved template path does not have the shape of a template.
    #[error("Template path \"{}\" from source \"{input}\" {reason}", path.display())]
    InvalidTemplateDirectory {
        path: PathBuf,
        input: String,
        reason: String,
    },

    /// A fetch failed; `cause` is the underlying failure.
    #[error("Failed to resolve template \"{input}\": {cause}")]
    TemplateResolution {
        input: String,
        #[source]
        cause: Box<CreateError>,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CreateError {
    /// Wrap this error as the cause of a failed resolution of `input`.
    pub fn resolving(self, input: impl Into<String>) -> Self {
        Self::TemplateResolution {
            input: input.into(),
            cause: Box::new(self),
        }
    }

    /// The innermost error beneath any [`CreateError::TemplateResolution`] layers.
    pub fn root_cause(&self) -> &CreateError {
        match self {
            Self::TemplateResolution { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for template resolution.
pub type Result<T> = std::result::Result<T, CreateError>;
