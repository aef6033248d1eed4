//! Git template fetching.
//!
//! Shallow-clones a GitHub template into a fresh temporary directory and
//! validates the result. The temporary directory is owned by the fetch until
//! it succeeds; after that it belongs to the returned [`FetchedTemplate`].

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{CreateError, Result};
use crate::registry::specifier::{looks_like_git_source, TemplateSpecifier};
use crate::registry::validate::validate_template_directory;
use crate::shell::{CommandRunner, SystemRunner};

/// Prefix of every temporary directory created by a fetch.
pub const TEMP_DIR_PREFIX: &str = "create-app-template-";

/// Name of the clone inside the temporary directory.
pub const CLONE_DIR: &str = "repo";

/// A template directory ready to be copied.
///
/// Fetched templates live in a temporary directory that is removed by
/// [`FetchedTemplate::cleanup`], or when the value is dropped. Built-in
/// templates are not owned and are never removed.
#[derive(Debug)]
pub struct FetchedTemplate {
    template_path: PathBuf,
    workspace: Option<TempDir>,
}

impl FetchedTemplate {
    /// Wrap a template directory this process does not own.
    pub fn borrowed(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            workspace: None,
        }
    }

    /// Root of the template.
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Whether the template lives in temporary storage owned by this value.
    pub fn is_temporary(&self) -> bool {
        self.workspace.is_some()
    }

    /// Remove the temporary storage backing this template.
    ///
    /// Does nothing for borrowed templates. Storage that has already been
    /// removed by someone else is not an error.
    pub fn cleanup(self) -> Result<()> {
        let Some(workspace) = self.workspace else {
            return Ok(());
        };

        let path = workspace.path().to_path_buf();
        match workspace.close() {
            Ok(()) => {
                tracing::debug!("Removed template workspace {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CreateError::Io(e)),
        }
    }

    /// Give up ownership of the temporary storage so it outlives this value.
    ///
    /// Returns the template path; removing it becomes the caller's problem.
    pub fn keep(mut self) -> PathBuf {
        if let Some(workspace) = self.workspace.take() {
            let _ = workspace.keep();
        }
        self.template_path
    }
}

/// Fetches templates from GitHub with a shallow clone.
#[derive(Debug, Clone)]
pub struct GitFetcher<R = SystemRunner> {
    runner: R,
    git_program: String,
    temp_root: Option<PathBuf>,
    alternatives: Vec<String>,
}

impl GitFetcher<SystemRunner> {
    /// Create a fetcher that runs the system `git`.
    pub fn new() -> Self {
        Self::with_runner(SystemRunner)
    }
}

impl Default for GitFetcher<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> GitFetcher<R> {
    /// Create a fetcher that runs git through `runner`.
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            git_program: "git".to_string(),
            temp_root: None,
            alternatives: Vec::new(),
        }
    }

    /// Use `program` instead of `git`.
    pub fn git_program(mut self, program: impl Into<String>) -> Self {
        self.git_program = program.into();
        self
    }

    /// Create temporary directories under `root` instead of the OS temp dir.
    pub fn temp_root(mut self, root: Option<PathBuf>) -> Self {
        self.temp_root = root;
        self
    }

    /// Template names to suggest when a source is not recognised.
    pub fn alternatives(mut self, alternatives: Vec<String>) -> Self {
        self.alternatives = alternatives;
        self
    }

    /// Get the command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Fetch and validate the template at `source`.
    ///
    /// Every error is a [`CreateError::TemplateResolution`] naming `source`.
    /// On error nothing is left behind in the temp root.
    pub fn fetch(&self, source: &str) -> Result<FetchedTemplate> {
        let source = source.trim();
        self.try_fetch(source).map_err(|e| e.resolving(source))
    }

    fn try_fetch(&self, source: &str) -> Result<FetchedTemplate> {
        if !looks_like_git_source(source) {
            return Err(CreateError::UnknownTemplate {
                input: source.to_string(),
                alternatives: self.alternatives.clone(),
            });
        }

        let specifier = TemplateSpecifier::parse(source)?;
        let workspace = self.create_workspace()?;
        let clone_path = workspace.path().join(CLONE_DIR);

        let result = self
            .clone_repo(&specifier, &clone_path)
            .and_then(|()| validate_template_directory(&clone_path, source));

        if let Err(e) = result {
            discard(workspace);
            return Err(e);
        }

        tracing::info!(
            "Fetched {} into {}",
            specifier.repo_url,
            clone_path.display()
        );

        Ok(FetchedTemplate {
            template_path: clone_path,
            workspace: Some(workspace),
        })
    }

    fn create_workspace(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_DIR_PREFIX);

        let workspace = match &self.temp_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        tracing::debug!("Created template workspace {}", workspace.path().display());
        Ok(workspace)
    }

    fn clone_repo(&self, specifier: &TemplateSpecifier, path: &Path) -> Result<()> {
        let args = clone_args(specifier, path);
        let result = self
            .runner
            .run(&self.git_program, &args, None)
            .map_err(|e| CreateError::CloneFailure {
                url: specifier.repo_url.clone(),
                code: None,
                output: e.to_string(),
            })?;

        if !result.success {
            return Err(CreateError::CloneFailure {
                url: specifier.repo_url.clone(),
                code: result.exit_code,
                output: result.combined_output(),
            });
        }

        Ok(())
    }
}

/// Arguments for a depth-1 clone of `specifier` into `path`.
///
/// The ref is requested up front with `--branch`; a missing ref fails the
/// clone.
pub fn clone_args(specifier: &TemplateSpecifier, path: &Path) -> Vec<String> {
    let mut args = vec!["clone".to_string(), "--depth".to_string(), "1".to_string()];

    if let Some(git_ref) = &specifier.git_ref {
        args.push("--branch".to_string());
        args.push(git_ref.clone());
    }

    args.push(specifier.repo_url.clone());
    args.push(path.to_string_lossy().to_string());
    args
}

fn discard(workspace: TempDir) {
    let path = workspace.path().to_path_buf();
    if let Err(e) = workspace.close() {
        tracing::warn!(
            "Failed to remove template workspace {}: {}",
            path.display(),
            e
        );
    }
}
