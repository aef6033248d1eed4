//! Template resolution from multiple sources.
//!
//! Resolution order (first match wins):
//! 1. Built-in key
//! 2. Community registry source
//! 3. External GitHub specifier
//!
//! Every template, whatever its origin, passes the same directory check
//! before it is handed out.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::ResolverConfig;
use crate::error::{CreateError, Result};
use crate::registry::builtin::BuiltinTemplates;
use crate::registry::community::CommunityRegistry;
use crate::registry::fetch::{FetchedTemplate, GitFetcher};
use crate::registry::source::{classify, ResolvedTemplateSource, SourceKind};
use crate::registry::specifier::{looks_like_git_source, TemplateSpecifier};
use crate::registry::validate::validate_template_directory;
use crate::shell::{CommandRunner, SystemRunner};

/// What resolving a source would do, without fetching anything.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionPlan {
    #[serde(flatten)]
    pub source: ResolvedTemplateSource,
    /// Parsed specifier for community and external sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifier: Option<TemplateSpecifier>,
    /// Directory of a built-in template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
}

/// Resolves raw template sources to template directories.
#[derive(Debug)]
pub struct TemplateResolver<R = SystemRunner> {
    builtins: BuiltinTemplates,
    community: CommunityRegistry,
    fetcher: GitFetcher<R>,
}

impl TemplateResolver<SystemRunner> {
    /// Create a resolver from configuration, cloning with the system `git`.
    ///
    /// Loads the community registry; registry problems are fatal.
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        Self::from_config_with_runner(config, SystemRunner)
    }
}

impl<R: CommandRunner> TemplateResolver<R> {
    /// Create a resolver from configuration with a custom command runner.
    pub fn from_config_with_runner(config: &ResolverConfig, runner: R) -> Result<Self> {
        let community = config.registry.load()?;
        let fetcher = GitFetcher::with_runner(runner)
            .git_program(config.git_program.clone())
            .temp_root(config.temp_root.clone());

        Ok(Self::new(
            BuiltinTemplates::new(&config.builtin_root),
            community,
            fetcher,
        ))
    }

    /// Create a resolver from its parts.
    pub fn new(
        builtins: BuiltinTemplates,
        community: CommunityRegistry,
        fetcher: GitFetcher<R>,
    ) -> Self {
        let alternatives = builtins
            .keys()
            .into_iter()
            .map(str::to_string)
            .chain(community.sources().into_iter().map(str::to_string))
            .collect();

        Self {
            builtins,
            community,
            fetcher: fetcher.alternatives(alternatives),
        }
    }

    /// Get the built-in templates.
    pub fn builtins(&self) -> &BuiltinTemplates {
        &self.builtins
    }

    /// Get the community registry.
    pub fn community(&self) -> &CommunityRegistry {
        &self.community
    }

    /// Get the fetcher.
    pub fn fetcher(&self) -> &GitFetcher<R> {
        &self.fetcher
    }

    /// Classify `input` as built-in, community or external.
    pub fn classify(&self, input: &str) -> ResolvedTemplateSource {
        let source = input.trim();
        if self.builtins.has(source) {
            return ResolvedTemplateSource::builtin(source);
        }
        classify(source, self.community.entries())
    }

    /// Classify and parse `input` without touching the network.
    pub fn plan(&self, input: &str) -> Result<ResolutionPlan> {
        let source = self.classify(input);

        if source.kind == SourceKind::Builtin {
            let template_path = self.builtins.path_for(&source.source);
            return Ok(ResolutionPlan {
                source,
                specifier: None,
                template_path,
            });
        }

        if !looks_like_git_source(&source.source) {
            return Err(self.unknown(&source.source).resolving(&source.source));
        }
        let specifier =
            TemplateSpecifier::parse(&source.source).map_err(|e| e.resolving(&source.source))?;

        Ok(ResolutionPlan {
            source,
            specifier: Some(specifier),
            template_path: None,
        })
    }

    /// Resolve `input` to a validated template directory.
    ///
    /// The returned [`FetchedTemplate`] must be cleaned up by the caller once
    /// the template has been consumed; dropping it also releases it.
    pub fn resolve(&self, input: &str) -> Result<(ResolvedTemplateSource, FetchedTemplate)> {
        let source = self.classify(input);
        tracing::debug!("Resolving {} template \"{}\"", source.kind, source.source);

        let fetched = match source.kind {
            SourceKind::Builtin => self.resolve_builtin(&source.source)?,
            SourceKind::Community | SourceKind::External => self.fetcher.fetch(&source.source)?,
        };

        Ok((source, fetched))
    }

    fn resolve_builtin(&self, key: &str) -> Result<FetchedTemplate> {
        let path = self
            .builtins
            .path_for(key)
            .ok_or_else(|| self.unknown(key).resolving(key))?;

        validate_template_directory(&path, key).map_err(|e| e.resolving(key))?;
        Ok(FetchedTemplate::borrowed(path))
    }

    fn unknown(&self, input: &str) -> CreateError {
        let mut alternatives: Vec<String> =
            self.builtins.keys().into_iter().map(str::to_string).collect();
        alternatives.extend(self.community.sources().into_iter().map(str::to_string));

        CreateError::UnknownTemplate {
            input: input.to_string(),
            alternatives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::fetch::CLONE_DIR;
    use crate::shell::CommandResult;
    use std::cell::Cell;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Creates the clone destination with a package.json.
    #[derive(Default)]
    struct FakeGit {
        clones: Cell<usize>,
    }

    impl CommandRunner for FakeGit {
        fn run(&self, _program: &str, args: &[String], _cwd: Option<&Path>) -> Result<CommandResult> {
            self.clones.set(self.clones.get() + 1);
            let dest = PathBuf::from(args.last().unwrap());
            fs::create_dir_all(&dest).unwrap();
            fs::write(dest.join("package.json"), "{}").unwrap();
            Ok(CommandResult::success(String::new(), String::new(), Duration::ZERO))
        }
    }

    const REGISTRY: &str = r#"
templates:
  - name: Dashboard
    source: acme/dashboard#v2
    maintainer: { name: Jane }
"#;

    struct Fixture {
        _dir: TempDir,
        builtin_root: PathBuf,
        temp_root: PathBuf,
        resolver: TemplateResolver<FakeGit>,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let builtin_root = dir.path().join("templates");
        let basic = builtin_root.join("template-ts-dataelements");
        fs::create_dir_all(&basic).unwrap();
        fs::write(basic.join("package.json"), "{}").unwrap();

        let temp_root = dir.path().join("tmp");
        fs::create_dir_all(&temp_root).unwrap();

        let community =
            CommunityRegistry::from_yaml(REGISTRY, Path::new("registry.yaml")).unwrap();
        let fetcher = GitFetcher::with_runner(FakeGit::default()).temp_root(Some(temp_root.clone()));
        let resolver = TemplateResolver::new(BuiltinTemplates::new(&builtin_root), community, fetcher);

        Fixture {
            _dir: dir,
            builtin_root,
            temp_root,
            resolver,
        }
    }

    #[test]
    fn classify_prefers_builtin_keys() {
        let f = fixture();

        assert_eq!(f.resolver.classify("basic").kind, SourceKind::Builtin);
        assert_eq!(
            f.resolver.classify("acme/dashboard#v2").kind,
            SourceKind::Community
        );
        assert_eq!(f.resolver.classify("octocat/hello").kind, SourceKind::External);
    }

    #[test]
    fn resolves_builtin_without_cloning() {
        let f = fixture();

        let (source, fetched) = f.resolver.resolve("basic").unwrap();

        assert_eq!(source.kind, SourceKind::Builtin);
        assert_eq!(
            fetched.template_path(),
            f.builtin_root.join("template-ts-dataelements")
        );
        assert!(!fetched.is_temporary());
        assert_eq!(f.resolver.fetcher().runner().clones.get(), 0);

        let path = fetched.template_path().to_path_buf();
        fetched.cleanup().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn builtin_without_directory_fails_validation() {
        let f = fixture();

        let err = f.resolver.resolve("react-router").unwrap_err();

        assert!(matches!(
            err.root_cause(),
            CreateError::InvalidTemplateDirectory { .. }
        ));
        assert!(err
            .to_string()
            .starts_with("Failed to resolve template \"react-router\""));
    }

    #[test]
    fn resolves_community_template_by_source() {
        let f = fixture();

        let (source, fetched) = f.resolver.resolve("acme/dashboard#v2").unwrap();

        assert_eq!(source.kind, SourceKind::Community);
        assert_eq!(source.name.as_deref(), Some("Dashboard"));
        assert!(fetched.is_temporary());
        assert_eq!(fetched.template_path().file_name().unwrap(), CLONE_DIR);
        assert_eq!(f.resolver.fetcher().runner().clones.get(), 1);

        fetched.cleanup().unwrap();
        assert_eq!(fs::read_dir(&f.temp_root).unwrap().count(), 0);
    }

    #[test]
    fn unknown_template_lists_builtins_and_community_sources() {
        let f = fixture();

        let err = f.resolver.resolve("nonsense").unwrap_err();

        match err.root_cause() {
            CreateError::UnknownTemplate { alternatives, .. } => {
                assert_eq!(
                    alternatives,
                    &vec![
                        "basic".to_string(),
                        "react-router".to_string(),
                        "acme/dashboard#v2".to_string()
                    ]
                );
            }
            other => panic!("Expected UnknownTemplate, got {other:?}"),
        }
        assert_eq!(f.resolver.fetcher().runner().clones.get(), 0);
    }

    #[test]
    fn plan_parses_without_cloning() {
        let f = fixture();

        let plan = f
            .resolver
            .plan("https://github.com/acme/template.git#release")
            .unwrap();

        assert_eq!(plan.source.kind, SourceKind::External);
        let spec = plan.specifier.unwrap();
        assert_eq!(spec.owner, "acme");
        assert_eq!(spec.repo, "template");
        assert_eq!(spec.git_ref.as_deref(), Some("release"));
        assert_eq!(f.resolver.fetcher().runner().clones.get(), 0);
    }

    #[test]
    fn plan_for_builtin_reports_path() {
        let f = fixture();

        let plan = f.resolver.plan("basic").unwrap();

        assert!(plan.specifier.is_none());
        assert_eq!(
            plan.template_path,
            Some(f.builtin_root.join("template-ts-dataelements"))
        );
    }

    #[test]
    fn plan_rejects_unsupported_host() {
        let f = fixture();

        let err = f.resolver.plan("https://gitlab.com/acme/repo").unwrap_err();
        assert!(matches!(err.root_cause(), CreateError::UnsupportedHost { .. }));
    }

    #[test]
    fn plan_serializes_flat() {
        let f = fixture();

        let plan = f.resolver.plan("octocat/hello-world").unwrap();
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["kind"], "external");
        assert_eq!(json["source"], "octocat/hello-world");
        assert_eq!(
            json["specifier"]["repo_url"],
            "https://github.com/octocat/hello-world.git"
        );
        assert!(json["specifier"]["ref"].is_null());
    }
}
