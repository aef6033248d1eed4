//! Resolve command implementation.
//!
//! The `create-app resolve` command classifies a template source, fetches
//! it when needed, and checks that the result is a usable template.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::args::ResolveArgs;
use crate::config::ResolverConfig;
use crate::error::{CreateError, Result};
use crate::registry::{ResolutionPlan, SourceKind, TemplateResolver, TemplateSpecifier};
use crate::shell::CommandRunner;
use crate::ui::theme::Theme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// What `resolve` reports on success.
#[derive(Debug, Serialize)]
struct ResolveReport {
    kind: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    source: String,
    template_path: PathBuf,
    temporary: bool,
    kept: bool,
}

/// The resolve command implementation.
pub struct ResolveCommand {
    config: ResolverConfig,
    args: ResolveArgs,
}

impl ResolveCommand {
    /// Create a new resolve command.
    pub fn new(config: &ResolverConfig, args: ResolveArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ResolveArgs {
        &self.args
    }

    /// Run the command against an already-built resolver.
    pub fn run<R: CommandRunner>(
        &self,
        resolver: &TemplateResolver<R>,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        if self.args.dry_run {
            let plan = resolver.plan(&self.args.template)?;
            self.show_plan(&plan, ui)?;
            return Ok(CommandResult::success());
        }

        let classified = resolver.classify(&self.args.template);
        let clones = classified.kind != SourceKind::Builtin
            && TemplateSpecifier::is_valid(&classified.source);
        let mut spinner =
            clones.then(|| ui.start_spinner(&format!("Cloning {}...", classified.source)));

        let (source, fetched) = match resolver.resolve(&self.args.template) {
            Ok(resolved) => resolved,
            Err(e) => {
                if let Some(spinner) = spinner.as_mut() {
                    spinner.finish_error(&format!("Could not fetch {}", classified.source));
                }
                return Err(e);
            }
        };
        if let Some(spinner) = spinner.as_mut() {
            spinner.finish_success(&format!("Fetched {}", source.source));
        }

        let temporary = fetched.is_temporary();
        let kept = self.args.keep && temporary;
        let template_path = if kept {
            fetched.keep()
        } else {
            let path = fetched.template_path().to_path_buf();
            fetched.cleanup()?;
            path
        };

        let report = ResolveReport {
            kind: source.kind,
            name: source.name,
            source: source.source,
            template_path,
            temporary,
            kept,
        };
        self.show_report(&report, ui)?;

        Ok(CommandResult::success())
    }

    fn show_plan(&self, plan: &ResolutionPlan, ui: &mut dyn UserInterface) -> Result<()> {
        if self.args.json {
            let json =
                serde_json::to_string_pretty(plan).map_err(|e| CreateError::Other(e.into()))?;
            ui.message(&json);
            return Ok(());
        }

        let theme = Theme::plain();
        ui.message(&theme.format_field("Kind", &plan.source.kind.to_string()));
        if let Some(name) = &plan.source.name {
            ui.message(&theme.format_field("Name", name));
        }
        ui.message(&theme.format_field("Source", &plan.source.source));

        if let Some(spec) = &plan.specifier {
            ui.message(&theme.format_field("Repository", &spec.repo_url));
            ui.message(&theme.format_field(
                "Ref",
                spec.git_ref.as_deref().unwrap_or("(default branch)"),
            ));
        }
        if let Some(path) = &plan.template_path {
            ui.message(&theme.format_field("Directory", &path.display().to_string()));
        }

        Ok(())
    }

    fn show_report(&self, report: &ResolveReport, ui: &mut dyn UserInterface) -> Result<()> {
        if self.args.json {
            let json =
                serde_json::to_string_pretty(report).map_err(|e| CreateError::Other(e.into()))?;
            ui.message(&json);
            return Ok(());
        }

        let theme = Theme::plain();
        ui.success(&format!(
            "Resolved {} template \"{}\"",
            report.kind, report.source
        ));
        if ui.output_mode().shows_details() {
            if let Some(name) = &report.name {
                ui.message(&theme.format_field("Name", name));
            }
        }
        ui.message(&theme.format_field(
            "Template path",
            &report.template_path.display().to_string(),
        ));

        if report.kept {
            ui.show_hint("The checkout was kept; remove its directory when you are done.");
        } else if report.temporary {
            ui.show_hint("Temporary checkout removed. Pass --keep to inspect it.");
        }

        Ok(())
    }
}

impl Command for ResolveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolver = TemplateResolver::from_config(&self.config)?;
        self.run(&resolver, ui)
    }
}
