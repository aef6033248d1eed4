//! Templates command implementation.
//!
//! The `create-app templates` command lists the built-in templates and the
//! community registry.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::args::TemplatesArgs;
use crate::config::ResolverConfig;
use crate::error::{CreateError, Result};
use crate::registry::{BuiltinTemplates, CommunityRegistry, CommunityTemplateEntry};
use crate::ui::theme::{should_use_colors, Theme};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

#[derive(Debug, Serialize)]
struct BuiltinListing {
    key: &'static str,
    directory: PathBuf,
    installed: bool,
}

#[derive(Debug, Serialize)]
struct TemplateListing<'a> {
    builtin: Vec<BuiltinListing>,
    community: &'a [CommunityTemplateEntry],
}

/// The templates command implementation.
pub struct TemplatesCommand {
    config: ResolverConfig,
    args: TemplatesArgs,
}

impl TemplatesCommand {
    /// Create a new templates command.
    pub fn new(config: &ResolverConfig, args: TemplatesArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &TemplatesArgs {
        &self.args
    }

    fn list(
        &self,
        builtins: &BuiltinTemplates,
        community: &CommunityRegistry,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let builtin: Vec<BuiltinListing> = builtins
            .keys()
            .into_iter()
            .filter_map(|key| {
                builtins.path_for(key).map(|directory| BuiltinListing {
                    key,
                    installed: directory.is_dir(),
                    directory,
                })
            })
            .collect();

        if self.args.json {
            let listing = TemplateListing {
                builtin,
                community: community.entries(),
            };
            let json =
                serde_json::to_string_pretty(&listing).map_err(|e| CreateError::Other(e.into()))?;
            ui.message(&json);
            return Ok(());
        }

        let theme = if ui.is_interactive() && should_use_colors() {
            Theme::new()
        } else {
            Theme::plain()
        };

        ui.message(&format!("  {}", theme.key.apply_to("Built-in:")));
        for entry in &builtin {
            let status = if entry.installed { "" } else { " (not installed)" };
            ui.message(&format!(
                "    {}{}",
                theme.highlight.apply_to(entry.key),
                theme.dim.apply_to(status)
            ));
        }

        ui.message("");
        ui.message(&format!("  {}", theme.key.apply_to("Community:")));
        if community.is_empty() {
            ui.message(&format!("    {}", theme.dim.apply_to("(none)")));
        }
        for entry in community.entries() {
            ui.message(&format!(
                "    {} {}",
                theme.highlight.apply_to(&entry.display_name),
                theme.source.apply_to(&entry.source)
            ));
            if let Some(description) = &entry.description {
                ui.message(&format!("      {}", theme.dim.apply_to(description)));
            }
        }

        ui.show_hint("Any GitHub repository also works: owner/repo#ref");
        Ok(())
    }
}

impl Command for TemplatesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let community = self.config.registry.load()?;
        let builtins = BuiltinTemplates::new(&self.config.builtin_root);

        self.list(&builtins, &community, ui)?;
        Ok(CommandResult::success())
    }
}
