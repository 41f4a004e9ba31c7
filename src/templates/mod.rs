//! Reusable prompt templates ("custom commands").
//!
//! A template is any `.md` file under one of the two command directories.
//! Its file stem is the command name and the directory it was found under
//! decides the scope. `$ARGUMENTS` in the body is replaced with whatever the
//! user typed after the command name.

use crate::domain::{CommandScope, CommandSpec};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const ARGUMENTS_PLACEHOLDER: &str = "$ARGUMENTS";

const COMMANDS_SUBDIR: &str = ".local-agent/commands";

/// The directories searched for templates, one per scope.
#[derive(Debug, Clone)]
pub struct CommandDirs {
    pub project: PathBuf,
    pub user: Option<PathBuf>,
}

impl CommandDirs {
    pub fn for_repo(repo_root: &Path) -> Self {
        Self {
            project: repo_root.join(COMMANDS_SUBDIR),
            user: dirs::home_dir().map(|home| home.join(COMMANDS_SUBDIR)),
        }
    }

    fn scoped(&self) -> impl Iterator<Item = (CommandScope, &Path)> {
        std::iter::once((CommandScope::Project, self.project.as_path()))
            .chain(self.user.as_deref().map(|dir| (CommandScope::User, dir)))
    }
}

/// Every template under the repository's and the user's command directories.
pub fn discover_commands(repo_root: &Path) -> Vec<CommandSpec> {
    discover_in(&CommandDirs::for_repo(repo_root))
}

pub fn discover_in(dirs: &CommandDirs) -> Vec<CommandSpec> {
    let mut specs = Vec::new();
    for (scope, dir) in dirs.scoped() {
        if !dir.is_dir() {
            continue;
        }
        for entry in WalkDir::new(dir).follow_links(false).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown(path) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            specs.push(CommandSpec { scope, name: name.to_string(), path: path.to_path_buf() });
        }
    }
    specs.sort_by(|a, b| (a.scope, &a.name, &a.path).cmp(&(b.scope, &b.name, &b.path)));
    tracing::debug!("Discovered {} command templates", specs.len());
    specs
}

fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("md"))
}

/// Find the template a user token names.
///
/// `scope:name` must match both parts exactly. A bare name only resolves
/// when exactly one template carries it.
pub fn resolve_command<'a>(specs: &'a [CommandSpec], token: &str) -> Option<&'a CommandSpec> {
    let token = token.trim().trim_start_matches('/');
    if token.is_empty() {
        return None;
    }

    if let Some((scope, name)) = token.split_once(':') {
        let scope = CommandScope::parse(scope)?;
        return specs.iter().find(|s| s.scope == scope && s.name == name);
    }

    let mut matching = specs.iter().filter(|s| s.name == token);
    match (matching.next(), matching.next()) {
        (Some(spec), None) => Some(spec),
        _ => None,
    }
}

pub fn render_template(template: &str, arguments: &str) -> String {
    template.replace(ARGUMENTS_PLACEHOLDER, arguments.trim())
}

/// Read and render a template in one step.
pub fn load_and_render(spec: &CommandSpec, arguments: &str) -> Result<String> {
    let text = fs::read_to_string(&spec.path)
        .with_context(|| format!("Failed to read command template {}", spec.path.display()))?;
    Ok(render_template(&text, arguments))
}
