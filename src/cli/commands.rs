//! Custom command templates: listing and running

use anyhow::Result;
use clap::Args;

use super::ask::answer;
use super::utils::read_piped_stdin;
use super::AppContext;
use crate::domain::CommandSpec;
use crate::templates::{discover_commands, load_and_render, resolve_command};

#[derive(Args)]
pub struct RunArgs {
    /// Template name, or scope:name when the name exists in both scopes
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Text substituted for $ARGUMENTS
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

pub fn list(app: &AppContext) -> Result<()> {
    let specs = discover_commands(&app.repo.root_path);
    if specs.is_empty() {
        println!("No custom commands found");
        println!(
            "Add markdown files to {} or ~/.local-agent/commands",
            app.repo.root_path.join(".local-agent/commands").display()
        );
        return Ok(());
    }
    for spec in &specs {
        println!("{}  {}", spec.qualified_name(), spec.path.display());
    }
    Ok(())
}

pub fn run_template(app: &AppContext, args: RunArgs) -> Result<()> {
    let specs = discover_commands(&app.repo.root_path);
    let Some(spec) = resolve_command(&specs, &args.command) else {
        anyhow::bail!("{}", unresolved_message(&specs, &args.command));
    };

    let question = load_and_render(spec, &args.args.join(" "))?;
    tracing::debug!("Running template {} ({})", spec.qualified_name(), spec.path.display());
    let stdin = read_piped_stdin()?;
    answer(app, question.trim(), stdin.as_deref())
}

/// Why a token did not resolve, with the names that would.
pub fn unresolved_message(specs: &[CommandSpec], token: &str) -> String {
    let token = token.trim().trim_start_matches('/');
    if specs.is_empty() {
        return format!("Unknown command '{token}': no custom commands found");
    }
    let same_name: Vec<String> =
        specs.iter().filter(|s| s.name == token).map(CommandSpec::qualified_name).collect();
    if same_name.len() > 1 {
        return format!("Command '{token}' is ambiguous; use one of: {}", same_name.join(", "));
    }
    let all: Vec<String> = specs.iter().map(CommandSpec::qualified_name).collect();
    format!("Unknown command '{token}'. Available: {}", all.join(", "))
}
