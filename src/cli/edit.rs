//! Edit command implementation

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

use super::utils::{heading, model_failure, spinner};
use super::AppContext;
use crate::llm::ChatModel;
use crate::prompt::{build_edit_messages, strip_code_fences};
use crate::safety::safe_apply;
use crate::utils::{normalize_path, read_file_safe};

#[derive(Args)]
pub struct EditArgs {
    /// Repository-relative path of the file to edit
    #[arg(value_name = "PATH")]
    pub path: String,

    /// What to change in the file
    #[arg(short = 'i', long, value_name = "INSTRUCTION")]
    pub instruction: String,

    /// Write the proposed content to disk (default is a dry run)
    #[arg(long)]
    pub apply: bool,

    /// Do not ask for confirmation before writing
    #[arg(short = 'y', long, requires = "apply")]
    pub yes: bool,

    /// When applying, do not keep a backup of the original
    #[arg(long)]
    pub no_backup: bool,
}

pub fn run(app: &AppContext, args: EditArgs) -> Result<()> {
    let rel = normalize_path(args.path.trim());
    let target = match app.repo.resolve(&rel) {
        Some(path) if path.is_file() => path,
        _ => anyhow::bail!("File does not exist in the repository: {rel}"),
    };

    let (current, encoding) = read_file_safe(&target)?;
    tracing::debug!("Loaded {} ({} chars, {})", rel, current.chars().count(), encoding);

    let client = app.client().map_err(model_failure)?;
    let messages = build_edit_messages(&rel, &args.instruction, &current);
    let progress = spinner(&format!("Editing {rel} with {}...", client.model_name()));
    let reply = client.chat(&messages);
    progress.finish_and_clear();
    let updated = strip_code_fences(&reply.map_err(model_failure)?);

    if updated.trim().is_empty() {
        anyhow::bail!("Model returned empty content for {rel}; nothing to apply");
    }

    if !args.apply {
        println!("{}", heading(&format!("Proposed content for {rel} (not applied)")));
        println!("{}", updated.trim_end());
        println!();
        println!("Re-run with --apply to write these changes.");
        return Ok(());
    }

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Write changes to {rel}?"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted; {rel} was not changed.");
            return Ok(());
        }
    }

    let backup = safe_apply(&target, &updated, !args.no_backup)?;
    println!("Applied changes to {rel}");
    if let Some(backup) = backup {
        println!("Backup: {}", backup.display());
    }
    Ok(())
}
