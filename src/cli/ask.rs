//! Ask command implementation

use anyhow::Result;
use clap::Args;

use super::utils::{heading, model_failure, read_piped_stdin, spinner};
use super::AppContext;
use crate::llm::ChatModel;
use crate::prompt::build_ask_messages;
use crate::quote::{is_quote_intent, QuoteResolver};
use crate::repo::ContextBudget;

#[derive(Args)]
pub struct AskArgs {
    /// The question (quote it, or pass several words)
    #[arg(value_name = "QUESTION", required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// Ignore piped stdin
    #[arg(long)]
    pub no_stdin: bool,
}

pub fn run(app: &AppContext, args: AskArgs) -> Result<()> {
    let question = args.question.join(" ");
    let stdin = if args.no_stdin { None } else { read_piped_stdin()? };
    answer(app, question.trim(), stdin.as_deref())
}

/// Answer one question: quote requests from the search tool, everything else
/// from the model with repository context.
pub fn answer(app: &AppContext, question: &str, stdin: Option<&str>) -> Result<()> {
    if question.is_empty() {
        anyhow::bail!("Question is empty");
    }

    let search = app.search();
    let excludes = app.excludes();

    if is_quote_intent(question) {
        tracing::debug!("Quote intent detected, answering from search results");
        let answer = QuoteResolver::new(&search).resolve(question, &app.repo.root_path, &excludes);
        println!("{answer}");
        return Ok(());
    }

    let budget = ContextBudget::one_shot(&app.config);
    let (tree, files) = app.repo.gather(question, &search, budget, &excludes);
    tracing::debug!("Context: {} tree entries, {} files", tree.len(), files.len());
    let messages = build_ask_messages(&tree, &files, question, stdin);

    let client = app.client().map_err(model_failure)?;
    let progress = spinner(&format!("Asking {}...", client.model_name()));
    let reply = client.chat(&messages);
    progress.finish_and_clear();

    let reply = reply.map_err(model_failure)?;
    println!("{}", heading(&format!("Answer ({})", client.model_name())));
    println!("{}", reply.trim_end());
    Ok(())
}
