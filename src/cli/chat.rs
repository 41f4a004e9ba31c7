//! Interactive chat loop

use anyhow::Result;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context as RlContext, Editor, Helper};

use super::commands::unresolved_message;
use super::utils::{heading, model_failure, print_model_error, spinner};
use super::AppContext;
use crate::domain::{CommandSpec, ExcludeSet};
use crate::llm::{ChatModel, ModelError};
use crate::prompt::{assemble_context, SYSTEM_ASK};
use crate::quote::{is_quote_intent, QuoteResolver};
use crate::repo::{ContextBudget, RepoContext};
use crate::search::LiteralSearch;
use crate::session::ChatSession;
use crate::templates::{discover_commands, load_and_render, resolve_command};

const BUILTIN_COMMANDS: &[&str] = &["/exit", "/quit", "/clear", "/model", "/models", "/help"];

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ChatInput {
    Empty,
    Exit,
    Clear,
    Help,
    Models,
    Model(Option<String>),
    Template { token: String, args: String },
    Question(String),
}

fn parse_input(line: &str) -> ChatInput {
    let line = line.trim();
    if line.is_empty() {
        return ChatInput::Empty;
    }
    let Some(command) = line.strip_prefix('/') else {
        return ChatInput::Question(line.to_string());
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    match name {
        "exit" | "quit" => ChatInput::Exit,
        "clear" => ChatInput::Clear,
        "help" => ChatInput::Help,
        "models" => ChatInput::Models,
        "model" => ChatInput::Model((!rest.is_empty()).then(|| rest.to_string())),
        _ => ChatInput::Template { token: name.to_string(), args: rest.to_string() },
    }
}

#[derive(Clone)]
struct CommandCompleter {
    commands: Vec<String>,
}

impl Helper for CommandCompleter {}
impl Hinter for CommandCompleter {
    type Hint = String;
}
impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &RlContext<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        if !line.starts_with('/') || line[..pos].contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let prefix = &line[..pos];
        let matches = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| Pair { display: cmd.clone(), replacement: cmd.clone() })
            .collect();
        Ok((0, matches))
    }
}

fn create_editor(templates: &[CommandSpec]) -> Result<Editor<CommandCompleter, DefaultHistory>> {
    let mut commands: Vec<String> = BUILTIN_COMMANDS.iter().map(|c| c.to_string()).collect();
    for spec in templates {
        commands.push(format!("/{}", spec.name));
        commands.push(format!("/{}", spec.qualified_name()));
    }
    commands.sort();
    commands.dedup();

    let mut editor = Editor::new()?;
    editor.set_helper(Some(CommandCompleter { commands }));
    Ok(editor)
}

/// `None` on Ctrl+C or Ctrl+D.
fn read_prompt(editor: &mut Editor<CommandCompleter, DefaultHistory>) -> Result<Option<String>> {
    match editor.readline("You> ") {
        Ok(line) => {
            let trimmed = line.trim().to_string();
            if !trimmed.is_empty() {
                editor.add_history_entry(trimmed.as_str())?;
            }
            Ok(Some(trimmed))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn print_help(templates: &[CommandSpec]) {
    println!("  /exit, /quit       leave the chat (Ctrl+C and Ctrl+D work too)");
    println!("  /clear             forget the conversation so far");
    println!("  /model [NAME]      show or switch the model");
    println!("  /models            list models on the server");
    println!("  /<command> [ARGS]  run a custom command template");
    if !templates.is_empty() {
        let names: Vec<String> = templates.iter().map(CommandSpec::qualified_name).collect();
        println!("  templates: {}", names.join(", "));
    }
}

/// Everything a question turn reads besides the session.
struct TurnContext<'a> {
    repo: &'a RepoContext,
    search: &'a dyn LiteralSearch,
    excludes: &'a ExcludeSet,
    budget: ContextBudget,
}

#[derive(Debug)]
enum TurnOutcome {
    Quoted(String),
    Answered(String),
    Failed(ModelError),
}

/// Expand `/name args` into the question text, or explain why it can't be.
fn render_turn(templates: &[CommandSpec], token: &str, args: &str) -> Result<String, String> {
    let spec =
        resolve_command(templates, token).ok_or_else(|| unresolved_message(templates, token))?;
    load_and_render(spec, args)
        .map(|text| text.trim().to_string())
        .map_err(|err| format!("{err:#}"))
}

/// Answer one question. Quote requests are resolved from the search tool and
/// recorded without a model call.
fn answer_turn<M: ChatModel>(
    session: &mut ChatSession<M>,
    ctx: &TurnContext<'_>,
    question: String,
) -> TurnOutcome {
    if is_quote_intent(&question) {
        let text = QuoteResolver::new(ctx.search)
            .resolve(&question, &ctx.repo.root_path, ctx.excludes)
            .to_string();
        session.record(question, text.clone());
        return TurnOutcome::Quoted(text);
    }

    let (tree, files) = ctx.repo.gather(&question, ctx.search, ctx.budget, ctx.excludes);
    let turn = assemble_context(&tree, &files, &question, None);
    let progress = spinner(&format!("Asking {}...", session.model_name()));
    let reply = session.send(turn);
    progress.finish_and_clear();

    match reply {
        Ok(reply) => TurnOutcome::Answered(reply),
        Err(err) => TurnOutcome::Failed(err),
    }
}

pub fn run(app: &AppContext) -> Result<()> {
    let client = app.client().map_err(model_failure)?;
    let mut session = ChatSession::new(client, SYSTEM_ASK);
    let search = app.search();
    let excludes = app.excludes();
    let turn_ctx = TurnContext {
        repo: &app.repo,
        search: &search,
        excludes: &excludes,
        budget: ContextBudget::interactive(&app.config),
    };
    let templates = discover_commands(&app.repo.root_path);
    let mut editor = create_editor(&templates)?;

    println!("{}", heading(&format!("local-agent chat ({})", session.model_name())));
    println!("Repository: {}", app.repo.root_path.display());
    println!("Type a question, /help for commands, Ctrl+C to exit.");

    loop {
        let Some(line) = read_prompt(&mut editor)? else {
            break;
        };

        let question = match parse_input(&line) {
            ChatInput::Empty => continue,
            ChatInput::Exit => break,
            ChatInput::Clear => {
                session.clear();
                println!("History cleared.");
                continue;
            }
            ChatInput::Help => {
                print_help(&templates);
                continue;
            }
            ChatInput::Models => {
                match session.model().list_models() {
                    Ok(models) if models.is_empty() => println!("The server has no models."),
                    Ok(models) => {
                        for name in models {
                            let marker = if name == session.model_name() { "*" } else { " " };
                            println!("{marker} {name}");
                        }
                    }
                    Err(err) => print_model_error(&err),
                }
                continue;
            }
            ChatInput::Model(None) => {
                println!("Current model: {}", session.model_name());
                continue;
            }
            ChatInput::Model(Some(name)) => {
                session.switch_model(&name);
                println!("Now using {}", session.model_name());
                continue;
            }
            ChatInput::Template { token, args } => match render_turn(&templates, &token, &args) {
                Ok(text) => text,
                Err(message) => {
                    eprintln!("{message}");
                    continue;
                }
            },
            ChatInput::Question(text) => text,
        };

        match answer_turn(&mut session, &turn_ctx, question) {
            TurnOutcome::Quoted(text) => {
                println!("{}", heading("Quote"));
                println!("{text}");
            }
            TurnOutcome::Answered(reply) => {
                println!("{}", heading(&format!("Assistant ({})", session.model_name())));
                println!("{}", reply.trim_end());
            }
            TurnOutcome::Failed(err) => print_model_error(&err),
        }
    }

    println!("Bye.");
    Ok(())
}
