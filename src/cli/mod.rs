//! Command-line interface for local-agent
//!
//! Every subcommand works on the repository that contains the current
//! directory and on one merged [`Config`] built from the config file and the
//! global flags.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{Config, ExcludeSet};
use crate::llm::{ModelError, OllamaClient};
use crate::repo::RepoContext;
use crate::search::Ripgrep;

mod ask;
mod chat;
mod commands;
mod doctor;
mod edit;
mod utils;

/// Repo-grounded coding assistant backed by a local Ollama model
#[derive(Parser)]
#[command(name = "local-agent")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of .local-agent/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ollama server URL
    #[arg(long, global = true, value_name = "URL")]
    pub host: Option<String>,

    /// Model name to use
    #[arg(short, long, global = true, value_name = "NAME")]
    pub model: Option<String>,

    /// Maximum number of files sent as context
    #[arg(long, global = true, value_name = "N")]
    pub max_files: Option<usize>,

    /// Extra path segments to exclude (comma-separated)
    #[arg(short = 'e', long, global = true, value_name = "NAMES")]
    pub exclude: Option<String>,
}

impl GlobalArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            ollama_host: self.host.clone(),
            model: self.model.clone(),
            max_context_files: self.max_files,
            extra_excludes: utils::parse_csv(&self.exclude).unwrap_or_default(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Ask one question about the current repository
    Ask(ask::AskArgs),

    /// Interactive chat with repository context on every turn
    Chat,

    /// Propose (or apply) an edit to one file
    Edit(edit::EditArgs),

    /// Run a custom command template as a question
    Run(commands::RunArgs),

    /// List custom command templates
    Commands,

    /// Check repository, config, search tool, and model server
    Doctor,

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Everything one invocation needs, resolved once.
pub struct AppContext {
    pub repo: RepoContext,
    pub config: Config,
    pub config_source: Option<PathBuf>,
}

impl AppContext {
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let repo = RepoContext::discover(&cwd);
        tracing::debug!("Repository root: {}", repo.root_path.display());

        let loaded = load_config(&cwd, &repo.root_path, global.config.as_deref())?;
        let config = merge_cli_with_config(loaded.config, global.overrides());
        Ok(Self { repo, config, config_source: loaded.source })
    }

    pub fn excludes(&self) -> ExcludeSet {
        self.config.exclude_set()
    }

    pub fn search(&self) -> Ripgrep {
        Ripgrep::new(self.config.search_program.as_str())
    }

    pub fn client(&self) -> Result<OllamaClient, ModelError> {
        OllamaClient::from_config(&self.config)
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.global.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Ask(args) => ask::run(&AppContext::load(&cli.global)?, args),
        Commands::Chat => chat::run(&AppContext::load(&cli.global)?),
        Commands::Edit(args) => edit::run(&AppContext::load(&cli.global)?, args),
        Commands::Run(args) => commands::run_template(&AppContext::load(&cli.global)?, args),
        Commands::Commands => commands::list(&AppContext::load(&cli.global)?),
        Commands::Doctor => doctor::run(&cli.global),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "local-agent",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
