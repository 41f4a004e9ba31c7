//! Doctor command: environment and readiness checks

use anyhow::Result;
use console::style;

use super::utils::heading;
use super::{AppContext, GlobalArgs};
use crate::config::{merge_cli_with_config, CONFIG_RELATIVE_PATH};
use crate::domain::Config;
use crate::llm::{ChatModel, OllamaClient};
use crate::repo::RepoContext;
use crate::search::LiteralSearch;
use crate::templates::discover_commands;

const DOCTOR_TIMEOUT_SECS: u64 = 10;

fn ok(label: &str, detail: impl std::fmt::Display) {
    println!("  {} {label}: {detail}", style("ok").green().bold());
}

fn warn(label: &str, detail: impl std::fmt::Display) {
    println!("  {} {label}: {detail}", style("warn").yellow().bold());
}

fn fail(label: &str, detail: impl std::fmt::Display) {
    println!("  {} {label}: {detail}", style("fail").red().bold());
}

/// Print every check; problems are reported, never returned.
pub fn run(global: &GlobalArgs) -> Result<()> {
    println!("{}", heading("local-agent doctor"));

    let app = match AppContext::load(global) {
        Ok(app) => app,
        Err(err) => {
            fail("config", format!("{err:#}"));
            let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
            let config = merge_cli_with_config(Config::default(), global.overrides());
            AppContext { repo: RepoContext::discover(&cwd), config, config_source: None }
        }
    };

    let root = &app.repo.root_path;
    if root.join(".git").exists() {
        ok("repository", root.display());
    } else {
        warn("repository", format!("{} (no .git found, using working directory)", root.display()));
    }

    match &app.config_source {
        Some(path) => ok("config", path.display()),
        None => ok("config", format!("defaults (no {CONFIG_RELATIVE_PATH})")),
    }

    let search = app.search();
    if search.is_available() {
        ok("search", format!("{} available", search.name()));
    } else {
        warn(
            "search",
            format!(
                "{} not found; relevance falls back to file names \
                 and quote requests can only refuse",
                search.name()
            ),
        );
    }

    check_model_server(&app.config);

    let templates = discover_commands(root);
    ok("commands", format!("{} template(s)", templates.len()));
    Ok(())
}

fn check_model_server(config: &Config) {
    let client = match OllamaClient::new(
        &config.ollama_host,
        &config.model,
        config.timeout_secs.min(DOCTOR_TIMEOUT_SECS),
    ) {
        Ok(client) => client,
        Err(err) => {
            fail("model server", format!("{err} ({})", err.hint()));
            return;
        }
    };

    match client.list_models() {
        Ok(models) => {
            ok("model server", format!("{} ({} models)", client.host(), models.len()));
            let wanted = client.model_name();
            if models.iter().any(|m| m == wanted || m.trim_end_matches(":latest") == wanted) {
                ok("model", wanted);
            } else {
                warn("model", format!("{wanted} is not installed; run `ollama pull {wanted}`"));
            }
        }
        Err(err) => fail("model server", format!("{err}\n       hint: {}", err.hint())),
    }
}
