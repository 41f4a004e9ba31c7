//! CLI flags layered over file config

use crate::domain::Config;

/// Values given on the command line. `None` keeps the file/default value.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub ollama_host: Option<String>,
    pub model: Option<String>,
    pub max_context_files: Option<usize>,
    pub extra_excludes: Vec<String>,
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(host) = cli.ollama_host.filter(|h| !h.trim().is_empty()) {
        config.ollama_host = host.trim().to_string();
    }
    if let Some(model) = cli.model.filter(|m| !m.trim().is_empty()) {
        config.model = model.trim().to_string();
    }
    if let Some(max) = cli.max_context_files {
        config.max_context_files = max;
    }
    for segment in cli.extra_excludes {
        if !config.extra_excludes.contains(&segment) {
            config.extra_excludes.push(segment);
        }
    }
    config
}
