//! Config file discovery and parsing

use crate::domain::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_RELATIVE_PATH: &str = ".local-agent/config.toml";

/// Parsed settings plus the file they came from, if any.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

/// Load settings for one invocation.
///
/// An explicit `config_path` must exist and parse. Otherwise the first of
/// `<cwd>/.local-agent/config.toml` and `<repo_root>/.local-agent/config.toml`
/// is used; a broken auto-discovered file is reported and ignored.
pub fn load_config(
    cwd: &Path,
    repo_root: &Path,
    config_path: Option<&Path>,
) -> Result<LoadedConfig> {
    if let Some(path) = config_path {
        let config = read_config_file(path)?;
        return Ok(LoadedConfig { config, source: Some(path.to_path_buf()) });
    }

    let Some(config_file) = discover_config(cwd, repo_root) else {
        tracing::debug!("No config file found, using defaults");
        return Ok(LoadedConfig::default());
    };

    match read_config_file(&config_file) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(LoadedConfig { config, source: Some(config_file) })
        }
        Err(e) => {
            tracing::warn!("Ignoring config {}: {:#}", config_file.display(), e);
            Ok(LoadedConfig::default())
        }
    }
}

fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading config file: {}", path.display()))?;
    parse_toml_config(&content, path)
}

/// Parse TOML config. `extra_excludes` may also be a comma-separated string.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let mut raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    if let Some(table) = raw.as_table_mut() {
        if let Some(toml::Value::String(list)) = table.get("extra_excludes") {
            let items = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| toml::Value::String(s.to_string()))
                .collect();
            table.insert("extra_excludes".to_string(), toml::Value::Array(items));
        }
    }

    raw.try_into().with_context(|| format!("Invalid config: {}", config_file.display()))
}

fn discover_config(cwd: &Path, repo_root: &Path) -> Option<PathBuf> {
    [cwd, repo_root].into_iter().map(|dir| dir.join(CONFIG_RELATIVE_PATH)).find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join(CONFIG_RELATIVE_PATH);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_config_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let loaded = load_config(tmp.path(), tmp.path(), None).expect("config");
        assert!(loaded.source.is_none());

        let defaults = Config::default();
        assert_eq!(loaded.config.ollama_host, "http://localhost:11434");
        assert_eq!(loaded.config.model, "qwen2.5-coder:7b");
        assert_eq!(loaded.config.max_file_chars, 120_000);
        assert_eq!(loaded.config.max_context_files, 35);
        assert_eq!(loaded.config.max_tree_files, 250);
        assert!(loaded.config.extra_excludes.is_empty());
        assert_eq!(loaded.config.timeout_secs, defaults.timeout_secs);
    }

    #[test]
    fn test_every_key_is_overridden() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_config(
            tmp.path(),
            r#"
ollama_host = "http://gpu-box:11434"
model = "llama3.2"
max_file_chars = 5000
max_context_files = 4
max_tree_files = 20
extra_excludes = ["fixtures", "vendor"]
"#,
        );

        let loaded = load_config(tmp.path(), tmp.path(), None).expect("config");
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
        let cfg = loaded.config;
        assert_eq!(cfg.ollama_host, "http://gpu-box:11434");
        assert_eq!(cfg.model, "llama3.2");
        assert_eq!(cfg.max_file_chars, 5000);
        assert_eq!(cfg.max_context_files, 4);
        assert_eq!(cfg.max_tree_files, 20);
        assert_eq!(cfg.extra_excludes, vec!["fixtures", "vendor"]);
    }

    #[test]
    fn test_cwd_config_wins_over_repo_root() {
        let tmp = TempDir::new().expect("tmp");
        let repo = tmp.path();
        let sub = repo.join("pkg");
        write_config(repo, "model = \"root-model\"\n");
        write_config(&sub, "model = \"cwd-model\"\n");

        let loaded = load_config(&sub, repo, None).expect("config");
        assert_eq!(loaded.config.model, "cwd-model");

        let loaded = load_config(&repo.join("elsewhere"), repo, None).expect("config");
        assert_eq!(loaded.config.model, "root-model");
    }

    #[test]
    fn test_comma_separated_excludes() {
        let tmp = TempDir::new().expect("tmp");
        write_config(tmp.path(), "extra_excludes = \"fixtures, ,vendor \"\n");

        let loaded = load_config(tmp.path(), tmp.path(), None).expect("config");
        assert_eq!(loaded.config.extra_excludes, vec!["fixtures", "vendor"]);
    }

    #[test]
    fn test_explicit_config_invalid_type_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "max_context_files = \"many\"\n").expect("write");

        let result = load_config(tmp.path(), tmp.path(), Some(&path));
        assert!(result.is_err(), "explicit config with invalid type should return Err");
    }

    #[test]
    fn test_explicit_missing_file_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let result = load_config(tmp.path(), tmp.path(), Some(&tmp.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_auto_discovered_invalid_config_returns_default() {
        let tmp = TempDir::new().expect("tmp");
        write_config(tmp.path(), "max_file_chars = [1, 2]\n");

        let loaded = load_config(tmp.path(), tmp.path(), None).expect("soft-fail");
        assert!(loaded.source.is_none());
        assert_eq!(loaded.config.max_file_chars, Config::default().max_file_chars);
    }
}
