//! Shared CLI utilities.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal, Read};
use std::time::Duration;

use crate::llm::ModelError;

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace and
/// discarding empty segments.  Returns `None` when `value` is `None`.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
    })
}

/// Piped input, if stdin is not a terminal and carries any text.
pub fn read_piped_stdin() -> Result<Option<String>> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buf = String::new();
    stdin.read_to_string(&mut buf).context("Failed to read piped stdin")?;
    Ok(if buf.trim().is_empty() { None } else { Some(buf) })
}

/// Spinner on stderr while waiting for the model. Hidden when stderr is not
/// a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message.to_string());
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Model failure as a user-facing error carrying its remedy.
pub fn model_failure(err: ModelError) -> anyhow::Error {
    anyhow::anyhow!("{}\nhint: {}", err, err.hint())
}

pub fn print_model_error(err: &ModelError) {
    eprintln!("{} {}", style("error:").red().bold(), err);
    eprintln!("{} {}", style("hint:").yellow().bold(), err.hint());
}

pub fn heading(title: &str) -> String {
    style(title).bold().cyan().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv() {
        assert_eq!(parse_csv(&None), None);
        assert_eq!(parse_csv(&Some(" a, ,b ".into())), Some(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_model_failure_carries_hint() {
        let err = model_failure(ModelError::Unreachable { host: "http://127.0.0.1:9".into() });
        let text = err.to_string();
        assert!(text.contains("http://127.0.0.1:9"));
        assert!(text.contains("hint: Is Ollama running?"));
    }
}
