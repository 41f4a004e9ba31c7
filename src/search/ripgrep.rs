//! ripgrep-backed literal search

use super::{CaseMode, LiteralSearch, SearchError, SearchHit, SearchRequest};
use std::io::ErrorKind;
use std::process::{Command, Output};

/// Runs `rg` with fixed-string patterns from the repository root.
///
/// Hidden files are searched and ignore files are not consulted, so the
/// result set matches what the repository walker lists.
#[derive(Debug, Clone)]
pub struct Ripgrep {
    program: String,
}

impl Default for Ripgrep {
    fn default() -> Self {
        Self::new("rg")
    }
}

impl Ripgrep {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    fn command(&self, request: &SearchRequest<'_>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(request.root)
            .arg("--hidden")
            .arg("--no-ignore")
            .arg("--no-messages")
            .arg("--color")
            .arg("never")
            .arg("--fixed-strings")
            .arg("--sort")
            .arg("path");

        match request.case {
            CaseMode::Sensitive => cmd.arg("--case-sensitive"),
            CaseMode::Insensitive => cmd.arg("--ignore-case"),
        };

        // A bare glob matches the basename at any depth, which is exactly
        // the exclude-set segment rule.
        for segment in request.excludes.iter() {
            cmd.arg("--glob").arg(format!("!{segment}"));
        }
        for pattern in request.patterns {
            cmd.arg("-e").arg(pattern);
        }
        cmd
    }

    fn run(&self, mut cmd: Command) -> Result<String, SearchError> {
        cmd.arg(".");
        tracing::debug!("Running search: {:?}", cmd);

        let output = cmd.output().map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                SearchError::Unavailable { program: self.program.clone() }
            } else {
                SearchError::Failed { message: err.to_string() }
            }
        })?;
        interpret_output(output)
    }
}

/// rg exits 0 on matches, 1 on no matches, 2 on errors. Exit 2 still carries
/// partial results when some files were unreadable.
fn interpret_output(output: Output) -> Result<String, SearchError> {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    match output.status.code() {
        Some(0) | Some(1) => Ok(stdout),
        _ if !stdout.is_empty() => Ok(stdout),
        _ => Err(SearchError::Failed {
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }),
    }
}

impl LiteralSearch for Ripgrep {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    fn matching_files(&self, request: &SearchRequest<'_>) -> Result<Vec<String>, SearchError> {
        if request.patterns.is_empty() {
            return Ok(Vec::new());
        }
        let mut cmd = self.command(request);
        cmd.arg("--files-with-matches");
        let stdout = self.run(cmd)?;

        Ok(stdout
            .lines()
            .map(crate::utils::normalize_path)
            .filter(|path| !path.is_empty() && !request.excludes.excludes(path))
            .collect())
    }

    fn matching_lines(
        &self,
        request: &SearchRequest<'_>,
        limit: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        if request.patterns.is_empty() {
            return Ok(Vec::new());
        }
        let mut cmd = self.command(request);
        cmd.arg("--line-number").arg("--with-filename").arg("--no-heading");
        let stdout = self.run(cmd)?;

        Ok(stdout
            .lines()
            .filter_map(SearchHit::parse)
            .filter(|hit| !request.excludes.excludes(&hit.path))
            .take(limit)
            .collect())
    }
}
