//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const REFUSAL: &str = "I can't quote exact lines because they were not provided in context.";

/// A repository whose config points at a closed port and a search binary that
/// does not exist, so no test depends on Ollama or ripgrep being installed.
fn offline_repo() -> TempDir {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path();
    fs::create_dir(root.join(".git")).expect("git dir");
    fs::create_dir_all(root.join("src")).expect("src dir");
    fs::write(root.join("src/database.py"), "import psycopg\nconn = psycopg.connect(URL)\n")
        .expect("write");
    fs::write(root.join("src/auth.py"), "def login():\n    pass\n").expect("write");
    write_file(
        root,
        ".local-agent/config.toml",
        "ollama_host = \"http://127.0.0.1:9\"\n\
         search_program = \"local-agent-missing-search-binary\"\n\
         timeout_secs = 5\n",
    );
    tmp
}

fn write_file(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, body).expect("write");
}

fn local_agent(repo: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("local-agent"));
    cmd.current_dir(repo.path()).env("HOME", repo.path().join("home")).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("local-agent"));
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("local-agent"));
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("local-agent"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("doctor"))
        .stdout(predicate::str::contains("commands"));
}

#[test]
fn test_commands_none_found() {
    let repo = offline_repo();
    local_agent(&repo)
        .arg("commands")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("No custom commands found"));
}

#[test]
fn test_commands_lists_project_and_user_templates() {
    let repo = offline_repo();
    write_file(repo.path(), ".local-agent/commands/review.md", "Review $ARGUMENTS");
    write_file(repo.path(), "home/.local-agent/commands/explain.md", "Explain $ARGUMENTS");

    local_agent(&repo)
        .arg("commands")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("project:review"))
        .stdout(predicate::str::contains("user:explain"));
}

#[test]
fn test_quote_request_without_search_tool_refuses() {
    let repo = offline_repo();
    local_agent(&repo)
        .args(["ask", "Quote the exact line where we connect to Postgres."])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains(REFUSAL))
        .stdout(predicate::str::contains("psycopg"));
}

#[test]
fn test_quote_request_works_from_subdirectory() {
    let repo = offline_repo();
    let mut cmd = local_agent(&repo);
    cmd.current_dir(repo.path().join("src"));
    cmd.args(["ask", "show me the lines for login"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains(REFUSAL));
}

#[test]
fn test_ask_unreachable_model_reports_hint() {
    let repo = offline_repo();
    local_agent(&repo)
        .args(["ask", "How", "does", "login", "work?"])
        .write_stdin("Traceback: login failed\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot reach the model server"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn test_edit_missing_file_fails() {
    let repo = offline_repo();
    local_agent(&repo)
        .args(["edit", "src/missing.py", "-i", "add a docstring"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist"));
}

#[test]
fn test_edit_rejects_paths_outside_repository() {
    let repo = offline_repo();
    local_agent(&repo)
        .args(["edit", "../outside.py", "-i", "anything"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist"));
}

#[test]
fn test_edit_unreachable_model_leaves_file_untouched() {
    let repo = offline_repo();
    local_agent(&repo)
        .args(["edit", "src/auth.py", "-i", "rename login", "--apply", "--yes"])
        .write_stdin("")
        .assert()
        .failure();

    let content = fs::read_to_string(repo.path().join("src/auth.py")).expect("read");
    assert_eq!(content, "def login():\n    pass\n");
}

#[test]
fn test_run_unknown_command_fails() {
    let repo = offline_repo();
    local_agent(&repo)
        .args(["run", "review", "focus on errors"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown command 'review'"));
}

#[test]
fn test_run_renders_template_into_question() {
    let repo = offline_repo();
    write_file(
        repo.path(),
        ".local-agent/commands/cite.md",
        "Quote the exact lines that mention $ARGUMENTS",
    );

    local_agent(&repo)
        .args(["run", "cite", "connect_database"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains(REFUSAL))
        .stdout(predicate::str::contains("connect_database"));
}

#[test]
fn test_explicit_bad_config_fails() {
    let repo = offline_repo();
    write_file(repo.path(), "bad.toml", "max_file_chars = \"lots\"\n");

    local_agent(&repo)
        .args(["--config", "bad.toml", "commands"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn test_doctor_reports_and_exits_zero() {
    let repo = offline_repo();
    local_agent(&repo)
        .arg("doctor")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("repository"))
        .stdout(predicate::str::contains("local-agent-missing-search-binary not found"))
        .stdout(predicate::str::contains("model server"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("local-agent"));
    cmd.args(["completions", "bash"]);
    cmd.assert().success().stdout(predicate::str::contains("local-agent"));
}
